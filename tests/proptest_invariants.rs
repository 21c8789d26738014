
use proptest::prelude::*;
use strategies::{arb_albums, arb_library, GENRES};
use tagrule::{Tagger, Track};

fn genre_bpm_tagger(genre: &str, bpm: i64) -> Tagger {
    Tagger::from_json(&format!(
        r#"[{{"filter": {{"genre": "{genre}"}}, "bpm": {bpm}, "comment": "tagged"}}]"#
    ))
    .unwrap()
}

// ---------------------------------------------------------------------------
// Invariant 1: Determinism
//
// The same tagger applied to identical libraries produces identical results.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn apply_is_deterministic(
        library in arb_library(),
        genre in prop::sample::select(GENRES),
        bpm in 60_i64..=200,
    ) {
        let tagger = genre_bpm_tagger(genre, bpm);
        let mut first = library.clone();
        let mut second = library;

        let albums: Vec<tagrule::Collection> = vec![(0..first.len()).collect()];
        tagger.set_tags(&mut first, &albums).unwrap();
        tagger.set_tags(&mut second, &albums).unwrap();

        prop_assert_eq!(first, second);
    }
}

// ---------------------------------------------------------------------------
// Invariant 2: Non-matching tracks are untouched, and matching tracks only
// change in the fields the rule's setters are bound to.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn only_matched_tracks_and_bound_fields_change(
        library in arb_library(),
        genre in prop::sample::select(GENRES),
        bpm in 60_i64..=200,
    ) {
        let tagger = genre_bpm_tagger(genre, bpm);
        let before = library.clone();
        let mut after = library;
        tagger.set_tags(&mut after, &[]).unwrap();

        for (old, new) in before.iter().zip(&after) {
            if old.genre.as_deref() == Some(genre) {
                prop_assert_eq!(new.bpm, Some(bpm as f64));
                prop_assert_eq!(new.comment.as_deref(), Some("tagged"));
                // Everything the rule does not set is untouched.
                let mut masked = new.clone();
                masked.bpm = old.bpm;
                masked.comment = old.comment.clone();
                prop_assert_eq!(&masked, old);
            } else {
                prop_assert_eq!(new, old);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Invariant 3: Last write wins across overlapping rules.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn later_rule_overwrites_earlier(
        library in arb_library(),
        first in 1960_i64..=2025,
        second in 1960_i64..=2025,
    ) {
        let tagger = Tagger::from_json(&format!(
            r#"[
                {{"filter": {{}}, "year": {first}}},
                {{"filter": {{}}, "year": {second}}}
            ]"#
        ))
        .unwrap();

        let mut tracks = library;
        tagger.set_tags(&mut tracks, &[]).unwrap();
        prop_assert!(tracks.iter().all(|t| i64::from(t.year.unwrap()) == second));
    }
}

// ---------------------------------------------------------------------------
// Invariant 4: Incremental numbering is a bijection with album positions,
// whatever the album partition looks like.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn incremental_numbering_matches_album_positions(
        (library, albums) in arb_library()
            .prop_flat_map(|lib| {
                let len = lib.len();
                (Just(lib), arb_albums(len))
            }),
    ) {
        let tagger = Tagger::from_json(
            r#"[{"filter": {}, "track_number": {"incremental": {}}}]"#,
        )
        .unwrap();

        let mut tracks: Vec<Track> = library;
        tagger.set_tags(&mut tracks, &albums).unwrap();

        for album in &albums {
            for (position, idx) in album.iter().enumerate() {
                prop_assert_eq!(tracks[idx].track_number, Some(position as u32 + 1));
            }
        }
    }
}
