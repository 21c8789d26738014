use crate::types::{Collection, FilteredSetter, SetError, Track};

/// Apply every rule to every track it matches, in declaration order.
///
/// Each rule filters the full original `tracks` slice independently of the
/// other rules. Collection resolution is first-match over `collections`,
/// with an empty context as the fallback for orphan tracks.
pub(crate) fn set_tags(
    rules: &[FilteredSetter],
    tracks: &mut [Track],
    collections: &[Collection],
) -> Result<(), SetError> {
    let no_context = Collection::EMPTY;
    for rule in rules {
        let matched = rule.filter().matching(tracks);
        for idx in matched {
            let collection = collections
                .iter()
                .find(|coll| coll.contains(idx))
                .unwrap_or(&no_context);
            rule.set_tags(tracks, idx, collection)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{Collection, Tagger, Track};

    fn tagger(json: &str) -> Tagger {
        Tagger::from_json(json).unwrap()
    }

    fn track(path: &str, genre: Option<&str>) -> Track {
        let mut t = Track::new(path);
        t.genre = genre.map(str::to_owned);
        t
    }

    #[test]
    fn scenario_rock_tracks_get_bpm() {
        let tagger = tagger(r#"[{"filter": {"genre": "Rock"}, "bpm": {"value": 120}}]"#);
        let mut tracks = vec![
            track("r1.mp3", Some("Rock")),
            track("r2.mp3", Some("Rock")),
            track("j1.mp3", Some("Jazz")),
        ];
        let albums = vec![Collection::new(vec![0, 1, 2])];

        tagger.set_tags(&mut tracks, &albums).unwrap();

        assert_eq!(tracks[0].bpm, Some(120.0));
        assert_eq!(tracks[1].bpm, Some(120.0));
        assert_eq!(tracks[2].bpm, None);
    }

    #[test]
    fn no_match_is_a_no_op() {
        let tagger = tagger(r#"[{"filter": {"genre": "Polka"}, "bpm": 120}]"#);
        let mut tracks = vec![track("a.mp3", Some("Rock"))];
        let before = tracks.clone();
        tagger.set_tags(&mut tracks, &[]).unwrap();
        assert_eq!(tracks, before);
    }

    #[test]
    fn later_rule_wins_on_overlap() {
        let tagger = tagger(
            r#"[
                {"filter": {"genre": "Rock"}, "bpm": 100},
                {"filter": {"artist": "The Band"}, "bpm": 140}
            ]"#,
        );
        let mut t = track("a.mp3", Some("Rock"));
        t.artist = Some("The Band".to_owned());
        let mut tracks = vec![t];

        tagger.set_tags(&mut tracks, &[]).unwrap();
        assert_eq!(tracks[0].bpm, Some(140.0));
    }

    #[test]
    fn rules_filter_the_original_tracks_independently() {
        // The first rule rewrites genre; the second still matches on the
        // rewritten state of the track, but its filter ran against the full
        // track list, not a narrowed subset from rule one.
        let tagger = tagger(
            r#"[
                {"filter": {"genre": "Rock"}, "comment": "was rock"},
                {"filter": {"genre": "Jazz"}, "comment": "was jazz"}
            ]"#,
        );
        let mut tracks = vec![track("a.mp3", Some("Rock")), track("b.mp3", Some("Jazz"))];
        tagger.set_tags(&mut tracks, &[]).unwrap();
        assert_eq!(tracks[0].comment.as_deref(), Some("was rock"));
        assert_eq!(tracks[1].comment.as_deref(), Some("was jazz"));
    }

    #[test]
    fn first_containing_collection_provides_context() {
        let tagger = tagger(r#"[{"filter": {}, "track_total": {"incremental": {}}}]"#);
        let mut tracks = vec![
            track("a1.mp3", None),
            track("a2.mp3", None),
            track("b1.mp3", None),
        ];
        // Track 2 belongs to the second album only.
        let albums = vec![Collection::new(vec![0, 1]), Collection::new(vec![2])];

        tagger.set_tags(&mut tracks, &albums).unwrap();
        assert_eq!(tracks[0].track_total, Some(1));
        assert_eq!(tracks[1].track_total, Some(2));
        // First member of its own album, not third of the first.
        assert_eq!(tracks[2].track_total, Some(1));
    }

    #[test]
    fn orphan_track_gets_empty_context() {
        // A context-free setter works on a track in no collection at all.
        let tagger = tagger(r#"[{"filter": {}, "comment": "seen"}]"#);
        let mut tracks = vec![track("stray.mp3", None)];
        tagger.set_tags(&mut tracks, &[]).unwrap();
        assert_eq!(tracks[0].comment.as_deref(), Some("seen"));
    }

    #[test]
    fn orphan_track_fails_collection_dependent_setter() {
        let tagger = tagger(r#"[{"filter": {}, "track_number": {"incremental": {}}}]"#);
        let mut tracks = vec![track("stray.mp3", None)];
        let err = tagger.set_tags(&mut tracks, &[]).unwrap_err();
        assert_eq!(err.track, "stray.mp3");
    }

    #[test]
    fn fail_fast_keeps_earlier_mutations() {
        // Setter order per track: artist literal, then album_artist copied
        // from genre. The second track has no genre, so its copy fails after
        // the first track was fully processed.
        let tagger = tagger(
            r#"[{"filter": {}, "artist": "X", "album_artist": {"field": "genre"}}]"#,
        );
        let mut tracks = vec![track("ok.mp3", Some("Rock")), track("bad.mp3", None)];

        let err = tagger.set_tags(&mut tracks, &[]).unwrap_err();
        assert_eq!(err.track, "bad.mp3");

        // First track: both setters applied.
        assert_eq!(tracks[0].artist.as_deref(), Some("X"));
        assert_eq!(tracks[0].album_artist.as_deref(), Some("Rock"));
        // Failing track: the setter before the failure did run.
        assert_eq!(tracks[1].artist.as_deref(), Some("X"));
        assert_eq!(tracks[1].album_artist, None);
    }

    #[test]
    fn empty_tagger_changes_nothing() {
        let tagger = tagger("[]");
        let mut tracks = vec![track("a.mp3", Some("Rock"))];
        let before = tracks.clone();
        tagger.set_tags(&mut tracks, &[]).unwrap();
        assert_eq!(tracks, before);
    }
}
