use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use tagrule::{Collection, Tagger, Track};

fn build_library(tracks_per_album: usize, albums: usize) -> (Vec<Track>, Vec<Collection>) {
    let genres = ["Rock", "Jazz", "Metal", "Pop"];
    let mut tracks = Vec::with_capacity(tracks_per_album * albums);
    let mut collections = Vec::with_capacity(albums);

    for album in 0..albums {
        let members = (0..tracks_per_album)
            .map(|n| {
                let idx = tracks.len();
                let mut track = Track::new(format!("album_{album}/{n:02}.mp3"));
                track.artist = Some(format!("Artist {album}"));
                track.album = Some(format!("Album {album}"));
                track.genre = Some(genres[album % genres.len()].to_owned());
                tracks.push(track);
                idx
            })
            .collect();
        collections.push(Collection::new(members));
    }

    (tracks, collections)
}

fn build_tagger() -> Tagger {
    Tagger::from_json(
        r#"[
            {"filter": {"genre": "Rock"}, "bpm": 120, "comment": "rock"},
            {"filter": {"genre": "Jazz"}, "bpm": 90},
            {"filter": {}, "track_number": {"incremental": {}}},
            {"filter": {"artist": {"starts_with": "Artist 1"}}, "album_artist": {"field": "artist"}}
        ]"#,
    )
    .expect("bench config must compile")
}

fn bench_compile(c: &mut Criterion) {
    c.bench_function("compile_4_rules", |b| {
        b.iter(build_tagger);
    });
}

fn bench_apply(c: &mut Criterion) {
    let tagger = build_tagger();

    for (name, tracks_per_album, albums) in [
        ("apply_100_tracks_10_albums", 10, 10),
        ("apply_1000_tracks_50_albums", 20, 50),
    ] {
        let (tracks, collections) = build_library(tracks_per_album, albums);
        c.bench_function(name, |b| {
            // set_tags mutates, so each iteration gets a fresh library.
            b.iter_batched(
                || tracks.clone(),
                |mut tracks| {
                    tagger
                        .set_tags(&mut tracks, &collections)
                        .expect("bench apply must succeed");
                    tracks
                },
                BatchSize::LargeInput,
            );
        });
    }
}

criterion_group!(benches, bench_compile, bench_apply);
criterion_main!(benches);
