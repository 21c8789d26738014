use tagrule::{Collection, Tagger, Track};

fn main() {
    // Renumber every track by its position within its own album, and
    // stamp the album artist from the track artist.
    let tagger = Tagger::from_json(
        r#"[{
            "filter": {},
            "track_number": {"incremental": {}},
            "album_artist": {"field": "artist"}
        }]"#,
    )
    .expect("failed to compile rules");

    let mut tracks = Vec::new();
    let mut albums = Vec::new();
    for (album, artist) in [("First Light", "The Band"), ("Second Wind", "Solo Act")] {
        let members = (1..=3)
            .map(|n| {
                let idx = tracks.len();
                let mut track = Track::new(format!("{album}/{n:02}.mp3"));
                track.album = Some(album.to_owned());
                track.artist = Some(artist.to_owned());
                tracks.push(track);
                idx
            })
            .collect();
        albums.push(Collection::new(members));
    }

    tagger
        .set_tags(&mut tracks, &albums)
        .expect("failed to apply rules");

    for track in &tracks {
        println!(
            "{} -> #{} by {}",
            track.path,
            track.track_number.unwrap(),
            track.album_artist.as_deref().unwrap(),
        );
    }
}
