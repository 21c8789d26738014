use tagrule::{Collection, Tagger, Track};

fn main() {
    // One rule: every rock track gets bpm = 120 and a comment.
    let tagger = Tagger::from_json(
        r#"[{
            "filter": {"genre": "Rock"},
            "bpm": {"value": 120},
            "comment": "tagged by rule"
        }]"#,
    )
    .expect("failed to compile rules");

    println!("{tagger}");

    let mut tracks = vec![
        Track::new("library/rock_anthem.mp3"),
        Track::new("library/quiet_jazz.mp3"),
    ];
    tracks[0].genre = Some("Rock".to_owned());
    tracks[1].genre = Some("Jazz".to_owned());

    let albums = vec![Collection::new(vec![0, 1])];
    tagger
        .set_tags(&mut tracks, &albums)
        .expect("failed to apply rules");

    for track in &tracks {
        println!(
            "{}: genre={:?} bpm={:?} comment={:?}",
            track.path, track.genre, track.bpm, track.comment
        );
    }
}
