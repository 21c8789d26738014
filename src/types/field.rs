use std::fmt;

/// The value kind a tag field expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free-form text.
    Text,
    /// Non-negative whole number (track numbers, years).
    Integer,
    /// Floating-point number (BPM, rating).
    Float,
    /// Boolean flag.
    Flag,
}

/// The closed set of tag fields a rule may set or filter on.
///
/// Field names in rule-specs resolve case-insensitively against this enum
/// once, at compile time; there is no runtime string dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackField {
    Title,
    Artist,
    Album,
    AlbumArtist,
    TrackNumber,
    TrackTotal,
    DiscNumber,
    DiscTotal,
    Genre,
    Year,
    Bpm,
    Key,
    Rating,
    Compilation,
    Comment,
}

/// Canonical name, accepted aliases, and field, in resolution order.
const FIELD_TABLE: &[(&str, &[&str], TrackField)] = &[
    ("title", &[], TrackField::Title),
    ("artist", &[], TrackField::Artist),
    ("album", &[], TrackField::Album),
    (
        "album_artist",
        &["albumartist"],
        TrackField::AlbumArtist,
    ),
    ("track_number", &["track"], TrackField::TrackNumber),
    ("track_total", &[], TrackField::TrackTotal),
    ("disc_number", &["disc"], TrackField::DiscNumber),
    ("disc_total", &[], TrackField::DiscTotal),
    ("genre", &["genres"], TrackField::Genre),
    ("year", &[], TrackField::Year),
    ("bpm", &[], TrackField::Bpm),
    ("key", &[], TrackField::Key),
    ("rating", &[], TrackField::Rating),
    ("compilation", &[], TrackField::Compilation),
    ("comment", &["comments"], TrackField::Comment),
];

impl TrackField {
    /// Resolve a field by name, case-insensitively. Accepts the canonical
    /// name and a few common aliases (`track`, `disc`, `albumartist`, ...).
    #[must_use]
    pub fn from_name(name: &str) -> Option<TrackField> {
        FIELD_TABLE.iter().find_map(|(canonical, aliases, field)| {
            let hit = canonical.eq_ignore_ascii_case(name)
                || aliases.iter().any(|a| a.eq_ignore_ascii_case(name));
            hit.then_some(*field)
        })
    }

    /// The canonical name used in rule-specs and error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        FIELD_TABLE
            .iter()
            .find(|(_, _, field)| *field == self)
            .map(|(canonical, _, _)| *canonical)
            .unwrap_or("unknown")
    }

    /// The value kind this field stores.
    #[must_use]
    pub fn kind(self) -> FieldKind {
        match self {
            TrackField::Title
            | TrackField::Artist
            | TrackField::Album
            | TrackField::AlbumArtist
            | TrackField::Genre
            | TrackField::Key
            | TrackField::Comment => FieldKind::Text,
            TrackField::TrackNumber
            | TrackField::TrackTotal
            | TrackField::DiscNumber
            | TrackField::DiscTotal
            | TrackField::Year => FieldKind::Integer,
            TrackField::Bpm | TrackField::Rating => FieldKind::Float,
            TrackField::Compilation => FieldKind::Flag,
        }
    }

    /// All known fields, in canonical order.
    pub fn all() -> impl Iterator<Item = TrackField> {
        FIELD_TABLE.iter().map(|(_, _, field)| *field)
    }
}

impl fmt::Display for TrackField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Text => "text",
            FieldKind::Integer => "integer",
            FieldKind::Float => "float",
            FieldKind::Flag => "flag",
        };
        f.write_str(name)
    }
}
