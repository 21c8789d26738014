use std::fmt;

use super::error::SetErrorKind;
use super::field::{FieldKind, TrackField};
use super::value::Value;

/// A mutable music track with a fixed set of typed tag fields.
///
/// `path` is the track's identity for error reporting; the engine never
/// compares or stores tracks, it only reads and writes fields in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track {
    pub path: String,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub album_artist: Option<String>,
    pub track_number: Option<u32>,
    pub track_total: Option<u32>,
    pub disc_number: Option<u32>,
    pub disc_total: Option<u32>,
    pub genre: Option<String>,
    pub year: Option<u32>,
    pub bpm: Option<f64>,
    pub key: Option<String>,
    pub rating: Option<f64>,
    pub compilation: Option<bool>,
    pub comment: Option<String>,
}

impl Track {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Track {
            path: path.into(),
            ..Track::default()
        }
    }

    /// Read one field as a [`Value`], or `None` if the field is unset.
    #[must_use]
    pub fn get(&self, field: TrackField) -> Option<Value> {
        match field {
            TrackField::Title => self.title.clone().map(Value::String),
            TrackField::Artist => self.artist.clone().map(Value::String),
            TrackField::Album => self.album.clone().map(Value::String),
            TrackField::AlbumArtist => self.album_artist.clone().map(Value::String),
            TrackField::TrackNumber => self.track_number.map(|n| Value::Int(n.into())),
            TrackField::TrackTotal => self.track_total.map(|n| Value::Int(n.into())),
            TrackField::DiscNumber => self.disc_number.map(|n| Value::Int(n.into())),
            TrackField::DiscTotal => self.disc_total.map(|n| Value::Int(n.into())),
            TrackField::Genre => self.genre.clone().map(Value::String),
            TrackField::Year => self.year.map(|n| Value::Int(n.into())),
            TrackField::Bpm => self.bpm.map(Value::Float),
            TrackField::Key => self.key.clone().map(Value::String),
            TrackField::Rating => self.rating.map(Value::Float),
            TrackField::Compilation => self.compilation.map(Value::Bool),
            TrackField::Comment => self.comment.clone().map(Value::String),
        }
    }

    /// Write one field, kind-checked. Int values coerce into float fields;
    /// integer fields reject negative or overflowing values.
    pub fn set(&mut self, field: TrackField, value: Value) -> Result<(), SetErrorKind> {
        match field.kind() {
            FieldKind::Text => {
                let Value::String(s) = value else {
                    return Err(invalid(value, field));
                };
                *self.text_slot(field) = Some(s);
            }
            FieldKind::Integer => {
                let Value::Int(i) = value else {
                    return Err(invalid(value, field));
                };
                let Ok(n) = u32::try_from(i) else {
                    return Err(invalid(Value::Int(i), field));
                };
                *self.integer_slot(field) = Some(n);
            }
            FieldKind::Float => {
                let f = match value {
                    Value::Float(f) => f,
                    #[allow(clippy::cast_precision_loss)]
                    Value::Int(i) => i as f64,
                    other => return Err(invalid(other, field)),
                };
                *self.float_slot(field) = Some(f);
            }
            FieldKind::Flag => {
                let Value::Bool(b) = value else {
                    return Err(invalid(value, field));
                };
                self.compilation = Some(b);
            }
        }
        Ok(())
    }

    /// Unset one field.
    pub fn clear(&mut self, field: TrackField) {
        match field.kind() {
            FieldKind::Text => *self.text_slot(field) = None,
            FieldKind::Integer => *self.integer_slot(field) = None,
            FieldKind::Float => *self.float_slot(field) = None,
            FieldKind::Flag => self.compilation = None,
        }
    }

    fn text_slot(&mut self, field: TrackField) -> &mut Option<String> {
        match field {
            TrackField::Title => &mut self.title,
            TrackField::Artist => &mut self.artist,
            TrackField::Album => &mut self.album,
            TrackField::AlbumArtist => &mut self.album_artist,
            TrackField::Genre => &mut self.genre,
            TrackField::Key => &mut self.key,
            TrackField::Comment => &mut self.comment,
            _ => unreachable!("{field} is not a text field"),
        }
    }

    fn integer_slot(&mut self, field: TrackField) -> &mut Option<u32> {
        match field {
            TrackField::TrackNumber => &mut self.track_number,
            TrackField::TrackTotal => &mut self.track_total,
            TrackField::DiscNumber => &mut self.disc_number,
            TrackField::DiscTotal => &mut self.disc_total,
            TrackField::Year => &mut self.year,
            _ => unreachable!("{field} is not an integer field"),
        }
    }

    fn float_slot(&mut self, field: TrackField) -> &mut Option<f64> {
        match field {
            TrackField::Bpm => &mut self.bpm,
            TrackField::Rating => &mut self.rating,
            _ => unreachable!("{field} is not a float field"),
        }
    }
}

fn invalid(value: Value, field: TrackField) -> SetErrorKind {
    SetErrorKind::InvalidValue {
        value,
        kind: field.kind(),
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// An ordered group of tracks (typically an album) providing sibling
/// context to collection-aware setters.
///
/// Members are indices into the caller's track slice, so a setter can read
/// siblings while the engine holds the slice mutably.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    members: Vec<usize>,
}

impl Collection {
    /// The no-context fallback used when a track belongs to no collection.
    pub(crate) const EMPTY: Collection = Collection {
        members: Vec::new(),
    };

    #[must_use]
    pub fn new(members: Vec<usize>) -> Self {
        Collection { members }
    }

    #[must_use]
    pub fn contains(&self, track: usize) -> bool {
        self.members.contains(&track)
    }

    /// The track's position within this collection, in member order.
    #[must_use]
    pub fn position(&self, track: usize) -> Option<usize> {
        self.members.iter().position(|&m| m == track)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.members.iter().copied()
    }
}

impl FromIterator<usize> for Collection {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Collection {
            members: iter.into_iter().collect(),
        }
    }
}
