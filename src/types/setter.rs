use super::error::{SetError, SetErrorKind, SetterSpecError};
use super::field::{FieldKind, TrackField};
use super::track::{Collection, Track};
use super::value::Value;

/// One piece of a parsed template string.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Segment {
    Literal(String),
    Field(TrackField),
}

/// How a setter computes the value it assigns. A closed set: every config
/// shape is validated into exactly one of these at compile time.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SetterAction {
    /// Assign a fixed literal value.
    Value(Value),
    /// Unset the field.
    Clear,
    /// Copy another field of the same track.
    CopyFrom(TrackField),
    /// Number the track by its position in its owning collection:
    /// `start + increment * position`. Integer fields only.
    Incremental { start: i64, increment: i64 },
    /// Assemble text from other fields of the same track. Text fields only.
    Template(Vec<Segment>),
}

/// A compiled field setter: one bound [`TrackField`] plus the action that
/// computes its new value. Writes only to its bound field; may read any
/// field of the track or of its collection siblings.
#[derive(Debug, Clone, PartialEq)]
pub struct Setter {
    field: TrackField,
    action: SetterAction,
}

impl Setter {
    /// Build a setter from the config value attached to a field key in a
    /// rule-spec.
    ///
    /// Accepted shapes:
    /// - a bare scalar, or `{"value": <scalar>}` -- literal assignment
    /// - `{"clear": true}` -- unset the field
    /// - `{"field": "<name>"}` -- copy from another field
    /// - `{"incremental": {"start": 1, "increment": 1}}` -- positional
    ///   numbering (both options default to 1)
    /// - `{"template": "{artist} - {title}"}` -- text assembly
    ///
    /// # Errors
    ///
    /// Returns [`SetterSpecError`] when the shape is unrecognized or the
    /// configured value does not fit the field's kind.
    pub fn from_spec(
        field: TrackField,
        spec: &serde_json::Value,
    ) -> Result<Setter, SetterSpecError> {
        let action = parse_action(field, spec)?;
        Ok(Setter { field, action })
    }

    #[cfg(test)]
    pub(crate) fn literal(field: TrackField, value: Value) -> Setter {
        Setter {
            field,
            action: SetterAction::Value(value),
        }
    }

    /// The field this setter is bound to.
    #[must_use]
    pub fn field(&self) -> TrackField {
        self.field
    }

    /// Compute and assign this setter's value on `tracks[idx]`, with
    /// `collection` as sibling context.
    ///
    /// # Errors
    ///
    /// Returns [`SetError`] identifying the track and field when the value
    /// cannot be computed or does not fit the field.
    pub fn set(
        &self,
        tracks: &mut [Track],
        idx: usize,
        collection: &Collection,
    ) -> Result<(), SetError> {
        self.set_inner(tracks, idx, collection)
            .map_err(|kind| SetError {
                track: tracks[idx].path.clone(),
                field: self.field,
                kind,
            })
    }

    fn set_inner(
        &self,
        tracks: &mut [Track],
        idx: usize,
        collection: &Collection,
    ) -> Result<(), SetErrorKind> {
        match &self.action {
            SetterAction::Value(value) => tracks[idx].set(self.field, value.clone()),
            SetterAction::Clear => {
                tracks[idx].clear(self.field);
                Ok(())
            }
            SetterAction::CopyFrom(source) => {
                let value = tracks[idx]
                    .get(*source)
                    .ok_or(SetErrorKind::MissingField(*source))?;
                tracks[idx].set(self.field, value)
            }
            SetterAction::Incremental { start, increment } => {
                let position = collection
                    .position(idx)
                    .ok_or(SetErrorKind::NotInCollection)?;
                let value = start + increment * position as i64;
                tracks[idx].set(self.field, Value::Int(value))
            }
            SetterAction::Template(segments) => {
                let mut out = String::new();
                for segment in segments {
                    match segment {
                        Segment::Literal(text) => out.push_str(text),
                        Segment::Field(source) => {
                            let value = tracks[idx]
                                .get(*source)
                                .ok_or(SetErrorKind::MissingField(*source))?;
                            render(&value, &mut out);
                        }
                    }
                }
                tracks[idx].set(self.field, Value::String(out))
            }
        }
    }
}

/// Render a value into a template without the quoting `Display` adds to
/// strings.
fn render(value: &Value, out: &mut String) {
    match value {
        Value::String(s) => out.push_str(s),
        other => out.push_str(&other.to_string()),
    }
}

fn parse_action(
    field: TrackField,
    spec: &serde_json::Value,
) -> Result<SetterAction, SetterSpecError> {
    let map = match spec {
        serde_json::Value::Object(map) => map,
        scalar => {
            let value = Value::from_json(scalar).ok_or(SetterSpecError::BadShape)?;
            return literal_action(field, value);
        }
    };

    if let Some(value) = map.get("value") {
        let value = Value::from_json(value).ok_or(SetterSpecError::BadShape)?;
        return literal_action(field, value);
    }
    if let Some(clear) = map.get("clear") {
        return match clear.as_bool() {
            Some(true) => Ok(SetterAction::Clear),
            _ => Err(SetterSpecError::BadClear),
        };
    }
    if let Some(source) = map.get("field") {
        return copy_action(field, source);
    }
    if let Some(options) = map.get("incremental") {
        return incremental_action(field, options);
    }
    if let Some(template) = map.get("template") {
        return template_action(field, template);
    }
    Err(SetterSpecError::BadShape)
}

fn literal_action(field: TrackField, value: Value) -> Result<SetterAction, SetterSpecError> {
    let fits = match field.kind() {
        FieldKind::Text => matches!(value, Value::String(_)),
        FieldKind::Integer => matches!(value, Value::Int(i) if u32::try_from(i).is_ok()),
        FieldKind::Float => matches!(value, Value::Int(_) | Value::Float(_)),
        FieldKind::Flag => matches!(value, Value::Bool(_)),
    };
    if !fits {
        return Err(SetterSpecError::ValueKind {
            value,
            kind: field.kind(),
        });
    }
    Ok(SetterAction::Value(value))
}

fn copy_action(
    field: TrackField,
    source: &serde_json::Value,
) -> Result<SetterAction, SetterSpecError> {
    let name = source.as_str().ok_or(SetterSpecError::BadShape)?;
    let source = TrackField::from_name(name)
        .ok_or_else(|| SetterSpecError::UnknownSourceField(name.to_owned()))?;
    let compatible = source.kind() == field.kind()
        || (source.kind() == FieldKind::Integer && field.kind() == FieldKind::Float);
    if !compatible {
        return Err(SetterSpecError::IncompatibleCopy {
            source_field: source,
            source_kind: source.kind(),
            target_kind: field.kind(),
        });
    }
    Ok(SetterAction::CopyFrom(source))
}

fn incremental_action(
    field: TrackField,
    options: &serde_json::Value,
) -> Result<SetterAction, SetterSpecError> {
    if field.kind() != FieldKind::Integer {
        return Err(SetterSpecError::IncrementalKind(field.kind()));
    }
    let map = options.as_object().ok_or(SetterSpecError::BadIncremental)?;
    let mut start = 1;
    let mut increment = 1;
    for (key, value) in map {
        let value = value.as_i64().ok_or(SetterSpecError::BadIncremental)?;
        match key.as_str() {
            "start" => start = value,
            "increment" => increment = value,
            _ => return Err(SetterSpecError::BadIncremental),
        }
    }
    Ok(SetterAction::Incremental { start, increment })
}

fn template_action(
    field: TrackField,
    template: &serde_json::Value,
) -> Result<SetterAction, SetterSpecError> {
    if field.kind() != FieldKind::Text {
        return Err(SetterSpecError::TemplateKind(field.kind()));
    }
    let template = template.as_str().ok_or(SetterSpecError::BadShape)?;

    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        literal.push_str(&rest[..open]);
        rest = &rest[open + 1..];
        let close = rest.find('}').ok_or(SetterSpecError::TemplateUnclosed)?;
        let name = &rest[..close];
        let source = TrackField::from_name(name)
            .ok_or_else(|| SetterSpecError::TemplateUnknownField(name.to_owned()))?;
        if !literal.is_empty() {
            segments.push(Segment::Literal(std::mem::take(&mut literal)));
        }
        segments.push(Segment::Field(source));
        rest = &rest[close + 1..];
    }
    literal.push_str(rest);
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(SetterAction::Template(segments))
}
