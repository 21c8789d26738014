use thiserror::Error;

use super::field::{FieldKind, TrackField};
use super::value::Value;

/// Compilation failure. Identifies the offending rule-spec by its position
/// in the configuration and, where applicable, the field or key involved.
///
/// Compilation is fail-fast: the first error aborts the whole ruleset and
/// no partial [`Tagger`](super::Tagger) is produced.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("rule {rule}: missing required 'filter' key")]
    MissingFilter { rule: usize },

    #[error("rule {rule}: unknown field '{name}'")]
    UnknownField { rule: usize, name: String },

    #[error("rule {rule}: invalid filter spec: {source}")]
    InvalidFilterSpec {
        rule: usize,
        #[source]
        source: FilterSpecError,
    },

    #[error("rule {rule}: invalid setter for '{field}': {source}")]
    InvalidSetterSpec {
        rule: usize,
        field: TrackField,
        #[source]
        source: SetterSpecError,
    },
}

/// A malformed `filter` sub-mapping, reported by the filter factory.
#[derive(Debug, Error)]
pub enum FilterSpecError {
    #[error("filter spec must be a mapping of field names to conditions")]
    NotAMapping,

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("unknown match condition '{0}'")]
    UnknownCondition(String),

    #[error("condition on '{field}' needs a scalar reference value")]
    NonScalarReference { field: TrackField },

    #[error("condition '{op}' does not apply to '{field}' ({kind} field)")]
    ConditionKind {
        field: TrackField,
        op: String,
        kind: FieldKind,
    },

    #[error("condition on '{field}' must be a scalar, array, or single-condition mapping")]
    BadShape { field: TrackField },

    #[error("'match_all' must be a boolean")]
    BadMatchAll,
}

/// A malformed setter config, reported by the setter factory.
#[derive(Debug, Error)]
pub enum SetterSpecError {
    #[error("value {value} does not fit the field's {kind} kind")]
    ValueKind { value: Value, kind: FieldKind },

    #[error("'clear' must be `true`")]
    BadClear,

    #[error("source field '{0}' is unknown")]
    UnknownSourceField(String),

    #[error("cannot copy {source_kind} field '{source_field}' into a {target_kind} field")]
    IncompatibleCopy {
        source_field: TrackField,
        source_kind: FieldKind,
        target_kind: FieldKind,
    },

    #[error("incremental setters apply to integer fields only, not {0}")]
    IncrementalKind(FieldKind),

    #[error("'incremental' options must be a mapping with integer 'start'/'increment'")]
    BadIncremental,

    #[error("template setters apply to text fields only, not {0}")]
    TemplateKind(FieldKind),

    #[error("template references unknown field '{0}'")]
    TemplateUnknownField(String),

    #[error("template has an unclosed '{{' placeholder")]
    TemplateUnclosed,

    #[error("setter config must be a scalar or a recognized mapping")]
    BadShape,
}

/// A setter failure during [`Tagger::set_tags`](super::Tagger::set_tags).
/// Carries the identity of the track (its path) and the field being set.
#[derive(Debug, Error)]
#[error("failed to set '{field}' on '{track}': {kind}")]
pub struct SetError {
    pub track: String,
    pub field: TrackField,
    pub kind: SetErrorKind,
}

/// Why a setter failed on one track.
#[derive(Debug, Error)]
pub enum SetErrorKind {
    #[error("value {value} is not valid for a {kind} field")]
    InvalidValue { value: Value, kind: FieldKind },

    #[error("track is not a member of its resolved collection")]
    NotInCollection,

    #[error("required field '{0}' is not set")]
    MissingField(TrackField),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_field_message() {
        let err = CompileError::UnknownField {
            rule: 2,
            name: "not_a_real_field".into(),
        };
        assert_eq!(err.to_string(), "rule 2: unknown field 'not_a_real_field'");
    }

    #[test]
    fn missing_filter_message() {
        let err = CompileError::MissingFilter { rule: 0 };
        assert_eq!(err.to_string(), "rule 0: missing required 'filter' key");
    }

    #[test]
    fn invalid_setter_message() {
        let err = CompileError::InvalidSetterSpec {
            rule: 1,
            field: TrackField::Bpm,
            source: SetterSpecError::ValueKind {
                value: Value::String("fast".into()),
                kind: FieldKind::Float,
            },
        };
        assert_eq!(
            err.to_string(),
            "rule 1: invalid setter for 'bpm': value \"fast\" does not fit the field's float kind"
        );
    }

    #[test]
    fn invalid_filter_message() {
        let err = CompileError::InvalidFilterSpec {
            rule: 3,
            source: FilterSpecError::UnknownCondition("sounds_like".into()),
        };
        assert_eq!(
            err.to_string(),
            "rule 3: invalid filter spec: unknown match condition 'sounds_like'"
        );
    }

    #[test]
    fn set_error_identifies_track_and_field() {
        let err = SetError {
            track: "albums/ok/01.mp3".into(),
            field: TrackField::TrackNumber,
            kind: SetErrorKind::NotInCollection,
        };
        assert_eq!(
            err.to_string(),
            "failed to set 'track_number' on 'albums/ok/01.mp3': \
             track is not a member of its resolved collection"
        );
    }
}
