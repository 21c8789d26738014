use std::cmp::Ordering;

use super::error::FilterSpecError;
use super::field::{FieldKind, TrackField};
use super::track::Track;
use super::value::Value;

/// Match conditions usable in a rule's `filter` mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOp {
    Is,
    IsNot,
    GreaterThan,
    GreaterEqual,
    LessThan,
    LessEqual,
    Contains,
    StartsWith,
    EndsWith,
}

impl MatchOp {
    fn from_name(name: &str) -> Option<MatchOp> {
        let op = match name {
            "is" => MatchOp::Is,
            "is_not" => MatchOp::IsNot,
            "greater_than" => MatchOp::GreaterThan,
            "greater_equal" => MatchOp::GreaterEqual,
            "less_than" => MatchOp::LessThan,
            "less_equal" => MatchOp::LessEqual,
            "contains" => MatchOp::Contains,
            "starts_with" => MatchOp::StartsWith,
            "ends_with" => MatchOp::EndsWith,
            _ => return None,
        };
        Some(op)
    }

    fn is_string_op(self) -> bool {
        matches!(
            self,
            MatchOp::Contains | MatchOp::StartsWith | MatchOp::EndsWith
        )
    }
}

/// One condition on one field. Multiple reference values are any-of:
/// the comparer matches if the condition holds against any of them.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparer {
    field: TrackField,
    op: MatchOp,
    references: Vec<Value>,
}

impl Comparer {
    fn matches(&self, track: &Track) -> bool {
        let actual = track.get(self.field);
        match self.op {
            // An unset field never satisfies is, and always satisfies is_not.
            MatchOp::Is => actual
                .is_some_and(|v| self.references.iter().any(|r| eq_value(&v, r))),
            MatchOp::IsNot => !actual
                .is_some_and(|v| self.references.iter().any(|r| eq_value(&v, r))),
            MatchOp::GreaterThan => self.ord_match(&actual, Ordering::is_gt),
            MatchOp::GreaterEqual => self.ord_match(&actual, Ordering::is_ge),
            MatchOp::LessThan => self.ord_match(&actual, Ordering::is_lt),
            MatchOp::LessEqual => self.ord_match(&actual, Ordering::is_le),
            MatchOp::Contains => self.str_match(&actual, |s, r| s.contains(r)),
            MatchOp::StartsWith => self.str_match(&actual, |s, r| s.starts_with(r)),
            MatchOp::EndsWith => self.str_match(&actual, |s, r| s.ends_with(r)),
        }
    }

    fn ord_match(&self, actual: &Option<Value>, accept: fn(Ordering) -> bool) -> bool {
        let Some(actual) = actual else { return false };
        self.references
            .iter()
            .any(|r| actual.compare_ord(r).is_some_and(accept))
    }

    fn str_match(&self, actual: &Option<Value>, accept: fn(&str, &str) -> bool) -> bool {
        let Some(actual) = actual.as_ref().and_then(Value::as_str) else {
            return false;
        };
        self.references
            .iter()
            .filter_map(Value::as_str)
            .any(|r| accept(actual, r))
    }
}

fn eq_value(a: &Value, b: &Value) -> bool {
    a.compare_ord(b) == Some(Ordering::Equal)
}

/// A pure predicate over tracks: the conjunction (or, with
/// `match_all: false`, disjunction) of its comparers.
///
/// An empty filter (`"filter": {}`) matches every track.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterComparers {
    comparers: Vec<Comparer>,
    match_all: bool,
}

impl FilterComparers {
    /// Build from the `filter` sub-mapping of a rule-spec.
    ///
    /// Each key is a field name; its value is a scalar (shorthand for
    /// `is`), an array of scalars (`is` any-of), or a single-entry mapping
    /// `{condition: scalar-or-array}`. The reserved key `match_all`
    /// switches between AND (default) and OR across fields.
    ///
    /// # Errors
    ///
    /// Returns [`FilterSpecError`] on any malformed shape.
    pub fn from_spec(spec: &serde_json::Value) -> Result<Self, FilterSpecError> {
        let map = spec.as_object().ok_or(FilterSpecError::NotAMapping)?;

        let mut comparers = Vec::new();
        let mut match_all = true;
        for (key, condition) in map {
            if key == "match_all" {
                match_all = condition.as_bool().ok_or(FilterSpecError::BadMatchAll)?;
                continue;
            }
            let field = TrackField::from_name(key)
                .ok_or_else(|| FilterSpecError::UnknownField(key.clone()))?;
            comparers.push(parse_condition(field, condition)?);
        }

        Ok(FilterComparers {
            comparers,
            match_all,
        })
    }

    /// Whether one track satisfies this filter.
    #[must_use]
    pub fn matches(&self, track: &Track) -> bool {
        if self.comparers.is_empty() {
            return true;
        }
        if self.match_all {
            self.comparers.iter().all(|c| c.matches(track))
        } else {
            self.comparers.iter().any(|c| c.matches(track))
        }
    }

    /// Indices of matching tracks, preserving input order. Never mutates.
    #[must_use]
    pub fn matching(&self, tracks: &[Track]) -> Vec<usize> {
        tracks
            .iter()
            .enumerate()
            .filter(|(_, track)| self.matches(track))
            .map(|(idx, _)| idx)
            .collect()
    }
}

fn parse_condition(
    field: TrackField,
    condition: &serde_json::Value,
) -> Result<Comparer, FilterSpecError> {
    let (op, reference) = match condition {
        serde_json::Value::Object(map) => {
            let mut entries = map.iter();
            let (name, reference) = entries
                .next()
                .ok_or(FilterSpecError::BadShape { field })?;
            if entries.next().is_some() {
                return Err(FilterSpecError::BadShape { field });
            }
            let op = MatchOp::from_name(name)
                .ok_or_else(|| FilterSpecError::UnknownCondition(name.clone()))?;
            (op, reference)
        }
        other => (MatchOp::Is, other),
    };

    if op.is_string_op() && field.kind() != FieldKind::Text {
        return Err(FilterSpecError::ConditionKind {
            field,
            op: condition_name(op).to_owned(),
            kind: field.kind(),
        });
    }

    let references = parse_references(field, reference)?;
    Ok(Comparer {
        field,
        op,
        references,
    })
}

fn parse_references(
    field: TrackField,
    reference: &serde_json::Value,
) -> Result<Vec<Value>, FilterSpecError> {
    let scalar = |v: &serde_json::Value| {
        Value::from_json(v).ok_or(FilterSpecError::NonScalarReference { field })
    };
    match reference {
        serde_json::Value::Array(items) if !items.is_empty() => {
            items.iter().map(scalar).collect()
        }
        serde_json::Value::Array(_) => Err(FilterSpecError::BadShape { field }),
        other => Ok(vec![scalar(other)?]),
    }
}

fn condition_name(op: MatchOp) -> &'static str {
    match op {
        MatchOp::Is => "is",
        MatchOp::IsNot => "is_not",
        MatchOp::GreaterThan => "greater_than",
        MatchOp::GreaterEqual => "greater_equal",
        MatchOp::LessThan => "less_than",
        MatchOp::LessEqual => "less_equal",
        MatchOp::Contains => "contains",
        MatchOp::StartsWith => "starts_with",
        MatchOp::EndsWith => "ends_with",
    }
}
