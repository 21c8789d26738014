use std::fmt;

use serde::Deserialize;

use super::error::{CompileError, SetError};
use super::rule::FilteredSetter;
use super::track::{Collection, Track};

/// One declarative tagging rule, as configured: an ordered mapping from
/// string keys to JSON values.
///
/// The `filter` key holds the filter sub-mapping; `field` is reserved for
/// a higher-level router and ignored here; every other key names a tag
/// field and carries that field's setter config. Key order is preserved
/// and becomes setter order.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct RuleSpec(pub serde_json::Map<String, serde_json::Value>);

/// Input to [`Tagger::compile`]: either rules still in their declarative
/// form, or an already-compiled tagger to pass through unchanged.
#[derive(Debug)]
pub enum TaggerConfig {
    Compiled(Tagger),
    Rules(Vec<RuleSpec>),
}

impl From<Tagger> for TaggerConfig {
    fn from(tagger: Tagger) -> Self {
        TaggerConfig::Compiled(tagger)
    }
}

impl From<Vec<RuleSpec>> for TaggerConfig {
    fn from(rules: Vec<RuleSpec>) -> Self {
        TaggerConfig::Rules(rules)
    }
}

/// A compiled, immutable set of tagging rules, applied in declaration
/// order. Compile once, apply to many track batches.
///
/// # Example
///
/// ```
/// use tagrule::{Collection, Tagger, Track};
///
/// let tagger = Tagger::from_json(
///     r#"[{"filter": {"genre": "Rock"}, "bpm": {"value": 120}}]"#,
/// )
/// .unwrap();
///
/// let mut tracks = vec![Track::new("a.mp3")];
/// tracks[0].genre = Some("Rock".to_owned());
/// let albums = vec![Collection::new(vec![0])];
///
/// tagger.set_tags(&mut tracks, &albums).unwrap();
/// assert_eq!(tracks[0].bpm, Some(120.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Tagger {
    pub(crate) rules: Vec<FilteredSetter>,
}

impl Tagger {
    /// Compile a configuration into a `Tagger`.
    ///
    /// An already-compiled tagger passes through unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] on the first malformed rule-spec; no
    /// partial tagger is produced.
    pub fn compile(config: impl Into<TaggerConfig>) -> Result<Tagger, CompileError> {
        match config.into() {
            TaggerConfig::Compiled(tagger) => Ok(tagger),
            TaggerConfig::Rules(specs) => crate::compile::compile(&specs),
        }
    }

    /// Parse a JSON array of rule-specs and compile it.
    ///
    /// # Errors
    ///
    /// Returns [`TagRuleError`](crate::TagRuleError) on JSON or compile
    /// failure.
    pub fn from_json(input: &str) -> Result<Tagger, crate::TagRuleError> {
        let specs: Vec<RuleSpec> = serde_json::from_str(input)?;
        Ok(Tagger::compile(specs)?)
    }

    /// Read a JSON rules file and compile it.
    ///
    /// # Errors
    ///
    /// Returns [`TagRuleError`](crate::TagRuleError) on I/O, JSON, or
    /// compile failure.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Tagger, crate::TagRuleError> {
        let input = std::fs::read_to_string(path)?;
        Tagger::from_json(&input)
    }

    /// Apply every rule, in declaration order, to the given tracks.
    ///
    /// Each rule's filter sees the full original `tracks` slice; for each
    /// match, the owning collection is the first one in `collections` that
    /// contains the track's index (a linear scan, O(tracks × collections)),
    /// or an empty context if none does. Every track should belong to at
    /// most one collection; when that precondition is violated the first
    /// match still wins, deterministically.
    ///
    /// Rules matched later overwrite fields written by earlier rules.
    ///
    /// # Errors
    ///
    /// Fail-fast: the first [`SetError`] propagates immediately. Tracks
    /// already processed keep their mutations; the failing track keeps the
    /// writes made before the failing setter.
    pub fn set_tags(
        &self,
        tracks: &mut [Track],
        collections: &[Collection],
    ) -> Result<(), SetError> {
        crate::apply::set_tags(&self.rules, tracks, collections)
    }

    /// The compiled rules, in declaration order.
    #[must_use]
    pub fn rules(&self) -> &[FilteredSetter] {
        &self.rules
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Display for Tagger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let setters: usize = self.rules.iter().map(|r| r.setters().len()).sum();
        write!(f, "Tagger({} rules, {setters} setters)", self.rules.len())
    }
}
