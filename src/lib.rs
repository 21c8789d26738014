mod apply;
mod compile;
mod error;
mod types;

pub use error::TagRuleError;
pub use types::{
    Collection, CompileError, FieldKind, FilterComparers, FilterSpecError, FilteredSetter,
    MatchOp, RuleSpec, SetError, SetErrorKind, Setter, SetterSpecError, Tagger, TaggerConfig,
    Track, TrackField,
};
