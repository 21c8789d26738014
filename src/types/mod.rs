mod error;
mod field;
mod filter;
mod rule;
mod setter;
mod tagger;
mod track;
mod value;

pub use error::{CompileError, FilterSpecError, SetError, SetErrorKind, SetterSpecError};
pub use field::{FieldKind, TrackField};
pub use filter::{FilterComparers, MatchOp};
pub use rule::FilteredSetter;
pub use setter::Setter;
pub use tagger::{RuleSpec, Tagger, TaggerConfig};
pub use track::{Collection, Track};
