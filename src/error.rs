use thiserror::Error;

use crate::types::{CompileError, SetError};

/// Unified error type covering configuration parsing, compilation, and
/// rule application.
///
/// Returned by convenience constructors like
/// [`Tagger::from_json()`](crate::Tagger::from_json) and
/// [`Tagger::from_file()`](crate::Tagger::from_file).
#[derive(Debug, Error)]
pub enum TagRuleError {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Set(#[from] SetError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
