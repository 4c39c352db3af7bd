//! Shared error vocabulary for identifier construction.

use thiserror::Error;

/// Failures constructing or parsing a core identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("identifier must not be empty")]
    EmptyIdentifier,

    #[error("identifier {0:?} contains a control character or whitespace")]
    InvalidIdentifierChars(String),

    #[error("expected identifier with prefix {expected_prefix:?}, got {actual:?}")]
    WrongPrefix {
        expected_prefix: &'static str,
        actual: String,
    },

    #[error("expected {expected} lowercase hex characters after the prefix, got {actual:?}")]
    WrongHashShape { expected: usize, actual: String },
}
