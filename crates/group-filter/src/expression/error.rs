//! Error types for filter input decoding.

use thiserror::Error;

/// A specialized Result type for filter input operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors that can occur while decoding filter input.
///
/// Unknown slugs, malformed tokens and missing viewer context are not errors:
/// they simply contribute nothing. Only input of the wrong shape is rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// The `group` attribute is neither a string, an integer, nor a flat list of scalars.
    #[error("invalid group filter input: expected a string or a list of scalars, found {found}")]
    InvalidFilterInput {
        /// Description of what was found instead.
        found: String,
    },

    /// The request or search parameters could not be decoded.
    #[error("invalid search request: {found}")]
    InvalidRequest {
        /// Description of what went wrong.
        found: String,
    },

    /// A predicate fragment name is not one of the stable names.
    #[error("unknown predicate name: {name}")]
    UnknownPredicate {
        /// The unrecognized name.
        name: String,
    },
}

impl FilterError {
    /// Creates an invalid filter input error.
    pub fn invalid_input(found: impl Into<String>) -> Self {
        FilterError::InvalidFilterInput {
            found: found.into(),
        }
    }

    /// Creates an invalid request error.
    pub fn invalid_request(found: impl Into<String>) -> Self {
        FilterError::InvalidRequest {
            found: found.into(),
        }
    }

    /// Creates an unknown predicate error.
    pub fn unknown_predicate(name: impl Into<String>) -> Self {
        FilterError::UnknownPredicate { name: name.into() }
    }
}
