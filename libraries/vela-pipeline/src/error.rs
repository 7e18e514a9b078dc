//! Error types for element property access

use thiserror::Error;

/// Property access errors
///
/// The only fallible boundary operation is typed property access. Callers
/// that can tolerate a missing value fold these into a default instead of
/// propagating them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    /// The element does not expose the requested property
    #[error("element '{element}' has no property '{property}'")]
    NotFound {
        /// Element name
        element: String,
        /// Requested property name
        property: String,
    },

    /// The property exists but holds a different value kind
    #[error("property '{property}' on element '{element}' is not a {expected}")]
    TypeMismatch {
        /// Element name
        element: String,
        /// Requested property name
        property: String,
        /// Expected value kind
        expected: &'static str,
    },
}

/// Result type for property access
pub type Result<T> = std::result::Result<T, PropertyError>;
