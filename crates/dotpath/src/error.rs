use thiserror::Error;

/// Result type for path operations
pub type Result<T> = std::result::Result<T, PathError>;

/// Faults raised while writing through a dotted path.
///
/// Reads never fail: a missing or non-traversable level falls back to the
/// default instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// A segment tried to descend into (or assign on) a scalar value
    #[error("Cannot write '{segment}' of path '{path}': found {found}, expected object or array")]
    NotAContainer {
        path: String,
        segment: String,
        found: &'static str,
    },

    /// A segment addressing an array is not a decimal index
    #[error("Invalid array index '{segment}' in path '{path}'")]
    InvalidIndex { path: String, segment: String },

    /// An array index lies too far past the end of the array to pad
    #[error("Array index '{segment}' in path '{path}' is out of range (length {len})")]
    IndexOutOfRange {
        path: String,
        segment: String,
        len: usize,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PathError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
