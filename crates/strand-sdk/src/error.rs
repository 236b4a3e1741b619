//! Error types for the Strand binding ABI

/// Result type for binding-layer operations
pub type BindResult<T> = Result<T, BindError>;

/// Binding layer error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    /// Type mismatch during conversion
    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        /// Expected type name
        expected: String,
        /// Actual type name
        got: String,
    },

    /// Call context carried fewer arguments than the native signature requires
    #[error("Missing argument at index {index}")]
    MissingArgument {
        /// Zero-based index of the missing argument
        index: usize,
    },

    /// Receiver is not an instance of the expected native class
    #[error("Wrong receiver: expected instance of {expected}, got {got}")]
    WrongReceiver {
        /// Expected native class name
        expected: String,
        /// What the receiver slot actually held
        got: String,
    },

    /// Generic binding error
    #[error("{0}")]
    Message(String),
}

impl From<String> for BindError {
    fn from(s: String) -> Self {
        BindError::Message(s)
    }
}

impl From<&str> for BindError {
    fn from(s: &str) -> Self {
        BindError::Message(s.to_string())
    }
}
