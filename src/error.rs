use thiserror::Error;

pub type ConvertResult<T> = Result<T, ConvertError>;

/// Error returned by a key or hooks callback.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

pub type CallbackResult<T> = Result<T, CallbackError>;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Unhandled node type '{kind}'")]
    UnhandledNode { kind: String },

    #[error("Maximum nesting depth ({max_depth}) exceeded")]
    MaxNestingDepthExceeded { max_depth: usize },

    #[error("Key callback failed for <{tag}>: {source}")]
    KeyCallback {
        tag: String,
        #[source]
        source: CallbackError,
    },

    #[error("Hooks callback failed for <{tag}>: {source}")]
    HooksCallback {
        tag: String,
        #[source]
        source: CallbackError,
    },

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<serde_json::Error> for ConvertError {
    fn from(err: serde_json::Error) -> Self {
        ConvertError::DeserializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for ConvertError {
    fn from(err: serde_yaml::Error) -> Self {
        ConvertError::DeserializationError(err.to_string())
    }
}

impl From<std::io::Error> for ConvertError {
    fn from(err: std::io::Error) -> Self {
        ConvertError::Io(err.to_string())
    }
}
