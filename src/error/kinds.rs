use std::{fmt, io};

/// Crate-wide `Result` type using [`TransformerError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, TransformerError>;

/// Top-level error type for cursor transformation.
#[derive(Debug)]
pub enum TransformerError {
    /// A conversion was requested before any cursor was set.
    NoCursor,

    /// The supplied cursor (or cursor input) is not a sequence of documents.
    InvalidCursor(String),

    /// JSON encoding or decoding failed.
    Serialization(serde_json::Error),

    /// MongoDB driver errors raised while reading a driver cursor.
    MongoDb(mongodb::error::Error),

    /// Configuration errors.
    Config(ConfigError),

    /// I/O errors.
    Io(io::Error),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Missing required field.
    MissingField(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for TransformerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformerError::NoCursor => {
                write!(f, "No cursor set: call convert() or set_cursor() first")
            }
            TransformerError::InvalidCursor(msg) => write!(f, "Invalid cursor: {msg}"),
            TransformerError::Serialization(e) => write!(f, "JSON error: {e}"),
            TransformerError::MongoDb(e) => write!(f, "MongoDB error: {e}"),
            TransformerError::Config(e) => write!(f, "Configuration error: {e}"),
            TransformerError::Io(e) => write!(f, "I/O error: {e}"),
            TransformerError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::MissingField(field) => write!(f, "Missing required field: {field}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
        }
    }
}

impl std::error::Error for TransformerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransformerError::Serialization(e) => Some(e),
            TransformerError::MongoDb(e) => Some(e),
            TransformerError::Config(e) => Some(e),
            TransformerError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for ConfigError {}

/* ========================= Conversions to TransformerError ========================= */

impl From<io::Error> for TransformerError {
    fn from(err: io::Error) -> Self {
        TransformerError::Io(err)
    }
}

impl From<serde_json::Error> for TransformerError {
    fn from(err: serde_json::Error) -> Self {
        TransformerError::Serialization(err)
    }
}

impl From<mongodb::error::Error> for TransformerError {
    fn from(err: mongodb::error::Error) -> Self {
        TransformerError::MongoDb(err)
    }
}

impl From<ConfigError> for TransformerError {
    fn from(err: ConfigError) -> Self {
        TransformerError::Config(err)
    }
}

impl From<String> for TransformerError {
    fn from(msg: String) -> Self {
        TransformerError::Generic(msg)
    }
}

impl From<&str> for TransformerError {
    fn from(msg: &str) -> Self {
        TransformerError::Generic(msg.to_owned())
    }
}
