//! MongoDB cursor transformer
//!
//! Turns a database result cursor into documents, a JSON string, or a JSONP
//! string. The cursor is any type implementing [`DocumentCursor`]; results
//! from the MongoDB driver can be buffered with [`MemoryCursor::buffer`].
//!
//! # Modules
//!
//! - `cli`: Command-line interface for the `mongo-transformer` binary
//! - `config`: Configuration management
//! - `cursor`: Cursor trait and the in-memory cursor
//! - `error`: Error types and handling
//! - `formatter`: BSON to JSON encoding
//! - `transformer`: The cursor transformer itself
//!
//! # Example
//!
//! ```rust
//! use bson::doc;
//! use mongo_transformer::{Converted, CursorTransformer, MemoryCursor};
//!
//! let cursor = MemoryCursor::from_documents(vec![doc! { "a": 1 }, doc! { "a": 2 }]);
//! let mut transformer = CursorTransformer::with_cursor(cursor);
//!
//! assert_eq!(transformer.to_json().unwrap(), r#"[{"a":1},{"a":2}]"#);
//! assert_eq!(transformer.to_array().unwrap(), Converted::Many(vec![]));
//! ```

pub mod cli;
pub mod config;
pub mod cursor;
pub mod error;
pub mod formatter;
pub mod transformer;

// Re-export commonly used types
pub use config::Config;
pub use cursor::{DocumentCursor, MemoryCursor};
pub use error::{Result, TransformerError};
pub use formatter::JsonEncoder;
pub use transformer::{Converted, CursorTransformer, JsonpOptions};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
