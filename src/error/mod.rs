//! Error handling for cursor transformation.
//!
//! Every fallible operation in the crate returns [`Result`], whose error type
//! [`TransformerError`] wraps the more specific kinds:
//! - missing or invalid cursors
//! - JSON (de)serialization failures
//! - MongoDB driver errors surfaced while buffering a driver cursor
//! - configuration errors
//!
//! # Example
//!
//! ```rust
//! use mongo_transformer::error::{Result, TransformerError};
//! use mongo_transformer::{CursorTransformer, MemoryCursor};
//!
//! fn render() -> Result<String> {
//!     let mut transformer: CursorTransformer<MemoryCursor> = CursorTransformer::new();
//!     transformer.to_json()
//! }
//!
//! assert!(matches!(render(), Err(TransformerError::NoCursor)));
//! ```

pub mod kinds;

// Re-export commonly used types
pub use kinds::{ConfigError, Result, TransformerError};
