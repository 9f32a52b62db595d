//! Cursor transformer
//!
//! [`CursorTransformer`] holds one cursor at a time and turns it into
//! documents, JSON, or JSONP:
//!
//! ```rust
//! use bson::doc;
//! use mongo_transformer::{CursorTransformer, JsonpOptions, MemoryCursor};
//!
//! let cursor = MemoryCursor::from_documents(vec![doc! { "a": 1 }]);
//! let mut transformer = CursorTransformer::new();
//!
//! let jsonp = transformer
//!     .convert(Some(cursor))
//!     .to_jsonp(&JsonpOptions::new("f"))
//!     .unwrap();
//! assert_eq!(jsonp, r#"f({"a":1})"#);
//! ```

use bson::{Bson, Document};
use tracing::debug;

use crate::cursor::DocumentCursor;
use crate::error::{Result, TransformerError};
use crate::formatter::JsonEncoder;

/// Result of draining a cursor
#[derive(Debug, Clone, PartialEq)]
pub enum Converted {
    /// The cursor matched exactly one document, returned unwrapped
    Single(Document),

    /// Every document the cursor yielded, in iteration order
    Many(Vec<Document>),
}

impl Converted {
    /// Number of documents held
    pub fn len(&self) -> usize {
        match self {
            Converted::Single(_) => 1,
            Converted::Many(docs) => docs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flatten into a list of documents
    pub fn into_documents(self) -> Vec<Document> {
        match self {
            Converted::Single(doc) => vec![doc],
            Converted::Many(docs) => docs,
        }
    }

    /// Convert into a BSON value: a document or an array of documents
    pub fn into_bson(self) -> Bson {
        match self {
            Converted::Single(doc) => Bson::Document(doc),
            Converted::Many(docs) => Bson::Array(docs.into_iter().map(Bson::Document).collect()),
        }
    }
}

/// Options for [`CursorTransformer::to_jsonp`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonpOptions {
    /// Name of the JavaScript function wrapping the payload
    ///
    /// Written to the output verbatim. It is not escaped or validated, so a
    /// callback taken from untrusted input (e.g. a `?callback=` query
    /// parameter) can inject script. Callers must check it is a safe
    /// identifier before passing it here.
    pub callback: String,
}

impl JsonpOptions {
    pub fn new(callback: impl Into<String>) -> Self {
        Self {
            callback: callback.into(),
        }
    }
}

/// Converts a database cursor to documents, JSON or JSONP
///
/// The transformer is generic over the cursor, so it can own the cursor or,
/// with `C = &mut SomeCursor`, borrow one the caller keeps.
#[derive(Debug)]
pub struct CursorTransformer<C> {
    /// Active cursor
    cursor: Option<C>,

    /// Serializer for `to_json` / `to_jsonp`
    encoder: JsonEncoder,
}

impl<C: DocumentCursor> CursorTransformer<C> {
    /// Create a transformer with no cursor set
    pub fn new() -> Self {
        Self {
            cursor: None,
            encoder: JsonEncoder::default(),
        }
    }

    /// Create a transformer holding `cursor`
    pub fn with_cursor(cursor: C) -> Self {
        Self {
            cursor: Some(cursor),
            encoder: JsonEncoder::default(),
        }
    }

    /// Replace the JSON encoder
    pub fn with_encoder(mut self, encoder: JsonEncoder) -> Self {
        self.encoder = encoder;
        self
    }

    pub fn encoder(&self) -> &JsonEncoder {
        &self.encoder
    }

    /// Prepare a cursor for conversion
    ///
    /// `Some(cursor)` replaces the active cursor. `None` leaves the current
    /// one in place.
    pub fn convert(&mut self, cursor: Option<C>) -> &mut Self {
        match cursor {
            Some(cursor) => self.set_cursor(cursor),
            None => debug!("convert() called without a cursor, keeping the current one"),
        }
        self
    }

    /// Drain the active cursor
    ///
    /// A cursor whose `count()` is exactly one yields that document
    /// unwrapped as [`Converted::Single`]. Any other count drains the cursor
    /// into [`Converted::Many`].
    ///
    /// Cursors are single-pass: calling this again without a new cursor
    /// returns only what is left, normally nothing.
    pub fn to_array(&mut self) -> Result<Converted> {
        let cursor = self.cursor.as_mut().ok_or(TransformerError::NoCursor)?;

        if cursor.count()? == 1 {
            // Single-result queries are handed back as a bare document.
            return Ok(match cursor.next_document()? {
                Some(doc) => Converted::Single(doc),
                None => {
                    debug!("Single-result cursor already consumed");
                    Converted::Many(Vec::new())
                }
            });
        }

        let mut documents = Vec::new();
        while let Some(doc) = cursor.next_document()? {
            documents.push(doc);
        }

        debug!("Drained {} documents from cursor", documents.len());
        Ok(Converted::Many(documents))
    }

    /// Drain the active cursor and encode it as JSON
    pub fn to_json(&mut self) -> Result<String> {
        let converted = self.to_array()?;
        self.encoder.encode(&converted)
    }

    /// Drain the active cursor and encode it as `callback(<json>)`
    ///
    /// The callback is not escaped; see [`JsonpOptions::callback`].
    pub fn to_jsonp(&mut self, options: &JsonpOptions) -> Result<String> {
        let json = self.to_json()?;
        Ok(format!("{}({})", options.callback, json))
    }

    /// Currently held cursor
    pub fn get_cursor(&self) -> Option<&C> {
        self.cursor.as_ref()
    }

    pub fn get_cursor_mut(&mut self) -> Option<&mut C> {
        self.cursor.as_mut()
    }

    /// Replace the held cursor
    pub fn set_cursor(&mut self, cursor: C) {
        self.cursor = Some(cursor);
    }

    /// Remove and return the held cursor
    pub fn take_cursor(&mut self) -> Option<C> {
        self.cursor.take()
    }
}

impl<C: DocumentCursor> Default for CursorTransformer<C> {
    fn default() -> Self {
        Self::new()
    }
}
