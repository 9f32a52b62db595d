//! Cursor abstraction consumed by the transformer
//!
//! A cursor is anything that can report how many documents its query matched
//! and hand those documents out one at a time, once. Database drivers plug in
//! by implementing [`DocumentCursor`]; [`MemoryCursor`] is the in-memory
//! implementation used for buffered driver results and JSON input.

mod memory;

pub use memory::{Documents, MemoryCursor};

use bson::Document;

use crate::error::Result;

/// Count-capable, single-pass source of documents
pub trait DocumentCursor {
    /// Number of documents the underlying query matched.
    ///
    /// This is independent of iteration progress: a drained cursor still
    /// reports the size of its full result set.
    fn count(&self) -> Result<u64>;

    /// Advance the cursor and return the next document, or `None` once the
    /// cursor is exhausted.
    fn next_document(&mut self) -> Result<Option<Document>>;
}

impl<C: DocumentCursor + ?Sized> DocumentCursor for &mut C {
    fn count(&self) -> Result<u64> {
        (**self).count()
    }

    fn next_document(&mut self) -> Result<Option<Document>> {
        (**self).next_document()
    }
}

impl<C: DocumentCursor + ?Sized> DocumentCursor for Box<C> {
    fn count(&self) -> Result<u64> {
        (**self).count()
    }

    fn next_document(&mut self) -> Result<Option<Document>> {
        (**self).next_document()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    fn first_of<C: DocumentCursor>(mut cursor: C) -> (u64, Option<Document>) {
        let count = cursor.count().unwrap();
        (count, cursor.next_document().unwrap())
    }

    #[test]
    fn test_borrowed_cursor_advances_owner() {
        let mut cursor = MemoryCursor::from_documents(vec![doc! { "a": 1 }, doc! { "a": 2 }]);

        let (count, first) = first_of(&mut cursor);
        assert_eq!(count, 2);
        assert_eq!(first, Some(doc! { "a": 1 }));

        assert_eq!(cursor.remaining(), 1);
    }

    #[test]
    fn test_boxed_trait_object() {
        let mut cursor: Box<dyn DocumentCursor> =
            Box::new(MemoryCursor::from_documents(vec![doc! { "x": true }]));

        assert_eq!(cursor.count().unwrap(), 1);
        assert_eq!(cursor.next_document().unwrap(), Some(doc! { "x": true }));
        assert_eq!(cursor.next_document().unwrap(), None);
    }
}
