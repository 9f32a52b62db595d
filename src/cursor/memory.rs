//! In-memory cursor over BSON documents

use std::collections::VecDeque;
use std::io::BufRead;

use bson::{Bson, Document};
use futures::{TryStream, TryStreamExt};
use serde_json::Value as JsonValue;
use tracing::debug;

use super::DocumentCursor;
use crate::error::{Result, TransformerError};

/// Single-pass cursor backed by a buffer of documents
///
/// `count()` keeps reporting the number of documents the cursor was built
/// with, the same way a driver cursor reports its matched count regardless of
/// how much of it has been read.
#[derive(Debug, Clone, Default)]
pub struct MemoryCursor {
    /// Documents not yet handed out
    documents: VecDeque<Document>,

    /// Size of the full result set
    matched: u64,
}

impl MemoryCursor {
    /// Create a cursor over the given documents, in order
    pub fn from_documents(documents: Vec<Document>) -> Self {
        let matched = documents.len() as u64;
        Self {
            documents: documents.into(),
            matched,
        }
    }

    /// Parse a JSON array of Extended JSON documents
    ///
    /// # Arguments
    /// * `input` - JSON text whose top-level value is an array of objects
    ///
    /// # Returns
    /// * `Result<Self>` - Cursor over the parsed documents, or `InvalidCursor`
    pub fn from_json_array(input: &str) -> Result<Self> {
        let value: JsonValue = serde_json::from_str(input)
            .map_err(|e| TransformerError::InvalidCursor(format!("malformed JSON: {e}")))?;

        let JsonValue::Array(items) = value else {
            return Err(TransformerError::InvalidCursor(
                "expected a JSON array of documents".to_string(),
            ));
        };

        let documents = items
            .into_iter()
            .enumerate()
            .map(|(i, item)| document_from_json(item, &format!("element {i}")))
            .collect::<Result<Vec<_>>>()?;

        debug!("Parsed {} documents from JSON array", documents.len());
        Ok(Self::from_documents(documents))
    }

    /// Parse JSON Lines input, one Extended JSON document per line
    ///
    /// Blank lines are skipped.
    pub fn from_json_lines<R: BufRead>(reader: R) -> Result<Self> {
        let mut documents = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let position = format!("line {}", index + 1);
            let value: JsonValue = serde_json::from_str(trimmed)
                .map_err(|e| TransformerError::InvalidCursor(format!("{position}: {e}")))?;
            documents.push(document_from_json(value, &position)?);
        }

        debug!("Parsed {} documents from JSON Lines", documents.len());
        Ok(Self::from_documents(documents))
    }

    /// Drain a MongoDB driver cursor into memory
    ///
    /// The caller opens the driver cursor; errors it raises while iterating
    /// are returned as-is.
    pub async fn buffer(cursor: mongodb::Cursor<Document>) -> Result<Self> {
        let documents = drain_stream(cursor).await?;

        debug!("Buffered {} documents from driver cursor", documents.len());
        Ok(Self::from_documents(documents))
    }

    /// Number of documents not yet iterated
    pub fn remaining(&self) -> usize {
        self.documents.len()
    }

    /// Consume the cursor, returning the documents not yet iterated
    pub fn into_documents(self) -> Vec<Document> {
        self.documents.into()
    }

    /// Iterate the remaining documents, advancing this cursor
    ///
    /// Documents taken through the iterator are gone from the cursor;
    /// `count()` is unaffected.
    pub fn documents(&mut self) -> Documents<'_> {
        Documents { cursor: self }
    }
}

/// Borrowing iterator over a [`MemoryCursor`], see [`MemoryCursor::documents`]
#[derive(Debug)]
pub struct Documents<'a> {
    cursor: &'a mut MemoryCursor,
}

impl Iterator for Documents<'_> {
    type Item = Document;

    fn next(&mut self) -> Option<Document> {
        self.cursor.documents.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cursor.documents.len();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Documents<'_> {}

// No `impl Iterator for MemoryCursor`: `Iterator::count(self)` would shadow
// `DocumentCursor::count`.
impl IntoIterator for MemoryCursor {
    type Item = Document;
    type IntoIter = std::collections::vec_deque::IntoIter<Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.into_iter()
    }
}

impl<'a> IntoIterator for &'a mut MemoryCursor {
    type Item = Document;
    type IntoIter = Documents<'a>;

    fn into_iter(self) -> Documents<'a> {
        self.documents()
    }
}

impl DocumentCursor for MemoryCursor {
    fn count(&self) -> Result<u64> {
        Ok(self.matched)
    }

    fn next_document(&mut self) -> Result<Option<Document>> {
        Ok(self.documents.pop_front())
    }
}

impl From<Vec<Document>> for MemoryCursor {
    fn from(documents: Vec<Document>) -> Self {
        Self::from_documents(documents)
    }
}

/// Collect every document a fallible stream yields, stopping at the first error
async fn drain_stream<S, E>(mut stream: S) -> Result<Vec<Document>>
where
    S: TryStream<Ok = Document, Error = E> + Unpin,
    E: Into<TransformerError>,
{
    let mut documents = Vec::new();

    while let Some(doc) = stream.try_next().await.map_err(Into::into)? {
        documents.push(doc);
    }

    Ok(documents)
}

/// Decode one Extended JSON value, requiring it to be a document
fn document_from_json(value: JsonValue, position: &str) -> Result<Document> {
    match Bson::try_from(value) {
        Ok(Bson::Document(doc)) => Ok(doc),
        Ok(other) => Err(TransformerError::InvalidCursor(format!(
            "{position} is not a document (found {:?})",
            other.element_type()
        ))),
        Err(e) => Err(TransformerError::InvalidCursor(format!("{position}: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::{doc, oid::ObjectId};
    use std::io::Cursor;

    #[test]
    fn test_count_survives_iteration() {
        let mut cursor = MemoryCursor::from_documents(vec![doc! { "a": 1 }, doc! { "a": 2 }]);

        assert_eq!(cursor.count().unwrap(), 2);
        while cursor.next_document().unwrap().is_some() {}

        assert_eq!(cursor.remaining(), 0);
        assert_eq!(cursor.count().unwrap(), 2);
    }

    #[test]
    fn test_into_documents_returns_unread_tail() {
        let mut cursor =
            MemoryCursor::from(vec![doc! { "n": 1 }, doc! { "n": 2 }, doc! { "n": 3 }]);
        cursor.next_document().unwrap();

        let numbers: Vec<i32> = cursor
            .into_documents()
            .iter()
            .map(|d| d.get_i32("n").unwrap())
            .collect();
        assert_eq!(numbers, vec![2, 3]);
    }

    #[test]
    fn test_from_json_lines_skips_blank_lines() {
        let input = "{\"a\": 1}\n\n   \n{\"a\": 2}\n";
        let mut cursor = MemoryCursor::from_json_lines(Cursor::new(input)).unwrap();

        assert_eq!(cursor.count().unwrap(), 2);
        assert_eq!(cursor.next_document().unwrap(), Some(doc! { "a": 1 }));
        assert_eq!(cursor.next_document().unwrap(), Some(doc! { "a": 2 }));
    }

    #[test]
    fn test_from_json_lines_decodes_extended_json() {
        let input = r#"{"_id": {"$oid": "65705d84dfc3f3b5094e1f72"}, "n": {"$numberLong": "7"}}"#;
        let mut cursor = MemoryCursor::from_json_lines(Cursor::new(input)).unwrap();
        let doc = cursor.next_document().unwrap().unwrap();

        let oid = ObjectId::parse_str("65705d84dfc3f3b5094e1f72").unwrap();
        assert_eq!(doc.get("_id"), Some(&Bson::ObjectId(oid)));
        assert_eq!(doc.get("n"), Some(&Bson::Int64(7)));
    }

    #[test]
    fn test_from_json_lines_rejects_non_documents() {
        let input = "{\"a\": 1}\n[1, 2]\n";
        let err = MemoryCursor::from_json_lines(Cursor::new(input)).unwrap_err();

        match err {
            TransformerError::InvalidCursor(msg) => assert!(msg.starts_with("line 2")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_from_json_lines_rejects_malformed_line() {
        let err = MemoryCursor::from_json_lines(Cursor::new("{\"a\": ")).unwrap_err();
        assert!(matches!(err, TransformerError::InvalidCursor(_)));
    }

    #[test]
    fn test_from_json_array() {
        let mut cursor = MemoryCursor::from_json_array(r#"[{"a": 1}, {"b": "x"}]"#).unwrap();
        assert_eq!(cursor.count().unwrap(), 2);
        assert_eq!(cursor.next_document().unwrap(), Some(doc! { "a": 1 }));
        assert_eq!(cursor.next_document().unwrap(), Some(doc! { "b": "x" }));
    }

    #[test]
    fn test_from_json_array_requires_array() {
        let err = MemoryCursor::from_json_array(r#"{"a": 1}"#).unwrap_err();
        assert!(matches!(err, TransformerError::InvalidCursor(_)));

        let err = MemoryCursor::from_json_array(r#"[{"a": 1}, 5]"#).unwrap_err();
        match err {
            TransformerError::InvalidCursor(msg) => assert!(msg.contains("element 1")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_iterating_partly_consumed_cursor_keeps_count() {
        let mut cursor =
            MemoryCursor::from_documents(vec![doc! { "n": 1 }, doc! { "n": 2 }, doc! { "n": 3 }]);
        cursor.next_document().unwrap();

        let first: Vec<Document> = cursor.documents().take(1).collect();
        assert_eq!(first, vec![doc! { "n": 2 }]);
        assert_eq!(cursor.documents().len(), 1);

        let mut rest = Vec::new();
        for doc in &mut cursor {
            rest.push(doc);
        }
        assert_eq!(rest, vec![doc! { "n": 3 }]);

        assert_eq!(cursor.remaining(), 0);
        assert_eq!(cursor.count().unwrap(), 3);
    }

    #[test]
    fn test_owned_into_iter() {
        let cursor = MemoryCursor::from_documents(vec![doc! { "a": 1 }, doc! { "a": 2 }]);
        let docs: Vec<Document> = cursor.into_iter().collect();
        assert_eq!(docs, vec![doc! { "a": 1 }, doc! { "a": 2 }]);
    }

    #[test]
    fn test_drain_stream_keeps_order() {
        let stream = futures::stream::iter(vec![
            Ok::<_, std::io::Error>(doc! { "n": 1 }),
            Ok(doc! { "n": 2 }),
        ]);

        let docs = tokio_test::block_on(drain_stream(stream)).unwrap();
        assert_eq!(docs, vec![doc! { "n": 1 }, doc! { "n": 2 }]);
    }

    #[test]
    fn test_drain_stream_propagates_first_error() {
        let stream = futures::stream::iter(vec![
            Ok(doc! { "n": 1 }),
            Err(std::io::Error::other("connection reset")),
            Ok(doc! { "n": 2 }),
        ]);

        let err = tokio_test::block_on(drain_stream(stream)).unwrap_err();
        match err {
            TransformerError::Io(e) => assert_eq!(e.to_string(), "connection reset"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_cursor() {
        let mut cursor = MemoryCursor::default();
        assert_eq!(cursor.count().unwrap(), 0);
        assert_eq!(cursor.next_document().unwrap(), None);
    }
}
