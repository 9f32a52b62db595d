//! Core converter traits for BSON value conversion
//!
//! This module defines the traits that all BSON-to-JSON converters implement.

use bson::{Binary, Bson, DateTime, Decimal128, Document, Regex, Timestamp, oid::ObjectId};
use serde_json::Value as JsonValue;

/// Core trait for BSON value conversion
///
/// Lets the JSON encoder switch between conversion strategies without
/// knowing which one is in use.
pub trait BsonConverter {
    /// Output type of the conversion
    type Output;

    /// Convert a BSON value to the output type
    fn convert(&self, value: &Bson) -> Self::Output;

    /// Convert a BSON document
    fn convert_document(&self, doc: &Document) -> Self::Output {
        self.convert(&Bson::Document(doc.clone()))
    }
}

/// Per-type hooks for JSON conversion
///
/// Scalars with a native JSON form are handled by the provided
/// [`convert_to_json`](BsonJsonConverter::convert_to_json); implementors only
/// decide how BSON-specific types are rendered.
pub trait BsonJsonConverter {
    fn convert_object_id(&self, oid: &ObjectId) -> JsonValue;
    fn convert_datetime(&self, dt: &DateTime) -> JsonValue;
    fn convert_decimal128(&self, d: &Decimal128) -> JsonValue;
    fn convert_binary(&self, bin: &Binary) -> JsonValue;
    fn convert_regex(&self, regex: &Regex) -> JsonValue;
    fn convert_timestamp(&self, ts: &Timestamp) -> JsonValue;

    /// Convert a BSON array element by element
    fn convert_array(&self, arr: &[Bson]) -> JsonValue {
        JsonValue::Array(arr.iter().map(|v| self.convert_to_json(v)).collect())
    }

    /// Convert a BSON document, keeping field order
    fn convert_document_to_json(&self, doc: &Document) -> JsonValue {
        let mut map = serde_json::Map::new();
        for (key, value) in doc.iter() {
            map.insert(key.clone(), self.convert_to_json(value));
        }
        JsonValue::Object(map)
    }

    /// Convert BSON value to JSON (provided implementation)
    fn convert_to_json(&self, value: &Bson) -> JsonValue {
        match value {
            Bson::String(s) => JsonValue::String(s.clone()),
            Bson::Int32(n) => JsonValue::Number((*n).into()),
            Bson::Int64(n) => JsonValue::Number((*n).into()),
            Bson::Double(f) => serde_json::Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Bson::Boolean(b) => JsonValue::Bool(*b),
            Bson::Null => JsonValue::Null,
            Bson::ObjectId(oid) => self.convert_object_id(oid),
            Bson::DateTime(dt) => self.convert_datetime(dt),
            Bson::Decimal128(d) => self.convert_decimal128(d),
            Bson::Array(arr) => self.convert_array(arr),
            Bson::Document(doc) => self.convert_document_to_json(doc),
            Bson::Binary(bin) => self.convert_binary(bin),
            Bson::RegularExpression(regex) => self.convert_regex(regex),
            Bson::Timestamp(ts) => self.convert_timestamp(ts),
            Bson::JavaScriptCode(code) => JsonValue::String(code.clone()),
            Bson::JavaScriptCodeWithScope(code) => {
                let mut map = serde_json::Map::new();
                map.insert("code".to_string(), JsonValue::String(code.code.clone()));
                map.insert("scope".to_string(), self.convert_document_to_json(&code.scope));
                JsonValue::Object(map)
            }
            Bson::Symbol(symbol) => JsonValue::String(symbol.clone()),
            Bson::Undefined => JsonValue::Null,
            Bson::MinKey => JsonValue::String("MinKey".to_string()),
            Bson::MaxKey => JsonValue::String("MaxKey".to_string()),
            // DbPointer has no plain JSON form
            other => other.clone().into_relaxed_extjson(),
        }
    }
}
