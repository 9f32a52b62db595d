//! Strategy implementations for BSON-to-JSON conversion
//!
//! - SimplifiedJsonConverter: plain JSON types, readable but lossy
//! - ExtendedJsonConverter: MongoDB Extended JSON, relaxed or canonical

use bson::{Binary, Bson, DateTime, Decimal128, Regex, Timestamp, oid::ObjectId};
use serde_json::Value as JsonValue;

use super::converter::{BsonConverter, BsonJsonConverter};
use super::helpers::*;

/// Converter that maps BSON types onto plain JSON values
///
/// ObjectIds become hex strings, dates become RFC 3339 strings and 64-bit
/// integers become plain numbers, so the output carries no `$`-prefixed
/// wrappers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimplifiedJsonConverter;

impl SimplifiedJsonConverter {
    pub fn new() -> Self {
        Self
    }
}

impl BsonConverter for SimplifiedJsonConverter {
    type Output = JsonValue;

    fn convert(&self, value: &Bson) -> JsonValue {
        self.convert_to_json(value)
    }
}

impl BsonJsonConverter for SimplifiedJsonConverter {
    fn convert_object_id(&self, oid: &ObjectId) -> JsonValue {
        JsonValue::String(oid.to_hex())
    }

    fn convert_datetime(&self, dt: &DateTime) -> JsonValue {
        JsonValue::String(datetime_to_iso_string(dt))
    }

    fn convert_decimal128(&self, d: &Decimal128) -> JsonValue {
        decimal_to_number(d)
            .map(JsonValue::Number)
            .unwrap_or_else(|| JsonValue::String(d.to_string()))
    }

    fn convert_binary(&self, bin: &Binary) -> JsonValue {
        JsonValue::String(binary_to_base64(bin))
    }

    fn convert_regex(&self, regex: &Regex) -> JsonValue {
        JsonValue::String(format!("/{}/{}", regex.pattern, regex.options))
    }

    fn convert_timestamp(&self, ts: &Timestamp) -> JsonValue {
        serde_json::json!({ "t": ts.time, "i": ts.increment })
    }
}

/// Converter producing MongoDB Extended JSON
#[derive(Debug, Clone, Copy)]
pub struct ExtendedJsonConverter {
    /// Canonical (type-preserving) instead of relaxed output
    canonical: bool,
}

impl ExtendedJsonConverter {
    /// Relaxed Extended JSON: native JSON numbers where lossless
    pub fn relaxed() -> Self {
        Self { canonical: false }
    }

    /// Canonical Extended JSON: every numeric type keeps its wrapper
    pub fn canonical() -> Self {
        Self { canonical: true }
    }

    pub fn is_canonical(&self) -> bool {
        self.canonical
    }
}

impl Default for ExtendedJsonConverter {
    fn default() -> Self {
        Self::relaxed()
    }
}

impl BsonConverter for ExtendedJsonConverter {
    type Output = JsonValue;

    fn convert(&self, value: &Bson) -> JsonValue {
        if self.canonical {
            value.clone().into_canonical_extjson()
        } else {
            value.clone().into_relaxed_extjson()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::{JavaScriptCodeWithScope, doc, spec::BinarySubtype};
    use serde_json::json;

    #[test]
    fn test_simplified_scalars() {
        let converter = SimplifiedJsonConverter::new();

        assert_eq!(converter.convert(&Bson::String("test".into())), json!("test"));
        assert_eq!(converter.convert(&Bson::Int32(42)), json!(42));
        assert_eq!(converter.convert(&Bson::Int64(100)), json!(100));
        assert_eq!(converter.convert(&Bson::Boolean(true)), json!(true));
        assert_eq!(converter.convert(&Bson::Null), JsonValue::Null);
        assert_eq!(converter.convert(&Bson::Double(f64::NAN)), JsonValue::Null);
    }

    #[test]
    fn test_simplified_object_id_and_date() {
        let converter = SimplifiedJsonConverter::new();
        let oid = ObjectId::parse_str("65705d84dfc3f3b5094e1f72").unwrap();
        let doc = doc! {
            "_id": oid,
            "created": DateTime::from_millis(1701862788373),
        };

        let value = converter.convert_document(&doc);
        assert_eq!(value["_id"], json!("65705d84dfc3f3b5094e1f72"));
        assert!(value["created"].as_str().unwrap().starts_with("2023-12-06"));
    }

    #[test]
    fn test_simplified_binary_regex_and_keys() {
        let converter = SimplifiedJsonConverter::new();
        let doc = doc! {
            "bin": Bson::Binary(Binary { subtype: BinarySubtype::Generic, bytes: vec![1, 2, 3] }),
            "re": Bson::RegularExpression(Regex { pattern: "^a".to_string(), options: "i".to_string() }),
            "min": Bson::MinKey,
        };

        let value = converter.convert_document(&doc);
        assert_eq!(value, json!({ "bin": "AQID", "re": "/^a/i", "min": "MinKey" }));
    }

    #[test]
    fn test_simplified_timestamps_stay_distinct() {
        let converter = SimplifiedJsonConverter::new();
        let a = converter.convert(&Bson::Timestamp(Timestamp { time: 1, increment: 1000 }));
        let b = converter.convert(&Bson::Timestamp(Timestamp { time: 2, increment: 0 }));

        assert_ne!(a, b);
        assert_eq!(a, json!({ "t": 1, "i": 1000 }));
    }

    #[test]
    fn test_simplified_code_and_symbols_are_plain() {
        let converter = SimplifiedJsonConverter::new();
        let doc = doc! {
            "code": Bson::JavaScriptCode("function() { return 1; }".to_string()),
            "scoped": Bson::JavaScriptCodeWithScope(JavaScriptCodeWithScope {
                code: "x + 1".to_string(),
                scope: doc! { "x": 2 },
            }),
            "sym": Bson::Symbol("tag".to_string()),
            "undef": Bson::Undefined,
        };

        let value = converter.convert_document(&doc);
        assert_eq!(
            value,
            json!({
                "code": "function() { return 1; }",
                "scoped": { "code": "x + 1", "scope": { "x": 2 } },
                "sym": "tag",
                "undef": null,
            })
        );
        assert!(!value.to_string().contains("JavaScriptCode("));
    }

    #[test]
    fn test_simplified_nested_order_preserved() {
        let converter = SimplifiedJsonConverter::new();
        let doc = doc! { "z": 1, "a": [1, { "b": 2 }] };

        let value = converter.convert_document(&doc);
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a"]);
        assert_eq!(value["a"], json!([1, { "b": 2 }]));
    }

    #[test]
    fn test_relaxed_extended_json() {
        let converter = ExtendedJsonConverter::relaxed();
        let oid = ObjectId::parse_str("65705d84dfc3f3b5094e1f72").unwrap();
        let doc = doc! { "_id": oid, "n": 1 };

        let value = converter.convert_document(&doc);
        assert_eq!(
            value,
            json!({ "_id": { "$oid": "65705d84dfc3f3b5094e1f72" }, "n": 1 })
        );
    }

    #[test]
    fn test_canonical_extended_json() {
        let converter = ExtendedJsonConverter::canonical();
        assert!(converter.is_canonical());

        let value = converter.convert_document(&doc! { "n": 1, "l": 2i64 });
        assert_eq!(
            value,
            json!({ "n": { "$numberInt": "1" }, "l": { "$numberLong": "2" } })
        );
    }
}
