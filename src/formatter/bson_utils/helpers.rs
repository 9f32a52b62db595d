//! Helper functions for BSON value conversion

use bson::{Binary, DateTime, Decimal128};

/// Convert DateTime to ISO 8601 string
///
/// Falls back to the raw millisecond timestamp for dates outside the range
/// RFC 3339 can represent.
pub fn datetime_to_iso_string(dt: &DateTime) -> String {
    dt.try_to_rfc3339_string()
        .unwrap_or_else(|_| format!("{}", dt.timestamp_millis()))
}

/// Convert Binary data to Base64 string
pub fn binary_to_base64(bin: &Binary) -> String {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD.encode(&bin.bytes)
}

/// Parse a Decimal128 into a JSON number when it has a finite f64 form
pub fn decimal_to_number(d: &Decimal128) -> Option<serde_json::Number> {
    d.to_string()
        .parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
}
