//! Output formatting for converted cursor results
//!
//! - `json`: the JSON encoder used by `to_json` / `to_jsonp`
//! - `bson_utils`: BSON to JSON conversion strategies

pub mod bson_utils;
pub mod json;

pub use json::JsonEncoder;
