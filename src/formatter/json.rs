//! JSON encoding for transformer results
//!
//! This module turns converted cursor results into JSON text:
//! - Relaxed / canonical Extended JSON or simplified JSON values
//! - Compact (default) or pretty-printed output with a custom indent
//! - Optional color highlighting for pretty output

use bson::Document;
use colored_json::prelude::*;
use serde_json::Value as JsonValue;

use super::bson_utils::{BsonConverter, ExtendedJsonConverter, SimplifiedJsonConverter};
use crate::config::{JsonMode, OutputConfig};
use crate::error::{Result, TransformerError};
use crate::transformer::Converted;

/// Serializer used by `to_json` and `to_jsonp`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonEncoder {
    /// BSON to JSON mapping
    mode: JsonMode,

    /// Enable pretty printing
    pretty: bool,

    /// Indentation width
    indent: usize,

    /// Enable colored output (pretty output only)
    use_colors: bool,
}

impl JsonEncoder {
    /// Create a new encoder
    ///
    /// # Arguments
    /// * `mode` - How BSON types are mapped to JSON
    /// * `pretty` - Enable pretty printing
    /// * `indent` - Spaces per indentation level when pretty printing
    pub fn new(mode: JsonMode, pretty: bool, indent: usize) -> Self {
        Self {
            mode,
            pretty,
            indent,
            use_colors: false,
        }
    }

    /// Compact relaxed Extended JSON
    pub fn compact() -> Self {
        Self::new(JsonMode::Relaxed, false, 2)
    }

    /// Build an encoder from output settings
    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(config.mode, config.pretty, config.indent).with_colors(config.color)
    }

    /// Enable or disable ANSI colors
    ///
    /// Colors only apply to pretty output, and only when stdout is a terminal.
    /// Compact output stays plain for piping and for JSONP payloads.
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn mode(&self) -> JsonMode {
        self.mode
    }

    pub fn is_pretty(&self) -> bool {
        self.pretty
    }

    /// Map a converted result to a JSON value
    ///
    /// `Single` becomes an object and `Many` becomes an array.
    pub fn to_value(&self, converted: &Converted) -> JsonValue {
        match converted {
            Converted::Single(doc) => self.document_value(doc),
            Converted::Many(docs) => {
                JsonValue::Array(docs.iter().map(|doc| self.document_value(doc)).collect())
            }
        }
    }

    /// Encode a converted result as JSON text
    pub fn encode(&self, converted: &Converted) -> Result<String> {
        self.render(&self.to_value(converted))
    }

    /// Encode a single document as a JSON object
    pub fn encode_document(&self, doc: &Document) -> Result<String> {
        self.render(&self.document_value(doc))
    }

    fn document_value(&self, doc: &Document) -> JsonValue {
        match self.mode {
            JsonMode::Relaxed => ExtendedJsonConverter::relaxed().convert_document(doc),
            JsonMode::Canonical => ExtendedJsonConverter::canonical().convert_document(doc),
            JsonMode::Simplified => SimplifiedJsonConverter::new().convert_document(doc),
        }
    }

    fn render(&self, value: &JsonValue) -> Result<String> {
        if !self.pretty {
            return Ok(serde_json::to_string(value)?);
        }

        let json_str = self.to_pretty_string(value)?;
        if self.use_colors {
            Ok(json_str.to_colored_json_auto().unwrap_or(json_str))
        } else {
            Ok(json_str)
        }
    }

    /// Pretty-print with the configured indentation
    fn to_pretty_string<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        let mut buf = Vec::new();
        let indent = " ".repeat(self.indent);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        value.serialize(&mut ser)?;
        String::from_utf8(buf).map_err(|e| TransformerError::Generic(e.to_string()))
    }
}

impl Default for JsonEncoder {
    fn default() -> Self {
        Self::compact()
    }
}
