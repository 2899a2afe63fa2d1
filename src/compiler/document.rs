//! Compiled schema document

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::config::OutputFormat;
use crate::error::Result;

/// A compiled JSON Schema: definitions plus an array-of-union root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// Dialect URI (`$schema`)
    #[serde(rename = "$schema")]
    pub schema: String,

    /// Definitions keyed by name (`$defs`)
    #[serde(rename = "$defs")]
    pub defs: Map<String, Value>,

    /// Root type, always `"array"`
    #[serde(rename = "type")]
    pub root_type: String,

    /// Root item schema, a reference to the class union
    pub items: Value,
}

impl SchemaDocument {
    pub fn new(schema: String, defs: Map<String, Value>, items: Value) -> Self {
        Self {
            schema,
            defs,
            root_type: "array".to_string(),
            items,
        }
    }

    /// Look up a definition by name
    pub fn definition(&self, name: &str) -> Option<&Value> {
        self.defs.get(name)
    }

    /// The document as a plain JSON value
    pub fn to_value(&self) -> Value {
        json!({
            "$schema": self.schema,
            "$defs": self.defs,
            "type": self.root_type,
            "items": self.items,
        })
    }

    /// Serialize to text, newline-terminated
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        let mut text = match format {
            OutputFormat::Pretty => serde_json::to_string_pretty(self)?,
            OutputFormat::Compact => serde_json::to_string(self)?,
        };
        text.push('\n');
        Ok(text)
    }
}
