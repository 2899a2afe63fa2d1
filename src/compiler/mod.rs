//! Schema Compilation
//!
//! Compiles a [`ClassModel`] into a JSON Schema document. Every class yields
//! two definitions:
//!
//! ```text
//! "C":  value definition
//!         literal class   -> {"type": "string"}
//!         composite class -> {"allOf": [{"$ref": super}..., {closed object shape}]}
//! "C_": one-or-many wrapper
//!         {"oneOf": [{"type": "array", "items": {"$ref": "#/$defs/C"}}, {"$ref": "#/$defs/C"}]}
//! ```
//!
//! followed by a union of all classes and an array-of-union root. Properties
//! with a single target type point at the target's wrapper; properties with
//! several target types get an explicit `oneOf` of single objects or an array
//! of any of them.
//!
//! Compilation cannot fail. Name collisions and inheritance cycles are
//! reported through `tracing` and compiled as-is.

pub mod document;

pub use document::SchemaDocument;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::BTreeSet;

use crate::model::analysis::{definition_collisions, ClassGraph};
use crate::model::{ClassModel, ClassName};

/// JSON pointer prefix of the definitions section
pub const DEFS_POINTER: &str = "#/$defs/";

/// Compiler settings
///
/// Defaults produce draft-06 output with JSON-LD `@id`/`@type` fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerConfig {
    /// Value of the `$schema` keyword
    #[serde(default = "default_schema_uri")]
    pub schema_uri: String,

    /// Definition name of the union of all classes
    #[serde(default = "default_union_name")]
    pub union_name: String,

    /// Appended to a class name to name its one-or-many wrapper
    #[serde(default = "default_wrapper_suffix")]
    pub wrapper_suffix: String,

    /// String fields every object shape declares
    #[serde(default = "default_identity_fields")]
    pub identity_fields: Vec<String>,

    /// Emit node annotations as `$comment`
    #[serde(default = "default_true")]
    pub emit_comments: bool,
}

fn default_schema_uri() -> String {
    "http://json-schema.org/draft-06/schema#".to_string()
}

fn default_union_name() -> String {
    "CSObject".to_string()
}

fn default_wrapper_suffix() -> String {
    "_".to_string()
}

fn default_identity_fields() -> Vec<String> {
    vec!["@id".to_string(), "@type".to_string()]
}

fn default_true() -> bool {
    true
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            schema_uri: default_schema_uri(),
            union_name: default_union_name(),
            wrapper_suffix: default_wrapper_suffix(),
            identity_fields: default_identity_fields(),
            emit_comments: true,
        }
    }
}

impl CompilerConfig {
    /// Definition name of a class's one-or-many wrapper
    pub fn wrapper_name(&self, class: &str) -> String {
        format!("{}{}", class, self.wrapper_suffix)
    }
}

/// `{"$ref": "#/$defs/<name>"}`
pub fn def_ref(name: &str) -> Value {
    json!({ "$ref": format!("{}{}", DEFS_POINTER, name) })
}

/// Compiles class models into schema documents
#[derive(Debug, Clone, Default)]
pub struct SchemaCompiler {
    config: CompilerConfig,
}

impl SchemaCompiler {
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Compile a class model
    pub fn compile(&self, model: &ClassModel) -> SchemaDocument {
        self.report_diagnostics(model);

        let mut defs = Map::new();
        for class in model.class_names() {
            defs.insert(class.clone(), self.value_definition(model, class));
            defs.insert(self.config.wrapper_name(class), self.wrapper_definition(class));
        }
        defs.insert(self.config.union_name.clone(), self.union_definition(model));

        tracing::debug!(classes = model.len(), definitions = defs.len(), "schema compiled");

        SchemaDocument::new(self.config.schema_uri.clone(), defs, def_ref(&self.config.union_name))
    }

    fn report_diagnostics(&self, model: &ClassModel) {
        if model.is_empty() {
            tracing::warn!("no entity classes found; the class union will be empty");
        }
        for collision in definition_collisions(model, &self.config) {
            tracing::warn!(definition = %collision.definition, "{}; the last one is kept", collision);
        }
        for cycle in ClassGraph::from_model(model).inheritance_cycles() {
            tracing::warn!(classes = ?cycle, "inheritance cycle: allOf references form a loop");
        }
    }

    /// Shape of one instance of a class
    pub fn value_definition(&self, model: &ClassModel, class: &str) -> Value {
        let mut def = Map::new();

        if self.config.emit_comments {
            if let Some(annotation) = model.annotation(class) {
                def.insert("$comment".to_string(), Value::String(annotation.to_string()));
            }
        }

        if model.is_literal(class) {
            def.insert("type".to_string(), json!("string"));
            return Value::Object(def);
        }

        let mut all_of: Vec<Value> = model
            .super_classes(class)
            .into_iter()
            .flatten()
            .map(|parent| def_ref(parent))
            .collect();
        all_of.push(self.object_shape(model, class));

        def.insert("allOf".to_string(), Value::Array(all_of));
        Value::Object(def)
    }

    /// Closed object: identity fields plus one field per declared property
    fn object_shape(&self, model: &ClassModel, class: &str) -> Value {
        let mut properties = Map::new();
        for field in &self.config.identity_fields {
            properties.insert(field.clone(), json!({ "type": "string" }));
        }
        for (property, targets) in model.properties(class).into_iter().flatten() {
            properties.insert(property.clone(), self.property_schema(targets));
        }

        json!({
            "type": "object",
            "properties": properties,
            "additionalProperties": false,
        })
    }

    /// Field schema for a property given its distinct target classes
    pub fn property_schema(&self, targets: &BTreeSet<ClassName>) -> Value {
        if targets.len() == 1 {
            if let Some(target) = targets.iter().next() {
                return def_ref(&self.config.wrapper_name(target));
            }
        }

        // Several target types: one object of any of them, or an array mixing them.
        // Per-type wrappers would also admit shapes like [A, A] | B in one branch.
        let refs: Vec<Value> = targets.iter().map(|t| def_ref(t)).collect();
        let mut one_of = refs.clone();
        one_of.push(json!({
            "type": "array",
            "items": { "oneOf": refs },
        }));
        json!({ "oneOf": one_of })
    }

    /// One instance or an array of instances of a class
    pub fn wrapper_definition(&self, class: &str) -> Value {
        json!({
            "oneOf": [
                { "type": "array", "items": def_ref(class) },
                def_ref(class),
            ]
        })
    }

    /// Any class
    pub fn union_definition(&self, model: &ClassModel) -> Value {
        let refs: Vec<Value> = model.class_names().map(|c| def_ref(c)).collect();
        json!({ "anyOf": refs })
    }
}
