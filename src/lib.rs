//! Entity-Relationship Diagram to JSON Schema
//!
//! Translates yEd "Entity with Attributes" diagrams into a JSON Schema that
//! describes the same class hierarchy and accepts JSON-LD style objects.
//!
//! ## Pipeline
//!
//! ```text
//! .graphml / .json ──reader──▶ Diagram (nodes, edges)
//!                  ──ModelBuilder──▶ ClassModel (classes, superclasses, properties)
//!                  ──SchemaCompiler──▶ SchemaDocument ($defs + array-of-union root)
//!                  ──output──▶ <input>_schema.json
//! ```
//!
//! ## Translation rules
//!
//! - A class with superclasses `S1..Sn` and properties becomes
//!   `allOf: [$ref S1, ..., {closed object with @id, @type and the properties}]`.
//! - A class with no superclass and no property is a literal: `{"type": "string"}`.
//! - Every class `C` also gets `C_`, accepting one `C` or an array of `C`.
//! - `CSObject` is the union of all classes; the document root is an array of it.

pub mod compiler;
pub mod config;
pub mod diagram;
pub mod error;
pub mod model;
pub mod output;
pub mod translate;

pub use compiler::{CompilerConfig, SchemaCompiler, SchemaDocument};
pub use config::{OutputFormat, TranslatorConfig};
pub use diagram::{read_diagram, read_graphml, Diagram, DiagramEdge, DiagramNode};
pub use error::{Result, TranslateError};
pub use model::{sanitize, ClassGraph, ClassModel, ModelBuilder, ModelStats};
pub use output::{discover_inputs, output_path_for, write_document};
pub use translate::{translate, translate_file, Translation};
