//! Diagram Input
//!
//! Flat node/edge records handed to the model builder. How they are produced
//! (yEd GraphML, a pre-extracted JSON list, a test fixture) does not matter to
//! the rest of the pipeline.

pub mod graphml;

pub use graphml::read_graphml;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::config::InputConfig;
use crate::error::Result;

/// A diagram node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramNode {
    /// Node identifier, unique within the diagram
    pub id: String,
    /// Whether the node carries the entity marker
    #[serde(default)]
    pub entity: bool,
    /// Text labels in document order: class name, then optional annotation
    #[serde(default)]
    pub labels: Vec<String>,
}

impl DiagramNode {
    /// Entity node with the given labels
    pub fn entity<I, S>(id: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            entity: true,
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Node without the entity marker (free text, group box, ...)
    pub fn plain(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            entity: false,
            labels: Vec::new(),
        }
    }
}

/// A diagram edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramEdge {
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl DiagramEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>, label: Option<&str>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            label: label.map(str::to_string),
        }
    }

    pub fn labeled(source: impl Into<String>, target: impl Into<String>, label: &str) -> Self {
        Self::new(source, target, Some(label))
    }
}

/// Everything a reader extracted from one diagram
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagram {
    #[serde(default)]
    pub nodes: Vec<DiagramNode>,
    #[serde(default)]
    pub edges: Vec<DiagramEdge>,
}

impl Diagram {
    /// Parse a pre-extracted `{"nodes": [...], "edges": [...]}` document
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn entity_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.entity).count()
    }
}

/// Read a diagram file, choosing the reader by extension
///
/// `.json` files are node/edge lists; anything else is treated as GraphML.
pub fn read_diagram(path: &Path, config: &InputConfig) -> Result<Diagram> {
    let content = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let diagram = if is_json {
        Diagram::from_json(&content)?
    } else {
        read_graphml(&content, config)?
    };

    tracing::debug!(
        path = %path.display(),
        nodes = diagram.nodes.len(),
        entities = diagram.entity_count(),
        edges = diagram.edges.len(),
        "diagram read"
    );
    Ok(diagram)
}
