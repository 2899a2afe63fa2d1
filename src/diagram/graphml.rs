//! yEd GraphML Reading
//!
//! Extracts nodes and edges from a yEd `.graphml` document. Only the parts the
//! class model needs are read: node ids, the entity shape marker with its
//! labels, and edge endpoints with their first label. Layout, styling and
//! everything else in the document is ignored.

use roxmltree::{Document, Node};

use super::{Diagram, DiagramEdge, DiagramNode};
use crate::config::InputConfig;
use crate::error::Result;

const GRAPHML_NS: &str = "http://graphml.graphdrawing.org/xmlns";
const YED_NS: &str = "http://www.yworks.com/xml/graphml";

/// Parse GraphML text into a flat diagram
///
/// Nested graphs are flattened: nodes inside group nodes are read like any
/// other node, and the group nodes themselves never carry the entity marker.
pub fn read_graphml(text: &str, config: &InputConfig) -> Result<Diagram> {
    let doc = Document::parse(text)?;
    let mut diagram = Diagram::default();

    for element in doc.descendants().filter(|n| n.is_element()) {
        if is_graphml(element, "node") {
            if let Some(node) = read_node(element, &config.entity_marker) {
                diagram.nodes.push(node);
            }
        } else if is_graphml(element, "edge") {
            if let Some(edge) = read_edge(element) {
                diagram.edges.push(edge);
            }
        }
    }

    Ok(diagram)
}

fn read_node(node: Node, entity_marker: &str) -> Option<DiagramNode> {
    let Some(id) = node.attribute("id") else {
        tracing::debug!(line = line_of(node), "skipping node without id");
        return None;
    };

    // Only the node's own <data> children; nested graphs hold their own nodes.
    let entity_shape = node
        .children()
        .filter(|c| is_graphml(*c, "data"))
        .flat_map(|data| data.children())
        .find(|c| is_yed(*c, "GenericNode") && c.attribute("configuration") == Some(entity_marker));

    let labels = entity_shape
        .map(|shape| {
            shape
                .children()
                .filter(|c| is_yed(*c, "NodeLabel"))
                .map(|label| label.text().unwrap_or("").to_string())
                .collect()
        })
        .unwrap_or_default();

    Some(DiagramNode {
        id: id.to_string(),
        entity: entity_shape.is_some(),
        labels,
    })
}

fn read_edge(edge: Node) -> Option<DiagramEdge> {
    let (Some(source), Some(target)) = (edge.attribute("source"), edge.attribute("target")) else {
        tracing::debug!(line = line_of(edge), "skipping edge without endpoints");
        return None;
    };

    let label = edge
        .descendants()
        .find(|d| is_yed(*d, "EdgeLabel"))
        .map(|l| l.text().unwrap_or("").to_string());

    Some(DiagramEdge {
        source: source.to_string(),
        target: target.to_string(),
        label,
    })
}

/// GraphML structural element (namespace-qualified or bare)
fn is_graphml(node: Node, local: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == local
        && matches!(node.tag_name().namespace(), None | Some(GRAPHML_NS))
}

/// yFiles extension element
fn is_yed(node: Node, local: &str) -> bool {
    node.is_element() && node.tag_name().name() == local && node.tag_name().namespace() == Some(YED_NS)
}

fn line_of(node: Node) -> u32 {
    node.document().text_pos_at(node.range().start).row
}
