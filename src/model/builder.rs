//! Model Building
//!
//! Two passes over the diagram: nodes first, to learn which node ids are
//! classes, then edges, which are only meaningful once both endpoints are
//! known. Anything that is not an entity-to-entity edge is dropped without
//! error; diagrams routinely contain notes and decorations.

use std::collections::HashMap;

use super::names::{is_subclass_label, property_name, sanitize, Restriction};
use super::{ClassModel, ClassName};
use crate::diagram::{Diagram, DiagramEdge, DiagramNode};

/// Builds a [`ClassModel`] from diagram nodes and edges
pub struct ModelBuilder {
    model: ClassModel,
    /// node id -> class name
    class_of_node: HashMap<String, ClassName>,
    dropped_edges: usize,
}

impl ModelBuilder {
    /// Build the model from nodes and edges
    pub fn build(nodes: &[DiagramNode], edges: &[DiagramEdge]) -> ClassModel {
        let mut builder = Self {
            model: ClassModel::default(),
            class_of_node: HashMap::with_capacity(nodes.len()),
            dropped_edges: 0,
        };

        for node in nodes {
            builder.add_node(node);
        }
        for edge in edges {
            builder.add_edge(edge);
        }

        tracing::info!(
            classes = builder.model.len(),
            edges = edges.len(),
            dropped_edges = builder.dropped_edges,
            "class model built"
        );
        builder.model
    }

    /// Build the model from everything a reader extracted
    pub fn from_diagram(diagram: &Diagram) -> ClassModel {
        Self::build(&diagram.nodes, &diagram.edges)
    }

    fn add_node(&mut self, node: &DiagramNode) {
        if !node.entity {
            return;
        }
        let Some(label) = node.labels.first() else {
            tracing::debug!(node = %node.id, "entity node without label");
            return;
        };
        // Only an empty name is unusable; whitespace still sanitizes to a referenceable name.
        if label.is_empty() {
            tracing::debug!(node = %node.id, "entity node with empty name");
            return;
        }

        let class = sanitize(label);
        if let Some(annotation) = node.labels.get(1).filter(|a| !a.trim().is_empty()) {
            // Nodes that sanitize to the same class share one annotation slot; last one wins.
            self.model.annotations.insert(class.clone(), annotation.clone());
        }
        self.model.class_names.insert(class.clone());
        self.class_of_node.insert(node.id.clone(), class);
    }

    fn add_edge(&mut self, edge: &DiagramEdge) {
        let (Some(source), Some(target)) = (
            self.class_of_node.get(&edge.source),
            self.class_of_node.get(&edge.target),
        ) else {
            tracing::debug!(
                source = %edge.source,
                target = %edge.target,
                label = edge.label.as_deref().unwrap_or(""),
                "edge between non-class nodes"
            );
            self.dropped_edges += 1;
            return;
        };

        let (property, restriction) = property_name(edge.label.as_deref());

        if is_subclass_label(&property) {
            self.model
                .super_classes
                .entry(source.clone())
                .or_default()
                .insert(target.clone());
            return;
        }

        self.model
            .properties
            .entry(source.clone())
            .or_default()
            .entry(property.clone())
            .or_default()
            .insert(target.clone());

        let recorded = self
            .model
            .restrictions
            .entry(source.clone())
            .or_default()
            .entry(property)
            .or_insert(restriction);
        if restriction == Restriction::SomeValuesFrom {
            *recorded = Restriction::SomeValuesFrom;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UNDEF_PROPERTY;

    fn class_set(names: &[&str]) -> std::collections::BTreeSet<ClassName> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_entity_becomes_literal_class() {
        let model = ModelBuilder::build(&[DiagramNode::entity("n0", ["Person"])], &[]);
        assert!(model.contains("Person"));
        assert_eq!(model.len(), 1);
        assert!(model.is_literal("Person"));
        assert_eq!(model.annotation("Person"), None);
    }

    #[test]
    fn test_non_entity_and_unlabeled_nodes_are_skipped() {
        let nodes = vec![
            DiagramNode::plain("note"),
            DiagramNode::entity("empty", Vec::<String>::new()),
            DiagramNode::entity("blank", [""]),
            DiagramNode::entity("n0", ["Book"]),
        ];
        let model = ModelBuilder::build(&nodes, &[]);
        assert_eq!(model.class_names().collect::<Vec<_>>(), vec!["Book"]);
    }

    #[test]
    fn test_whitespace_name_is_a_class() {
        let nodes = vec![
            DiagramNode::entity("ws", ["  "]),
            DiagramNode::entity("b", ["Book"]),
        ];
        let edges = vec![DiagramEdge::labeled("b", "ws", "shelf")];
        let model = ModelBuilder::build(&nodes, &edges);

        assert_eq!(model.class_names().collect::<Vec<_>>(), vec!["Book", "__"]);
        assert!(model.properties("Book").unwrap()["shelf"].contains("__"));
        assert!(model.is_literal("__"));
    }

    #[test]
    fn test_property_edge() {
        let nodes = vec![
            DiagramNode::entity("b", ["Book"]),
            DiagramNode::entity("a", ["Author"]),
        ];
        let edges = vec![DiagramEdge::labeled("b", "a", "author")];
        let model = ModelBuilder::build(&nodes, &edges);

        let props = model.properties("Book").unwrap();
        assert_eq!(props.get("author"), Some(&class_set(&["Author"])));
        assert!(model.super_classes("Book").is_none());
        assert!(model.is_literal("Author"));
    }

    #[test]
    fn test_subclass_edge_is_case_insensitive() {
        let nodes = vec![
            DiagramNode::entity("s", ["Student"]),
            DiagramNode::entity("p", ["Person"]),
            DiagramNode::entity("e", ["Employee"]),
        ];
        let edges = vec![
            DiagramEdge::labeled("s", "p", "subClassOf"),
            DiagramEdge::labeled("e", "p", "SUBCLASSOF"),
        ];
        let model = ModelBuilder::build(&nodes, &edges);

        assert_eq!(model.super_classes("Student"), Some(&class_set(&["Person"])));
        assert_eq!(model.super_classes("Employee"), Some(&class_set(&["Person"])));
        assert!(model.properties("Student").is_none());
        assert!(!model.is_literal("Student"));
    }

    #[test]
    fn test_unlabeled_edge_uses_undef_property() {
        let nodes = vec![DiagramNode::entity("a", ["A"]), DiagramNode::entity("b", ["B"])];
        let model = ModelBuilder::build(&nodes, &[DiagramEdge::new("a", "b", None)]);
        assert!(model.properties("A").unwrap().contains_key(UNDEF_PROPERTY));
    }

    #[test]
    fn test_required_suffix_stripped_before_sanitizing() {
        let nodes = vec![DiagramNode::entity("b", ["Book"]), DiagramNode::entity("a", ["Author"])];
        let edges = vec![DiagramEdge::labeled("b", "a", "written by min 1")];
        let model = ModelBuilder::build(&nodes, &edges);

        assert!(model.properties("Book").unwrap().contains_key("written_by"));
        assert_eq!(model.restriction("Book", "written_by"), Some(Restriction::SomeValuesFrom));
    }

    #[test]
    fn test_restriction_kept_once_any_edge_requires_it() {
        let nodes = vec![
            DiagramNode::entity("e", ["Event"]),
            DiagramNode::entity("p", ["Person"]),
            DiagramNode::entity("o", ["Organization"]),
        ];
        let edges = vec![
            DiagramEdge::labeled("e", "p", "participant min 1"),
            DiagramEdge::labeled("e", "o", "participant"),
        ];
        let model = ModelBuilder::build(&nodes, &edges);
        assert_eq!(model.restriction("Event", "participant"), Some(Restriction::SomeValuesFrom));
    }

    #[test]
    fn test_polymorphic_targets_accumulate() {
        let nodes = vec![
            DiagramNode::entity("e", ["Event"]),
            DiagramNode::entity("p", ["Person"]),
            DiagramNode::entity("o", ["Organization"]),
        ];
        let edges = vec![
            DiagramEdge::labeled("e", "p", "participant"),
            DiagramEdge::labeled("e", "o", "participant"),
            DiagramEdge::labeled("e", "p", "participant"),
        ];
        let model = ModelBuilder::build(&nodes, &edges);
        assert_eq!(
            model.properties("Event").unwrap().get("participant"),
            Some(&class_set(&["Organization", "Person"]))
        );
    }

    #[test]
    fn test_edges_to_non_class_nodes_are_dropped() {
        let nodes = vec![DiagramNode::entity("a", ["A"]), DiagramNode::plain("note")];
        let edges = vec![
            DiagramEdge::labeled("a", "note", "comment"),
            DiagramEdge::labeled("note", "a", "about"),
            DiagramEdge::labeled("a", "missing", "ghost"),
        ];
        let model = ModelBuilder::build(&nodes, &edges);
        assert!(model.properties("A").is_none());
        assert!(model.is_literal("A"));
    }

    #[test]
    fn test_sanitized_name_collision_merges_classes() {
        let nodes = vec![
            DiagramNode::entity("n0", ["Data set", "first note"]),
            DiagramNode::entity("n1", ["Data-set"]),
            DiagramNode::entity("n2", ["Data/set", "second note"]),
            DiagramNode::entity("t", ["Title"]),
        ];
        let edges = vec![
            DiagramEdge::labeled("n0", "t", "title"),
            DiagramEdge::labeled("n2", "t", "alt title"),
        ];
        let model = ModelBuilder::build(&nodes, &edges);

        // "Data set" and "Data/set" collapse; "Data-set" keeps its hyphen
        assert_eq!(model.len(), 3);
        assert_eq!(model.annotation("Data_set"), Some("second note"));
        let props = model.properties("Data_set").unwrap();
        assert!(props.contains_key("title"));
        assert!(props.contains_key("alt_title"));
        assert!(model.is_literal("Data-set"));
    }

    #[test]
    fn test_blank_annotation_does_not_overwrite() {
        let nodes = vec![
            DiagramNode::entity("n0", ["Person", "a human"]),
            DiagramNode::entity("n1", ["Person", "   "]),
        ];
        let model = ModelBuilder::build(&nodes, &[]);
        assert_eq!(model.annotation("Person"), Some("a human"));
    }

    #[test]
    fn test_from_diagram() {
        let diagram = Diagram {
            nodes: vec![DiagramNode::entity("b", ["Book"]), DiagramNode::entity("a", ["Author"])],
            edges: vec![DiagramEdge::labeled("b", "a", "author")],
        };
        let model = ModelBuilder::from_diagram(&diagram);
        assert!(!model.is_literal("Book"));
    }
}
