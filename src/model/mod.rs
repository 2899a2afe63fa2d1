//! Class Model
//!
//! The normalized view of an entity-relationship diagram: class names, their
//! superclasses, their outgoing properties and free-text annotations. Built
//! once by [`ModelBuilder`] and read-only afterwards; the schema compiler is
//! its only consumer besides diagnostics.
//!
//! All collections are ordered (`BTreeSet`/`BTreeMap`). Nothing downstream
//! depends on the order (`allOf`/`anyOf`/`oneOf` are commutative) but sorted
//! iteration makes compiled output byte-for-byte reproducible.

pub mod analysis;
pub mod builder;
pub mod names;

pub use analysis::{ClassGraph, DefinitionCollision, ModelStats, Relation};
pub use builder::ModelBuilder;
pub use names::{property_name, sanitize, Restriction, UNDEF_PROPERTY};

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Sanitized class name, also the value definition's key in `$defs`
pub type ClassName = String;

/// Sanitized property (edge label) name
pub type PropertyName = String;

/// Property name -> set of target classes seen on edges with that label
pub type PropertyMap = BTreeMap<PropertyName, BTreeSet<ClassName>>;

/// Immutable class model built from a diagram
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassModel {
    pub(crate) class_names: BTreeSet<ClassName>,
    pub(crate) annotations: BTreeMap<ClassName, String>,
    pub(crate) super_classes: BTreeMap<ClassName, BTreeSet<ClassName>>,
    pub(crate) properties: BTreeMap<ClassName, PropertyMap>,
    pub(crate) restrictions: BTreeMap<ClassName, BTreeMap<PropertyName, Restriction>>,
}

impl ClassModel {
    /// All class names, sorted
    pub fn class_names(&self) -> impl Iterator<Item = &ClassName> {
        self.class_names.iter()
    }

    pub fn contains(&self, class: &str) -> bool {
        self.class_names.contains(class)
    }

    pub fn len(&self) -> usize {
        self.class_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.class_names.is_empty()
    }

    /// Free-text annotation (second node label), verbatim
    pub fn annotation(&self, class: &str) -> Option<&str> {
        self.annotations.get(class).map(String::as_str)
    }

    /// Direct superclasses of a class
    pub fn super_classes(&self, class: &str) -> Option<&BTreeSet<ClassName>> {
        self.super_classes.get(class)
    }

    /// Outgoing properties of a class
    pub fn properties(&self, class: &str) -> Option<&PropertyMap> {
        self.properties.get(class)
    }

    /// Restriction recorded for a property; `SomeValuesFrom` if any edge asked for it
    pub fn restriction(&self, class: &str, property: &str) -> Option<Restriction> {
        self.restrictions.get(class)?.get(property).copied()
    }

    /// A class with no superclass and no outgoing property stands for a plain string value
    pub fn is_literal(&self, class: &str) -> bool {
        self.super_classes(class).map_or(true, BTreeSet::is_empty)
            && self.properties(class).map_or(true, BTreeMap::is_empty)
    }

    /// Properties of a class that point at more than one target class
    pub fn polymorphic_properties<'a>(&'a self, class: &str) -> impl Iterator<Item = &'a PropertyName> + 'a {
        self.properties
            .get(class)
            .into_iter()
            .flatten()
            .filter(|(_, targets)| targets.len() > 1)
            .map(|(name, _)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::{DiagramEdge, DiagramNode};

    fn sample() -> ClassModel {
        let nodes = vec![
            DiagramNode::entity("e", ["Event"]),
            DiagramNode::entity("p", ["Person"]),
            DiagramNode::entity("o", ["Organization"]),
            DiagramNode::entity("n", ["Name"]),
        ];
        let edges = vec![
            DiagramEdge::labeled("e", "p", "participant"),
            DiagramEdge::labeled("e", "o", "participant"),
            DiagramEdge::labeled("p", "n", "name"),
        ];
        ModelBuilder::build(&nodes, &edges)
    }

    #[test]
    fn test_literal_classification() {
        let model = sample();
        assert!(model.is_literal("Name"));
        assert!(model.is_literal("Organization"));
        assert!(!model.is_literal("Person"));
        assert!(!model.is_literal("Event"));
    }

    #[test]
    fn test_polymorphic_properties() {
        let model = sample();
        let poly: Vec<_> = model.polymorphic_properties("Event").collect();
        assert_eq!(poly, vec!["participant"]);
        assert_eq!(model.polymorphic_properties("Person").count(), 0);
        assert_eq!(model.polymorphic_properties("Missing").count(), 0);
    }

    #[test]
    fn test_class_names_are_sorted() {
        let model = sample();
        let names: Vec<_> = model.class_names().cloned().collect();
        assert_eq!(names, vec!["Event", "Name", "Organization", "Person"]);
    }
}
