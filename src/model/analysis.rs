//! Class Model Analysis
//!
//! Graph view of a [`ClassModel`] for diagnostics: inheritance cycles (which
//! compile into `allOf` reference loops), definition names that clash once
//! wrapper and union definitions are added, summary statistics and a
//! GraphViz rendering. Nothing here changes what the compiler emits.

use petgraph::algo::kosaraju_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use super::{ClassModel, ClassName, PropertyName};
use crate::compiler::CompilerConfig;

/// Edge kind in the class graph
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    /// Generalization (source is a subclass of target)
    SubClassOf,
    /// Named relationship
    Property(PropertyName),
}

/// Directed graph of classes and their relations
pub struct ClassGraph {
    graph: DiGraph<ClassName, Relation>,
    node_indices: HashMap<ClassName, NodeIndex>,
}

impl ClassGraph {
    pub fn from_model(model: &ClassModel) -> Self {
        let mut graph = DiGraph::with_capacity(model.len(), model.len() * 2);
        let mut node_indices = HashMap::with_capacity(model.len());

        for class in model.class_names() {
            let idx = graph.add_node(class.clone());
            node_indices.insert(class.clone(), idx);
        }

        for (class, supers) in &model.super_classes {
            for parent in supers {
                if let (Some(&from), Some(&to)) = (node_indices.get(class), node_indices.get(parent)) {
                    graph.add_edge(from, to, Relation::SubClassOf);
                }
            }
        }

        for (class, properties) in &model.properties {
            for (property, targets) in properties {
                for target in targets {
                    if let (Some(&from), Some(&to)) = (node_indices.get(class), node_indices.get(target)) {
                        graph.add_edge(from, to, Relation::Property(property.clone()));
                    }
                }
            }
        }

        Self { graph, node_indices }
    }

    pub fn class_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn relation_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Groups of classes that (transitively) subclass each other
    ///
    /// Includes single classes that are declared their own superclass. Each
    /// group is sorted; groups are sorted by their first member.
    pub fn inheritance_cycles(&self) -> Vec<Vec<ClassName>> {
        let mut inheritance: DiGraph<NodeIndex, ()> =
            DiGraph::with_capacity(self.graph.node_count(), self.graph.edge_count());
        for idx in self.graph.node_indices() {
            inheritance.add_node(idx);
        }
        // Node indices line up because both graphs add nodes in the same order.
        for edge in self.graph.edge_references() {
            if edge.weight() == &Relation::SubClassOf {
                inheritance.update_edge(edge.source(), edge.target(), ());
            }
        }

        let mut cycles: Vec<Vec<ClassName>> = kosaraju_scc(&inheritance)
            .into_iter()
            .filter(|scc| scc.len() > 1 || inheritance.contains_edge(scc[0], scc[0]))
            .map(|scc| {
                let mut members: Vec<ClassName> = scc
                    .into_iter()
                    .filter_map(|idx| self.graph.node_weight(idx).cloned())
                    .collect();
                members.sort();
                members
            })
            .collect();
        cycles.sort();
        cycles
    }

    /// Export the class graph to GraphViz DOT format
    pub fn to_dot(&self) -> String {
        let mut output = String::new();

        output.push_str("digraph ClassModel {\n");
        output.push_str("  rankdir=BT;\n");
        output.push_str("  node [shape=box, style=\"filled,rounded\", fontname=\"Helvetica\", fontsize=10];\n");
        output.push_str("  edge [fontname=\"Helvetica\", fontsize=8];\n");
        output.push('\n');

        let mut has_outgoing = vec![false; self.graph.node_count()];
        for edge in self.graph.edge_references() {
            has_outgoing[edge.source().index()] = true;
        }

        for idx in self.graph.node_indices() {
            let name = &self.graph[idx];
            // Literal classes have no outgoing edge of either kind
            let color = if has_outgoing[idx.index()] { "#00BCD4" } else { "#E0E0E0" };
            output.push_str(&format!("  \"{}\" [fillcolor=\"{}\"];\n", escape(name), color));
        }

        output.push('\n');

        for edge in self.graph.edge_references() {
            let source = escape(&self.graph[edge.source()]);
            let target = escape(&self.graph[edge.target()]);
            match edge.weight() {
                Relation::SubClassOf => {
                    output.push_str(&format!("  \"{}\" -> \"{}\" [arrowhead=empty];\n", source, target));
                }
                Relation::Property(name) => {
                    output.push_str(&format!(
                        "  \"{}\" -> \"{}\" [label=\"{}\"];\n",
                        source,
                        target,
                        escape(name)
                    ));
                }
            }
        }

        output.push_str("}\n");
        output
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Which generated definition claims a `$defs` key
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DefinitionOrigin {
    /// Value definition of a class
    Value(ClassName),
    /// One-or-many wrapper of a class
    Wrapper(ClassName),
    /// The union of all classes
    Union,
}

impl fmt::Display for DefinitionOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefinitionOrigin::Value(class) => write!(f, "value of {}", class),
            DefinitionOrigin::Wrapper(class) => write!(f, "wrapper of {}", class),
            DefinitionOrigin::Union => write!(f, "class union"),
        }
    }
}

/// A `$defs` key claimed by more than one definition
///
/// The compiler writes definitions in a fixed order (per class: value then
/// wrapper; union last), so the last origin listed is the one that survives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionCollision {
    pub definition: String,
    pub origins: Vec<DefinitionOrigin>,
}

impl fmt::Display for DefinitionCollision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let origins: Vec<String> = self.origins.iter().map(|o| o.to_string()).collect();
        write!(f, "definition '{}' claimed by {}", self.definition, origins.join(", "))
    }
}

/// Find `$defs` keys that the compiler would write more than once
pub fn definition_collisions(model: &ClassModel, config: &CompilerConfig) -> Vec<DefinitionCollision> {
    let mut claims: BTreeMap<String, Vec<DefinitionOrigin>> = BTreeMap::new();

    for class in model.class_names() {
        claims
            .entry(class.clone())
            .or_default()
            .push(DefinitionOrigin::Value(class.clone()));
        claims
            .entry(config.wrapper_name(class))
            .or_default()
            .push(DefinitionOrigin::Wrapper(class.clone()));
    }
    claims
        .entry(config.union_name.clone())
        .or_default()
        .push(DefinitionOrigin::Union);

    claims
        .into_iter()
        .filter(|(_, origins)| origins.len() > 1)
        .map(|(definition, origins)| DefinitionCollision { definition, origins })
        .collect()
}

/// Summary counts for a class model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelStats {
    pub classes: usize,
    pub literal_classes: usize,
    pub composite_classes: usize,
    pub properties: usize,
    pub polymorphic_properties: usize,
    pub subclass_links: usize,
}

impl ModelStats {
    pub fn from_model(model: &ClassModel) -> Self {
        let literal_classes = model.class_names().filter(|c| model.is_literal(c)).count();
        let properties = model.properties.values().map(|props| props.len()).sum();
        let polymorphic_properties = model
            .class_names()
            .map(|class| model.polymorphic_properties(class).count())
            .sum();
        let subclass_links = model.super_classes.values().map(|supers| supers.len()).sum();

        Self {
            classes: model.len(),
            literal_classes,
            composite_classes: model.len() - literal_classes,
            properties,
            polymorphic_properties,
            subclass_links,
        }
    }
}

impl fmt::Display for ModelStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} classes ({} literal, {} composite), {} properties ({} polymorphic), {} subclass links",
            self.classes,
            self.literal_classes,
            self.composite_classes,
            self.properties,
            self.polymorphic_properties,
            self.subclass_links
        )
    }
}
