//! End-to-end translation
//!
//! Reader -> [`ModelBuilder`] -> [`SchemaCompiler`]. The model is fully built
//! (node pass, then edge pass) before compilation starts.

use std::path::Path;

use crate::compiler::{CompilerConfig, SchemaCompiler, SchemaDocument};
use crate::config::TranslatorConfig;
use crate::diagram::{read_diagram, Diagram};
use crate::error::Result;
use crate::model::{ClassModel, ModelBuilder, ModelStats};

/// Model and schema produced from one diagram
#[derive(Debug, Clone)]
pub struct Translation {
    pub model: ClassModel,
    pub document: SchemaDocument,
}

impl Translation {
    pub fn stats(&self) -> ModelStats {
        ModelStats::from_model(&self.model)
    }
}

/// Translate an in-memory diagram
pub fn translate(diagram: &Diagram, config: &CompilerConfig) -> Translation {
    let model = ModelBuilder::from_diagram(diagram);
    let document = SchemaCompiler::new(config.clone()).compile(&model);
    Translation { model, document }
}

/// Read and translate a diagram file
pub fn translate_file(path: &Path, config: &TranslatorConfig) -> Result<Translation> {
    let diagram = read_diagram(path, &config.input)?;
    Ok(translate(&diagram, &config.compiler))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::{DiagramEdge, DiagramNode};

    #[test]
    fn test_translate_in_memory() {
        let diagram = Diagram {
            nodes: vec![DiagramNode::entity("b", ["Book"]), DiagramNode::entity("a", ["Author"])],
            edges: vec![DiagramEdge::labeled("b", "a", "author")],
        };
        let translation = translate(&diagram, &CompilerConfig::default());

        assert_eq!(translation.model.len(), 2);
        assert_eq!(translation.document.defs.len(), 5);
        assert_eq!(translation.stats().composite_classes, 1);
    }
}
