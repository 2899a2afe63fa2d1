//! Output paths, input discovery and writing

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::compiler::SchemaDocument;
use crate::config::{OutputFormat, TranslatorConfig};
use crate::error::{Result, TranslateError};

/// Output path for an input diagram: the full file name plus `suffix`
///
/// `model.graphml` with the default suffix becomes `model.graphml_schema.json`.
pub fn output_path_for(input: &Path, suffix: &str) -> PathBuf {
    let mut name = input.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

/// Diagrams to translate for a path given on the command line
///
/// A file is returned as-is, whatever its extension. A directory is walked and
/// every file with a configured input extension is returned, sorted; files
/// that are themselves translator output are skipped.
pub fn discover_inputs(path: &Path, config: &TranslatorConfig) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        return Err(TranslateError::InvalidInput(format!(
            "{} is neither a file nor a directory",
            path.display()
        )));
    }

    let mut inputs: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| has_extension(p, &config.input.extensions))
        .filter(|p| !p.to_string_lossy().ends_with(&config.output.suffix))
        .collect();
    inputs.sort();

    tracing::debug!(root = %path.display(), count = inputs.len(), "inputs discovered");
    Ok(inputs)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|wanted| wanted.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// Render a document and write it, creating parent directories
pub fn write_document(document: &SchemaDocument, path: &Path, format: OutputFormat) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, document.render(format)?)?;
    tracing::info!(path = %path.display(), "schema written");
    Ok(())
}
