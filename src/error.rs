//! Error types for the diagram translator

use thiserror::Error;

/// Result type for translator operations
pub type Result<T> = std::result::Result<T, TranslateError>;

/// Translator errors
///
/// Only the edges of the pipeline can fail: reading a diagram, loading
/// configuration and writing output. Building the class model and compiling
/// the schema are total over their inputs.
#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("GraphML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config_crate::ConfigError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
