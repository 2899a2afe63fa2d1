//! Configuration management for the translator
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (graphml2jsch.toml)
//! - Environment variables (JSCH__*)
//!
//! ## Example config file (graphml2jsch.toml):
//! ```toml
//! [input]
//! entity_marker = "com.yworks.entityRelationship.big_entity"
//! extensions = ["graphml"]
//!
//! [compiler]
//! schema_uri = "http://json-schema.org/draft-06/schema#"
//! union_name = "CSObject"
//! wrapper_suffix = "_"
//! identity_fields = ["@id", "@type"]
//! emit_comments = true
//!
//! [output]
//! format = "pretty"
//! suffix = "_schema.json"
//! ```

use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::compiler::CompilerConfig;
use crate::error::Result;

/// yEd configuration string of the "Entity with Attributes" node shape
pub const YED_ENTITY_MARKER: &str = "com.yworks.entityRelationship.big_entity";

/// Main configuration for the translator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranslatorConfig {
    /// Diagram reading settings
    #[serde(default)]
    pub input: InputConfig,

    /// Schema compilation settings
    #[serde(default)]
    pub compiler: CompilerConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// GenericNode `configuration` value that marks an entity node
    #[serde(default = "default_entity_marker")]
    pub entity_marker: String,

    /// File extensions picked up when the input is a directory
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format (pretty or compact)
    #[serde(default)]
    pub format: OutputFormat,

    /// Suffix appended to the input file name to form the output path
    #[serde(default = "default_suffix")]
    pub suffix: String,
}

/// Output format for JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(OutputFormat::Pretty),
            "compact" => Ok(OutputFormat::Compact),
            other => Err(format!("unknown output format '{}' (expected pretty or compact)", other)),
        }
    }
}

// Default value functions
fn default_entity_marker() -> String {
    YED_ENTITY_MARKER.to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["graphml".to_string()]
}

fn default_suffix() -> String {
    "_schema.json".to_string()
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            entity_marker: default_entity_marker(),
            extensions: default_extensions(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Pretty,
            suffix: default_suffix(),
        }
    }
}

impl TranslatorConfig {
    /// Load configuration, layering an explicit file over the default locations
    pub fn load_from(config_path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_locations = [
            "graphml2jsch.toml",
            ".graphml2jsch.toml",
            "config/graphml2jsch.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("dev", "erd-schema", "graphml2jsch") {
            let xdg_config = config_dir.config_dir().join("graphml2jsch.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // JSCH__OUTPUT__FORMAT=compact etc.
        builder = builder.add_source(
            Environment::with_prefix("JSCH")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Save configuration to a file, in the format `load_from` reads back
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }
}
