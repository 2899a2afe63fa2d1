//! GraphML to JSON Schema CLI
//!
//! Translates one diagram, or every diagram under a directory, writing each
//! schema next to its input as `<input>_schema.json`.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use erd_schema::model::analysis::definition_collisions;
use erd_schema::{
    discover_inputs, output_path_for, translate_file, write_document, ClassGraph, OutputFormat,
    TranslatorConfig,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "graphml2jsch")]
#[command(about = "Translate yEd entity-relationship diagrams into JSON Schema")]
struct Cli {
    /// Diagram file (.graphml, or a .json node/edge list) or a directory of diagrams
    input: PathBuf,

    /// Output file (single input only; defaults to <input>_schema.json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file layered over the default locations
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format: pretty or compact
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Also write the class graph in GraphViz DOT format (single input only)
    #[arg(long)]
    dot: Option<PathBuf>,

    /// Write the effective configuration (files, environment and flags merged) to this path
    #[arg(long)]
    write_config: Option<PathBuf>,

    /// Exit with an error when inheritance cycles or definition collisions are found
    #[arg(long)]
    strict: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let strict = cli.strict;

    match run(cli) {
        Ok(issues) if strict && issues > 0 => {
            eprintln!("Error: {} model issue(s) found (--strict)", issues);
            std::process::exit(2);
        }
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Translate every input; returns the number of model issues found
fn run(cli: Cli) -> anyhow::Result<usize> {
    let config_path = cli.config.as_ref().map(|p| p.to_string_lossy().into_owned());
    let mut config = TranslatorConfig::load_from(config_path.as_deref())
        .context("failed to load configuration")?;
    if let Some(format) = cli.format {
        config.output.format = format;
    }
    if let Some(path) = &cli.write_config {
        config
            .save(path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("configuration -> {}", path.display());
    }

    let inputs = discover_inputs(&cli.input, &config)?;
    if inputs.is_empty() {
        bail!("no diagrams found under {}", cli.input.display());
    }
    if inputs.len() > 1 && (cli.output.is_some() || cli.dot.is_some()) {
        bail!("--output and --dot require a single input file");
    }

    let mut issues = 0;
    for input in &inputs {
        let translation = translate_file(input, &config)
            .with_context(|| format!("failed to translate {}", input.display()))?;

        let output = cli
            .output
            .clone()
            .unwrap_or_else(|| output_path_for(input, &config.output.suffix));
        write_document(&translation.document, &output, config.output.format)
            .with_context(|| format!("failed to write {}", output.display()))?;
        println!("{} -> {}: {}", input.display(), output.display(), translation.stats());

        let graph = ClassGraph::from_model(&translation.model);
        if let Some(dot_path) = &cli.dot {
            fs::write(dot_path, graph.to_dot())
                .with_context(|| format!("failed to write {}", dot_path.display()))?;
            println!(
                "  class graph ({} classes, {} relations) -> {}",
                graph.class_count(),
                graph.relation_count(),
                dot_path.display()
            );
        }

        issues += graph.inheritance_cycles().len();
        issues += definition_collisions(&translation.model, &config.compiler).len();
    }

    Ok(issues)
}
