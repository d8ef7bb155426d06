//! Command-line interface
//!
//! `lattice-inference render` materializes the explainer container for an
//! inference service from files on disk; `lattice-inference validate` only
//! checks the explainer block.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use tracing::info;

use crate::config::InferenceServicesConfig;
use crate::explainer::ExplainerSpec;
use crate::telemetry::LogFormat;
use crate::{Error, Result};

/// Lattice inference component tooling
#[derive(Parser, Debug)]
#[command(name = "lattice-inference")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Default, validate and materialize an explainer container
    Render(RenderArgs),
    /// Validate an explainer block without materializing it
    Validate(ValidateArgs),
}

/// Arguments for `render`
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Explainer block (YAML or JSON)
    #[arg(long)]
    pub explainer: PathBuf,

    /// `inferenceservice-config` ConfigMap manifest
    #[arg(long, env = "LATTICE_INFERENCE_CONFIG")]
    pub config: PathBuf,

    /// Name of the owning inference service
    #[arg(long)]
    pub name: String,

    /// Namespace of the owning inference service
    #[arg(long, default_value = "default")]
    pub namespace: String,

    /// Output format for the rendered container
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub output: OutputFormat,
}

/// Arguments for `validate`
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Explainer block (YAML or JSON)
    #[arg(long)]
    pub explainer: PathBuf,
}

/// Output format for rendered manifests
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// YAML document
    #[default]
    Yaml,
    /// Pretty-printed JSON
    Json,
}

impl Cli {
    /// Run the CLI command, returning the text to print on stdout
    pub fn run(self) -> Result<String> {
        match self.command {
            Commands::Render(args) => render(&args),
            Commands::Validate(args) => validate(&args),
        }
    }
}

/// Load an explainer block from a YAML or JSON file
pub fn load_explainer(path: &Path) -> Result<ExplainerSpec> {
    let contents = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    serde_yaml::from_str(&contents).map_err(|e| {
        Error::serialization_for_kind(
            "ExplainerSpec",
            format!("failed to parse {}: {}", path.display(), e),
        )
    })
}

fn render(args: &RenderArgs) -> Result<String> {
    let mut explainer = load_explainer(&args.explainer)?;
    let config = InferenceServicesConfig::from_file(&args.config)?;
    let metadata = ObjectMeta {
        name: Some(args.name.clone()),
        namespace: Some(args.namespace.clone()),
        ..Default::default()
    };

    let container = explainer.materialize(&metadata, &config)?;
    info!(
        inference_service = %args.name,
        namespace = %args.namespace,
        image = container.image.as_deref().unwrap_or_default(),
        "rendered explainer container"
    );

    match args.output {
        OutputFormat::Yaml => Ok(serde_yaml::to_string(&container)?),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&container)? + "\n"),
    }
}

fn validate(args: &ValidateArgs) -> Result<String> {
    let explainer = load_explainer(&args.explainer)?;
    explainer.validate()?;
    let kind = explainer.kind()?;
    Ok(format!("{}: explainer ({}) is valid\n", args.explainer.display(), kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_render_arguments() {
        let cli = Cli::try_parse_from([
            "lattice-inference",
            "render",
            "--explainer",
            "explainer.yaml",
            "--config",
            "config.yaml",
            "--name",
            "mnist",
            "--output",
            "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Render(args) => {
                assert_eq!(args.name, "mnist");
                assert_eq!(args.namespace, "default");
                assert_eq!(args.output, OutputFormat::Json);
            }
            _ => panic!("expected render command"),
        }
        assert_eq!(cli.log_format, LogFormat::Text);
    }

    #[test]
    fn render_requires_name() {
        let result = Cli::try_parse_from([
            "lattice-inference",
            "render",
            "--explainer",
            "explainer.yaml",
            "--config",
            "config.yaml",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn missing_explainer_file_is_io_error() {
        let err = load_explainer(Path::new("/nonexistent/explainer.yaml")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
