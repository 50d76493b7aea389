//! apigen CLI entrypoint
//! Parses command-line arguments and dispatches to the core generator.

// Internal imports (std, crate)
use std::path::PathBuf;
use std::process::ExitCode;

// External imports (alphabetized)
use anyhow::Context;
use apigen_core::{Config, Error};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "apigen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate request bindings from one or more OpenAPI documents
    Generate {
        /// Input documents (YAML or JSON, path or URL) followed by the output directory
        ///
        /// Example: apigen generate petstore.yaml users.json src/bindings
        #[arg(required_unless_present = "config", num_args = 2..)]
        paths: Vec<String>,
        /// Load the run settings from a YAML file instead
        #[arg(long, conflicts_with = "paths")]
        config: Option<PathBuf>,
        /// Module name of the shared runtime helper
        #[arg(long)]
        helper_module: Option<String>,
        /// Do not write a mod.rs declaring the generated modules
        #[arg(long)]
        no_mod_file: bool,
        /// Keep existing files in the output directory
        #[arg(long)]
        keep_output: bool,
    },
    /// Write a configuration file for later `generate --config` runs
    InitConfig {
        /// Input documents followed by the output directory
        #[arg(required = true, num_args = 2..)]
        paths: Vec<String>,
        /// Where to write the configuration
        #[arg(long, default_value = "apigen.yaml")]
        output: PathBuf,
    },
}

/// Split `inputs... output` into a fresh config.
fn config_from_paths(paths: &[String]) -> anyhow::Result<Config> {
    match paths.split_last() {
        Some((output_dir, inputs)) if !inputs.is_empty() => {
            Ok(Config::new(inputs.to_vec(), output_dir.clone()))
        }
        _ => anyhow::bail!("expected at least one input document and an output directory"),
    }
}

async fn resolve_config(command: &Commands) -> anyhow::Result<Config> {
    let Commands::Generate {
        paths,
        config,
        helper_module,
        no_mod_file,
        keep_output,
    } = command
    else {
        anyhow::bail!("not a generate command");
    };

    let mut resolved = match config {
        Some(path) => Config::from_file(path)
            .await
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => config_from_paths(paths)?,
    };
    if let Some(helper) = helper_module {
        resolved.helper_module = helper.clone();
    }
    if *no_mod_file {
        resolved.emit_mod_file = false;
    }
    if *keep_output {
        resolved.clean_output = false;
    }
    Ok(resolved)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match &cli.command {
        command @ Commands::Generate { .. } => {
            let config = resolve_config(command).await?;
            tracing::debug!(?config, "Resolved configuration");

            match apigen_core::generate(&config).await {
                Ok(report) => {
                    tracing::info!(
                        "Generated {} operation(s) from {} document(s) into {}",
                        report.operations,
                        report.documents,
                        report.output_dir.display()
                    );
                    Ok(())
                }
                Err(Error::Format {
                    source_text,
                    message,
                }) => {
                    eprintln!("{source_text}");
                    anyhow::bail!("Failed to format generated source: {message}")
                }
                Err(e) => Err(e).context("Generation failed"),
            }
        }
        Commands::InitConfig { paths, output } => {
            let config = config_from_paths(paths)?;
            config.validate()?;
            config
                .save(output)
                .await
                .with_context(|| format!("Failed to write {}", output.display()))?;
            tracing::info!("Wrote configuration to {}", output.display());
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
