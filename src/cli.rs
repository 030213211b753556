//! # Command line interface
//!
//! ```sh
//! taxon-owl convert                      # built-in species list to stdout
//! taxon-owl convert "Apis mellifera" --output bees.owl
//! taxon-owl --environment production start --port 5150
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::{
    app::{self, AppContext},
    config::Config,
    environment::{resolve_from_env, Environment, DEFAULT_ENVIRONMENT},
    logger,
    ontology::OwlGenerator,
    Result,
};

/// Species converted when `convert` is given no names.
pub const DEFAULT_SPECIES: &[&str] = &[
    "Apis mellifera",
    "Bos taurus",
    "Capra aegagrus hircus",
    "Ovis aries",
    "Sus",
    "Prochilodus cearensis",
    "Prochilodus scrofa",
    "Prochilodus margravii",
    "Semaprochilodus insignis",
    "Semaprochilodus taeniurus",
    "Colossoma mitrei",
    "Arapaima gigas",
    "Tilapia",
];

#[derive(Parser, Debug)]
#[command(
    name = "taxon-owl",
    version,
    about = "Build OWL class hierarchies from GBIF species classifications"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true, help = &format!("Specify the environment [default: {DEFAULT_ENVIRONMENT}]"))]
    environment: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP service
    Start {
        /// Server bind address
        #[arg(short, long)]
        binding: Option<String>,
        /// Server port address
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Convert species names to an OWL ontology
    Convert {
        /// Species names, the built-in list when omitted
        names: Vec<String>,
        /// Additional match attempts per name after a failed lookup
        #[arg(short, long, default_value_t = 0)]
        retries: u32,
        /// Write the ontology to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Applies command line overrides to the loaded configuration.
fn apply_overrides(mut config: Config, command: &Commands) -> Config {
    match command {
        Commands::Start { binding, port } => {
            if let Some(binding) = binding {
                config.server.binding.clone_from(binding);
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
        }
        Commands::Convert { retries, .. } => {
            config.taxonomy.retry.max_attempts = retries.saturating_add(1);
        }
    }
    config
}

fn banner(config: &Config, environment: &Environment) {
    println!(
        "{} {}",
        "taxon-owl".green().bold(),
        env!("CARGO_PKG_VERSION").dimmed()
    );
    println!("{:>13}: {}", "environment".bold(), environment);
    println!("{:>13}: {}", "listening on".bold(), config.server.full_url().cyan());
    println!("{:>13}: {}", "taxonomy".bold(), config.taxonomy.api_base);
}

/// Renders the ontology of `names`, or of [`DEFAULT_SPECIES`] when no name
/// is given, into `output` or to stdout.
pub async fn convert(
    generator: &OwlGenerator,
    names: &[String],
    output: Option<&Path>,
) -> Result<()> {
    let owl = if names.is_empty() {
        generator.generate(DEFAULT_SPECIES).await
    } else {
        generator.generate(names).await
    };
    match output {
        Some(path) => {
            std::fs::write(path, owl)?;
            tracing::info!(path = %path.display(), "ontology written");
        }
        None => println!("{owl}"),
    }
    Ok(())
}

/// Parses the command line and runs the selected command.
pub async fn main() -> Result<()> {
    let cli = Cli::parse();
    let environment: Environment = cli.environment.unwrap_or_else(resolve_from_env).into();

    let config = apply_overrides(environment.load()?, &cli.command);
    logger::init(&config.logger);

    match cli.command {
        Commands::Start { .. } => {
            let ctx = AppContext::from_config(config)?;
            banner(&ctx.config, &environment);
            app::serve(ctx).await
        }
        Commands::Convert { names, output, .. } => {
            let ctx = AppContext::from_config(config)?;
            convert(&ctx.generator, &names, output.as_deref()).await
        }
    }
}
