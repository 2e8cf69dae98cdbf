//! vitelink CLI - builds the Svelte frontend and links its assets.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

use config::ConfigFile;

#[derive(Parser)]
#[command(name = "vitelink")]
#[command(about = "Build and link Vite-compiled Svelte assets")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to vitelink.toml config file
    #[arg(short, long, default_value = "vitelink.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build Svelte components using Vite
    Build,

    /// Print the tags a template gets for an entry
    Asset {
        /// Entry name (e.g. "main")
        entry: String,

        /// Asset type: js or css
        #[arg(short = 't', long = "type", default_value = "js")]
        asset_type: String,
    },

    /// Render a template with vite_asset available
    Render {
        /// Template file
        template: PathBuf,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Template variable as key=value (repeatable)
        #[arg(long = "var", value_parser = parse_var)]
        vars: Vec<(String, String)>,
    },

    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        yes: bool,
    },
}

fn parse_var(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes)?;
        }
        Commands::Build => {
            let config = ConfigFile::load(&cli.config)?;
            commands::build::run(&config)?;
        }
        Commands::Asset { entry, asset_type } => {
            let config = ConfigFile::load(&cli.config)?;
            commands::asset::run(&config, &entry, &asset_type)?;
        }
        Commands::Render {
            template,
            output,
            vars,
        } => {
            let config = ConfigFile::load(&cli.config)?;
            commands::render::run(&config, &template, output.as_deref(), &vars)?;
        }
    }

    Ok(())
}
