use anyhow::Context;
use clap::{Parser, Subcommand};
use seltrans::{init_logging, Config, Scene, BUILD_DATE, VERSION};
use std::path::PathBuf;

/// Replays scripted selection drags and prints where the items end up.
#[derive(Debug, Parser)]
#[command(name = "seltrans", version)]
struct Cli {
    /// Log as JSON lines instead of plain text
    #[arg(long, global = true)]
    json_log: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Replay a scene file
    Replay {
        /// Scene file (JSON)
        scene: PathBuf,

        /// Configuration file (JSON or TOML); defaults to the user config
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the effective configuration
    Config {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<Config> {
    let path = match path {
        Some(path) => path,
        None => Config::default_path()?,
    };
    Config::load_or_default(&path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.json_log)?;
    tracing::debug!(version = VERSION, built = BUILD_DATE, "starting");

    match cli.command {
        Command::Replay { scene, config } => {
            let config = load_config(config)?;
            let scene = Scene::load_from_file(&scene)?;
            let report = scene.replay(&config)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Config { config } => {
            let config = load_config(config)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
