//! Frame Circles CLI
//!
//! Apply a JSON command script to a fresh canvas and print one outcome per
//! command.
//!
//! Usage:
//!     frame-circles run script.json --pretty
//!     frame-circles run script.json --config canvas.json --dedupe-conflicts
//!     frame-circles check script.json

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use frame_circles::adapters::script::{self, Script};
use frame_circles::{Canvas, CanvasConfig};

/// Frame Circles - frames, nested circles, no overlaps
#[derive(Parser)]
#[command(name = "frame-circles")]
#[command(version)]
#[command(about = "Spatial constraint engine for frames and circles", long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a command script and print the outcomes as JSON
    Run {
        /// Script file (JSON array of commands)
        script: PathBuf,

        #[command(flatten)]
        config: ConfigArgs,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Parse a command script without applying it
    Check {
        /// Script file (JSON array of commands)
        script: PathBuf,
    },
}

#[derive(Args)]
struct ConfigArgs {
    /// Canvas configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report each kind of conflict once instead of once per conflicting record
    #[arg(long)]
    dedupe_conflicts: bool,

    /// Reject frames and circles whose dimensions are not positive
    #[arg(long)]
    require_positive_dimensions: bool,
}

impl ConfigArgs {
    fn load(&self) -> Result<CanvasConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = read(path)?;
                CanvasConfig::from_json(&json)
                    .with_context(|| format!("invalid config in {}", path.display()))?
            }
            None => CanvasConfig::default(),
        };

        // flags only ever switch options on
        if self.dedupe_conflicts {
            config = config.with_dedupe_conflicts(true);
        }
        if self.require_positive_dimensions {
            config = config.with_positive_dimensions(true);
        }
        Ok(config)
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn load_script(path: &Path) -> Result<Script> {
    let json = read(path)?;
    Script::from_json(&json).with_context(|| format!("invalid script in {}", path.display()))
}

fn cmd_run(path: &Path, config: &ConfigArgs, pretty: bool) -> Result<()> {
    let script = load_script(path)?;
    let mut canvas = Canvas::new(config.load()?);

    let outcomes = script::run(&mut canvas, &script);

    let json = if pretty {
        serde_json::to_string_pretty(&outcomes)?
    } else {
        serde_json::to_string(&outcomes)?
    };
    println!("{}", json);
    Ok(())
}

fn cmd_check(path: &Path) -> Result<()> {
    let script = load_script(path)?;
    println!("{}: {} commands", path.display(), script.len());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries the outcomes, logs go to stderr
    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stderr)
        .init();

    match cli.command {
        Commands::Run {
            script,
            config,
            pretty,
        } => cmd_run(&script, &config, pretty),
        Commands::Check { script } => cmd_check(&script),
    }
}
