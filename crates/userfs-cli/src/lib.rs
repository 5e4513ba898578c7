//! UserFS CLI library

pub mod demo;
pub mod shell;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;
use userfs_core::{FsConfig, Namespace};

// Re-export CLI types for testing
pub use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "userfs")]
#[command(about = "In-memory multi-user filesystem shell")]
#[command(version, author, long_about = None)]
pub struct Cli {
    /// Namespace configuration file (JSON)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(
        long,
        default_value = "warn",
        global = true,
        value_parser = ["error", "warn", "info", "debug", "trace"]
    )]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive shell (default)
    Shell,
    /// Feed shell commands from a script file
    Run(RunArgs),
    /// Run the built-in scenario and print the resulting listing
    Demo,
}

/// Arguments for running a shell script
#[derive(Args)]
pub struct RunArgs {
    /// Script with one shell command per line
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,
}

impl RunArgs {
    pub fn run(self, config: FsConfig) -> Result<()> {
        let file = File::open(&self.script)
            .with_context(|| format!("Failed to open script {}", self.script.display()))?;
        info!(script = %self.script.display(), "running script");

        let mut shell = shell::Shell::new(Namespace::new(config));
        let stdout = io::stdout();
        shell
            .run(BufReader::new(file), &mut stdout.lock(), true)
            .context("Failed to run script")
    }
}

impl Cli {
    /// Load the configuration named by `--config`, or the defaults.
    pub fn load_config(&self) -> Result<FsConfig> {
        match &self.config {
            Some(path) => FsConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display())),
            None => Ok(FsConfig::default()),
        }
    }

    pub fn max_level(&self) -> tracing::Level {
        match self.log_level.as_str() {
            "error" => tracing::Level::ERROR,
            "info" => tracing::Level::INFO,
            "debug" => tracing::Level::DEBUG,
            "trace" => tracing::Level::TRACE,
            _ => tracing::Level::WARN,
        }
    }
}
