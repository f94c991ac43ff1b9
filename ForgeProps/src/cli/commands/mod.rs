use clap::Subcommand;
use std::path::{Path, PathBuf};

use crate::config::Settings;

pub mod json;
pub mod show;
pub mod stats;

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve every object and write the result as JSON
    Json {
        /// Directory containing the objects_*.json files
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Single-line output
        #[arg(long, conflicts_with = "indent")]
        compact: bool,

        /// Spaces per indentation level
        #[arg(long)]
        indent: Option<usize>,

        /// String written at the start of every pretty-printed line after the first
        #[arg(long, conflicts_with = "compact")]
        prefix: Option<String>,

        /// Resolve objects on all cores
        #[arg(long)]
        parallel: bool,

        /// Object id at which parent chains stop
        #[arg(long)]
        root_id: Option<usize>,

        /// Settings file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Resolve selected objects and print them as JSON
    Show {
        /// Directory containing the objects_*.json files
        dir: PathBuf,

        /// Object ids to resolve
        #[arg(required = true)]
        ids: Vec<usize>,

        /// Settings file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print table statistics
    Stats {
        /// Directory containing the objects_*.json files
        dir: PathBuf,

        /// Settings file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

impl Commands {
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Json {
                dir,
                output,
                compact,
                indent,
                prefix,
                parallel,
                root_id,
                config,
            } => json::execute(
                dir,
                output.as_deref(),
                &json::JsonOptions {
                    compact: *compact,
                    indent: *indent,
                    prefix: prefix.clone(),
                    parallel: *parallel,
                    root_id: *root_id,
                },
                config.as_deref(),
            ),
            Commands::Show { dir, ids, config } => show::execute(dir, ids, config.as_deref()),
            Commands::Stats { dir, config } => stats::execute(dir, config.as_deref()),
        }
    }
}

/// Load the settings file if one was given.
fn load_settings(config: Option<&Path>) -> anyhow::Result<Settings> {
    match config {
        Some(path) => Ok(Settings::load(path)?),
        None => Ok(Settings::default()),
    }
}
