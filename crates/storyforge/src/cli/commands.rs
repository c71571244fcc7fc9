//! CLI argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Storyforge: turn a scene list into a narrated video.
#[derive(Debug, Parser)]
#[command(name = "storyforge", version, about)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the full pipeline over a project file
    Run {
        /// Path to the project TOML file
        project: PathBuf,

        /// Directory for stored media assets
        #[arg(long, default_value = "storyforge_media")]
        media_dir: PathBuf,

        /// Directory for render intermediates (defaults to media_dir/work)
        #[arg(long)]
        work_dir: Option<PathBuf>,

        /// Write generated asset references back to the project file
        #[arg(long)]
        save: bool,
    },

    /// List the voices the TTS backend offers
    Voices {
        /// Only show voices for this language code (e.g., "en")
        #[arg(long)]
        language: Option<String>,
    },
}
