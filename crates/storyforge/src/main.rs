//! Storyforge CLI binary.
//!
//! Loads a project TOML file and drives the pipeline: image generation,
//! voice generation, clip rendering and final concatenation.

use clap::Parser;
use storyforge::init_telemetry;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use cli::{list_voices, run_project, Cli, Commands};

    // Backend endpoints come from the environment.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_directive = if cli.verbose { "debug" } else { "info" };
    init_telemetry(default_directive).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    match cli.command {
        Commands::Run {
            project,
            media_dir,
            work_dir,
            save,
        } => {
            run_project(&project, media_dir, work_dir, save).await?;
        }

        Commands::Voices { language } => {
            list_voices(language.as_deref()).await?;
        }
    }

    Ok(())
}
