//! Command-line interface module.

mod commands;
mod run;
mod voices;

pub use commands::{Cli, Commands};
pub use run::run_project;
pub use voices::list_voices;
