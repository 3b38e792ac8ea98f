//! CLI module for encyclo.
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing
//! - Version and usage display
//! - Headless runs that stream an article to stdout
//!
//! # Usage
//!
//! ```ignore
//! use encyclo::cli::{parse_args, run_cli_command, CliCommand};
//!
//! let command = parse_args(std::env::args())?;
//! if let Some(result) = run_cli_command(&command) {
//!     return result;
//! }
//! // Headless or TUI
//! ```

pub mod args;
pub mod headless;
pub mod version;

pub use args::{parse_args, ArgsError, CliCommand, CommonArgs, HeadlessArgs, HeadlessSource, TuiArgs};
pub use headless::{load_result, run_headless, save_result, HeadlessOutcome};
pub use version::{handle_help_command, handle_version_command, USAGE, VERSION};

use color_eyre::Result;

use crate::config::ClientConfig;

/// Run commands that print and exit.
///
/// Returns `None` for `Headless` and `RunTui`, which need the async runtime.
/// `Version` and `Help` never return as they call `std::process::exit(0)`.
pub fn run_cli_command(command: &CliCommand) -> Option<Result<()>> {
    match command {
        CliCommand::Version => handle_version_command(),
        CliCommand::Help => handle_help_command(),
        CliCommand::Headless(_) | CliCommand::RunTui(_) => None,
    }
}

impl CommonArgs {
    /// Layer flags over configuration loaded from the environment.
    pub fn apply(&self, mut config: ClientConfig) -> ClientConfig {
        if let Some(rounds) = self.rounds {
            config = config.with_max_rounds(rounds);
        }
        if let Some(url) = &self.base_url {
            config = config.with_base_url(url.clone());
        }
        config
    }
}
