//! Command-line argument parsing for the encyclo CLI.
//!
//! This module handles parsing command-line arguments and determining
//! which CLI command to execute.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::{parse_number, validate_url, ConfigError};

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Run one action without the TUI, streaming the article to stdout
    Headless(HeadlessArgs),
    /// Run the TUI application (default)
    RunTui(TuiArgs),
}

/// Flags shared by both modes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommonArgs {
    pub rounds: Option<i64>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadlessSource {
    /// `--topic`
    Start { topic: String },
    /// `--continue <file>`: a saved terminal result
    Continue { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessArgs {
    pub source: HeadlessSource,
    pub output: Option<PathBuf>,
    pub common: CommonArgs,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TuiArgs {
    /// Start generating this topic as soon as the TUI opens
    pub topic: Option<String>,
    pub common: CommonArgs,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArgsError {
    #[error("{flag} requires a value")]
    MissingValue { flag: String },

    #[error("unknown argument: {0}")]
    Unknown(String),

    #[error("headless mode needs --topic <topic> or --continue <file>")]
    MissingSource,

    #[error("--topic and --continue cannot be used together")]
    ConflictingSources,

    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

/// Parse command-line arguments and return the appropriate command.
///
/// `--continue` and `--output` imply `--headless`. Both `--flag value` and
/// `--flag=value` are accepted.
///
/// # Examples
///
/// ```
/// use encyclo::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["encyclo".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()).unwrap(), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut topic = None;
    let mut continue_from = None;
    let mut output = None;
    let mut headless = false;
    let mut common = CommonArgs::default();

    // Skip the program name
    let mut args = args.skip(1);
    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };
        let mut value = |flag: &str| -> Result<String, ArgsError> {
            inline
                .clone()
                .or_else(|| args.next())
                .ok_or_else(|| ArgsError::MissingValue {
                    flag: flag.to_string(),
                })
        };

        match flag.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--headless" => headless = true,
            "--topic" | "-t" => topic = Some(value(&flag)?),
            "--rounds" | "-r" => {
                let raw = value(&flag)?;
                common.rounds = Some(parse_number(&flag, &raw)?);
            }
            "--base-url" => {
                let raw = value(&flag)?;
                common.base_url = Some(validate_url(&flag, &raw)?.to_string());
            }
            "--continue" => {
                continue_from = Some(PathBuf::from(value(&flag)?));
                headless = true;
            }
            "--output" | "-o" => {
                output = Some(PathBuf::from(value(&flag)?));
                headless = true;
            }
            _ => return Err(ArgsError::Unknown(arg)),
        }
    }

    if !headless {
        return Ok(CliCommand::RunTui(TuiArgs { topic, common }));
    }

    let source = match (topic, continue_from) {
        (Some(_), Some(_)) => return Err(ArgsError::ConflictingSources),
        (Some(topic), None) => HeadlessSource::Start { topic },
        (None, Some(path)) => HeadlessSource::Continue { path },
        (None, None) => return Err(ArgsError::MissingSource),
    };

    Ok(CliCommand::Headless(HeadlessArgs {
        source,
        output,
        common,
    }))
}
