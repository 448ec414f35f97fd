//! Command-line argument parsing for the pixcat CLI.
//!
//! Arguments are taken as `OsString` so file names that are not valid UTF-8
//! reach the viewer intact.

use std::ffi::OsString;

use crate::color::ColorProfile;

pub const USAGE: &str = "\
Usage: pixcat [OPTIONS] <PATH|URL>...

View images in the terminal. j/k or the arrow keys switch images, q quits.

Options:
  --color <truecolor|256|ansi>  Force a color profile instead of detecting one
  -h, --help                    Print this help
  -V, --version                 Print the version";

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Print usage and exit successfully
    Help,
    /// Show version information
    Version,
    /// No sources were given: print usage and fail
    Usage,
    /// Arguments could not be parsed
    Invalid(String),
    /// Open the viewer on these sources (default)
    View {
        sources: Vec<OsString>,
        color: Option<ColorProfile>,
    },
}

/// Parse command-line arguments and return the appropriate command.
///
/// # Examples
///
/// ```
/// use pixcat::cli::args::{parse_args, CliCommand};
///
/// assert_eq!(parse_args(["pixcat", "--version"]), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: IntoIterator,
    I::Item: Into<OsString>,
{
    let mut sources = Vec::new();
    let mut color = None;
    let mut only_sources = false;

    // Skip the program name
    let mut args = args.into_iter().map(Into::<OsString>::into).skip(1);
    while let Some(arg) = args.next() {
        let flag = match arg.to_str() {
            Some(flag) if !only_sources && flag.starts_with('-') && flag.len() > 1 => {
                flag.to_string()
            }
            _ => {
                sources.push(arg);
                continue;
            }
        };
        match flag.as_str() {
            "-h" | "--help" => return CliCommand::Help,
            "-V" | "--version" => return CliCommand::Version,
            "--" => only_sources = true,
            "--color" => match args.next() {
                Some(value) => match value.to_string_lossy().parse() {
                    Ok(profile) => color = Some(profile),
                    Err(e) => return CliCommand::Invalid(e),
                },
                None => return CliCommand::Invalid("--color needs a value".to_string()),
            },
            _ => match flag.strip_prefix("--color=") {
                Some(value) => match value.parse() {
                    Ok(profile) => color = Some(profile),
                    Err(e) => return CliCommand::Invalid(e),
                },
                None => return CliCommand::Invalid(format!("unknown option '{}'", flag)),
            },
        }
    }

    if sources.is_empty() {
        CliCommand::Usage
    } else {
        CliCommand::View { sources, color }
    }
}
