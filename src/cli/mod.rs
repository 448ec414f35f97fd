//! CLI module for pixcat.
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing
//! - Help and version display
//!
//! # Usage
//!
//! The CLI dispatcher should be called early in main() to handle flags that
//! never start the viewer:
//!
//! ```ignore
//! use pixcat::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args_os());
//! if let Some(code) = run_cli_command(&command) {
//!     std::process::exit(code);
//! }
//! // Not handled here, start the viewer
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, CliCommand, USAGE};
pub use version::{version_line, VERSION};

/// Run a CLI command if applicable.
///
/// # Returns
///
/// * `None` - If the command is `View` (the viewer should start)
/// * `Some(code)` - The process exit code after printing output
pub fn run_cli_command(command: &CliCommand) -> Option<i32> {
    match command {
        CliCommand::Help => {
            println!("{}", USAGE);
            Some(0)
        }
        CliCommand::Version => {
            println!("{}", version_line());
            Some(0)
        }
        CliCommand::Usage => {
            eprintln!("{}", USAGE);
            Some(1)
        }
        CliCommand::Invalid(problem) => {
            eprintln!("error: {}\n\n{}", problem, USAGE);
            Some(1)
        }
        CliCommand::View { .. } => None,
    }
}
