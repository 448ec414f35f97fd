//! Version command for the pixcat CLI.

/// The current version of pixcat, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The line printed by `--version`.
pub fn version_line() -> String {
    format!("pixcat {}", VERSION)
}
