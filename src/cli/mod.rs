//! CLI module for cinedb
//!
//! Provides the command-line interface for:
//! - describe: Print one table's schema
//! - load: Bulk-load a tab-separated file
//! - browse: Page through one table
//! - movie: Show one movie's joined detail

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command, RoleArg};
pub use commands::{run, run_command};
pub use errors::{CliError, CliResult};
