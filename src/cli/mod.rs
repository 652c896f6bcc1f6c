//! CLI module
//!
//! Provides command-line interface for:
//! - validate: Validate one attribute bag against a product type
//! - types: List loaded product types
//! - check: Load and structure-check the schema directory

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check, load_config, run, run_command, types, validate, EXIT_INVALID};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_attributes, report_response, write_json, write_response};
