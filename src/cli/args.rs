//! CLI argument definitions using clap
//!
//! Commands:
//! - pim-attributes validate [--config <path>] [--type <id>] [--attributes <file>] [--all]
//! - pim-attributes types [--config <path>]
//! - pim-attributes check [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Validate product attribute bags against product type schemas
#[derive(Parser, Debug)]
#[command(name = "pim-attributes")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate one attribute bag
    Validate {
        /// Path to configuration file (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Product type id; omit for a product without a type
        #[arg(long = "type")]
        type_id: Option<i64>,

        /// File holding the attribute JSON; stdin when omitted
        #[arg(long)]
        attributes: Option<PathBuf>,

        /// Report every failing field instead of the first
        #[arg(long)]
        all: bool,
    },

    /// List the loaded product types
    Types {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Load and structure-check every schema file
    Check {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
