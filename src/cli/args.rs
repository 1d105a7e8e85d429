//! CLI argument definitions using clap
//!
//! Commands:
//! - tabledb check <FILE>
//! - tabledb tables <FILE>
//! - tabledb list <FILE> <TABLE> [--fields a,b] [--bind] [--prefix P] [--limit N]
//! - tabledb sort <FILE> <TABLE> --by FIELD [--reverse]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// tabledb - a strict, human-editable text database
#[derive(Parser, Debug)]
#[command(name = "tabledb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to an optional JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a database file and report the first error
    Check {
        /// Database file
        file: PathBuf,
    },

    /// List the tables of a database with their row counts
    Tables {
        /// Database file
        file: PathBuf,
    },

    /// Print the rows of one table, one JSON object per line
    List {
        /// Database file
        file: PathBuf,

        /// Table to list
        table: String,

        /// Fields to project, in output order (default: all fields of each row)
        #[arg(long, value_delimiter = ',')]
        fields: Vec<String>,

        /// Require every listed field and key output by prefix + field
        #[arg(long, requires = "fields")]
        bind: bool,

        /// Binding prefix (default: the table name)
        #[arg(long, requires = "bind")]
        prefix: Option<String>,

        /// Stop after this many rows
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Print the database with one table stably sorted by a field
    Sort {
        /// Database file
        file: PathBuf,

        /// Table to sort
        table: String,

        /// Field to sort by; rows lacking it sort first
        #[arg(long)]
        by: String,

        /// Sort in descending order
        #[arg(long)]
        reverse: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
