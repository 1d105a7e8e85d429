//! CLI module for tabledb
//!
//! Provides command-line interface for:
//! - check: validate a database file
//! - tables: list tables and row counts
//! - list: print the rows of one table
//! - sort: print the database with one table sorted

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command};
pub use commands::{check, list, run, run_command, sort, tables, ListOptions};
pub use config::Config;
pub use errors::{CliError, CliResult};
