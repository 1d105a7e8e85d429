//! Database subsystem
//!
//! A database is a mapping of named tables, each an ordered sequence of
//! rows of string fields. It is self-describing: the reserved
//! `_tabledef` table holds the rules for every other table.
//!
//! # Operations
//!
//! - `read`: file path -> validated `Database`
//! - `load`: parsed literal -> validated `Database`
//! - `validate`: parsed literal -> first error, if any
//!
//! Databases are immutable values. Transformations such as
//! `Database::sort_table` return a new database and leave the input alone.

mod errors;
mod names;
pub(crate) mod raw;
mod reader;
mod types;

pub use errors::{DbError, DbErrorCode, DbResult, ErrorCategory};
pub use names::{is_valid_field_name, is_valid_table_name};
pub use reader::{load, parse_str, read, validate};
pub use types::{Database, Row, Table, TABLEDEF};
