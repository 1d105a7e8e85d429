//! Table-level consumers of a validated database
//!
//! - `TableIter`: runs a caller body once per row, with records or
//!   `prefix + field` bindings, and honours `RowFlow` outcomes
//! - `TableSorter`: stable, fallible reordering behind
//!   `Database::sort_table`
//!
//! Neither mutates the database it reads.

mod iterator;
mod sorter;

pub use iterator::{Bindings, Projection, Record, RowFlow, TableIter};
pub use sorter::TableSorter;
