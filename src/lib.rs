//! tabledb - a strict, human-editable text database
//!
//! A database is a set of named tables of string records, described by
//! its own reserved `_tabledef` table. Loading validates the whole value
//! up front; iteration and sorting then work on the validated, immutable
//! `Database`.
//!
//! ```ignore
//! use tabledb::database;
//! use tabledb::table::RowFlow;
//!
//! let db = database::read("site.json")?;
//! db.iter_table("tag").select(&["name", "title"]).records(|tag| {
//!     println!("{} {}", tag.get("name").unwrap_or(""), tag.get("title").unwrap_or(""));
//!     Ok::<_, database::DbError>(RowFlow::<()>::Continue)
//! })?;
//! ```

pub mod cli;
pub mod database;
pub mod observability;
pub mod schema;
pub mod table;
