//! Schema subsystem
//!
//! The reserved `_tabledef` table describes every other table. It is
//! resolved first (against a fixed bootstrap definition), and the
//! resulting rule sets then drive validation of the remaining tables.
//!
//! # Design Principles
//!
//! - The bootstrap definition is constant, never read from user data
//! - Fail-fast: the first error in traversal order wins
//! - Validation is read-only and deterministic

mod resolver;
mod types;
mod validator;

pub use resolver::SchemaResolver;
pub use types::{TableDef, TableDefs, MANDATORY_FIELD, NAME_FIELD, OPTIONAL_FIELD, UNIQUE_FIELD};
pub use validator::Validator;
