//! Table validation against resolved table definitions
//!
//! Checks per table, in order:
//! - table name is valid
//! - table value is a sequence of record-shaped rows
//! - table has a `_tabledef` entry
//! - each row: field names valid, mandatory fields present, no extra
//!   fields, unique fields not repeated
//!
//! Validation is fail-fast. The first error in traversal order
//! (table, then row, then field) is returned; nothing is aggregated.

use std::collections::HashSet;

use serde_json::Value;

use crate::database::{
    is_valid_field_name, is_valid_table_name, raw, DbError, DbResult, Table,
};

use super::types::{TableDef, TableDefs};

/// Validates tables against a resolved rule set.
///
/// The validator never mutates what it checks.
pub struct Validator<'a> {
    defs: &'a TableDefs,
}

impl<'a> Validator<'a> {
    /// Creates a validator backed by the given definitions.
    pub fn new(defs: &'a TableDefs) -> Self {
        Self { defs }
    }

    /// Validates a raw table value and returns it in typed form.
    ///
    /// The name is checked before the shape, and the shape before the
    /// table's `_tabledef` entry is looked up.
    pub fn validate_raw_table(&self, name: &str, value: &Value) -> DbResult<Table> {
        check_table_name(name)?;
        let table = raw::table_from_value(name, value)?;
        self.check_entry_and_rows(name, &table)?;
        Ok(table)
    }

    /// Validates an already typed table.
    pub fn validate_table(&self, name: &str, table: &Table) -> DbResult<()> {
        check_table_name(name)?;
        self.check_entry_and_rows(name, table)
    }

    fn check_entry_and_rows(&self, name: &str, table: &Table) -> DbResult<()> {
        let def = self
            .defs
            .get(name)
            .ok_or_else(|| DbError::no_tabledef_entry(name))?;
        check_rows(name, table, def)
    }
}

fn check_table_name(name: &str) -> DbResult<()> {
    if is_valid_table_name(name) {
        Ok(())
    } else {
        Err(DbError::invalid_table_name(name))
    }
}

/// Checks every row of `table` against `def`.
///
/// Shared by the schema resolver, which runs it over `_tabledef` with the
/// bootstrap definition.
pub(crate) fn check_rows(name: &str, table: &Table, def: &TableDef) -> DbResult<()> {
    // One set of seen (trimmed) values per unique field, in declaration order
    let mut seen: Vec<HashSet<&str>> = vec![HashSet::new(); def.unique.len()];

    for row in table.iter() {
        for field in row.field_names() {
            if !is_valid_field_name(field) {
                return Err(DbError::invalid_field_name(name, field));
            }
        }

        for field in &def.mandatory {
            if !row.contains(field) {
                return Err(DbError::mandatory_field_missing(name, field));
            }
        }

        for field in row.field_names() {
            if !def.is_declared(field) {
                return Err(DbError::extra_field(name, field));
            }
        }

        for (field, values) in def.unique.iter().zip(seen.iter_mut()) {
            if let Some(value) = row.get(field) {
                if !values.insert(value.trim()) {
                    return Err(DbError::field_not_unique(name, field));
                }
            }
        }
    }

    Ok(())
}
