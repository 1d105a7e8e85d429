//! Database value types
//!
//! - `Row`: ordered field name -> string value record
//! - `Table`: ordered sequence of rows
//! - `Database`: ordered mapping of table name -> table
//!
//! Values are persistent: tables sit behind an `Arc`, and operations that
//! change a table build a new `Database` sharing every untouched table.

use std::sync::Arc;

use serde_json::{Map, Value};

/// Name of the reserved schema table
pub const TABLEDEF: &str = "_tabledef";

/// A single record. Field order is the order fields were inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    fields: Vec<(String, String)>,
}

impl Row {
    /// Creates an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    /// Sets `field`, replacing the value in place if it is already present.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((field, value)),
        }
    }

    /// Returns the value of `field`
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    /// Returns true if the row has `field`
    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Reads `field` as a list literal: whitespace-separated words.
    /// An absent field is an empty list.
    pub fn list(&self, field: &str) -> Vec<&str> {
        self.get(field)
            .map(|value| value.split_whitespace().collect())
            .unwrap_or_default()
    }

    /// Field names in row order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// (field, value) pairs in row order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn to_value(&self) -> Value {
        let object: Map<String, Value> = self
            .fields
            .iter()
            .map(|(name, value)| (name.clone(), Value::String(value.clone())))
            .collect();
        Value::Object(object)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (field, value) in iter {
            row.insert(field, value);
        }
        row
    }
}

/// An ordered sequence of rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn to_value(&self) -> Value {
        Value::Array(self.rows.iter().map(Row::to_value).collect())
    }
}

impl From<Vec<Row>> for Table {
    fn from(rows: Vec<Row>) -> Self {
        Self::new(rows)
    }
}

/// An ordered collection of named tables.
///
/// Insertion order is the canonical traversal order: validation reports
/// the first error in this order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Database {
    tables: Vec<(String, Arc<Table>)>,
}

impl Database {
    /// Creates an empty database
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with_table(mut self, name: impl Into<String>, table: impl Into<Table>) -> Self {
        self.insert(name, table.into());
        self
    }

    /// Adds `table` under `name`, replacing an existing table of that name
    /// in place.
    pub fn insert(&mut self, name: impl Into<String>, table: Table) {
        self.insert_shared(name.into(), Arc::new(table));
    }

    fn insert_shared(&mut self, name: String, table: Arc<Table>) {
        match self.tables.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = table,
            None => self.tables.push((name, table)),
        }
    }

    /// Returns the table called `name`
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, table)| table.as_ref())
    }

    /// Returns true if the database has a table called `name`
    pub fn contains_table(&self, name: &str) -> bool {
        self.table(name).is_some()
    }

    /// Table names in insertion order
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|(name, _)| name.as_str())
    }

    /// (name, table) pairs in insertion order
    pub fn tables(&self) -> impl Iterator<Item = (&str, &Table)> {
        self.tables
            .iter()
            .map(|(name, table)| (name.as_str(), table.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Returns a new database with `name` replaced by `table`.
    /// Every other table is shared with `self`, which stays untouched.
    pub fn replace_table(&self, name: &str, table: Table) -> Database {
        let mut next = self.clone();
        next.insert_shared(name.to_string(), Arc::new(table));
        next
    }

    /// Converts back to the literal shape the reader accepts: an object
    /// of tables, each an array of objects of strings.
    pub fn to_value(&self) -> Value {
        let object: Map<String, Value> = self
            .tables
            .iter()
            .map(|(name, table)| (name.clone(), table.to_value()))
            .collect();
        Value::Object(object)
    }
}
