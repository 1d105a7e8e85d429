//! Controlled iteration over the rows of one table
//!
//! The caller's body runs once per row and answers with a `RowFlow`:
//! `Continue` and `Skip` move on, `Stop` ends the loop cleanly, and
//! `Return(value)` ends it and hands `value` back to the caller. Errors
//! returned by the body pass through `?` untouched, so an error raised
//! inside the loop is indistinguishable from one raised by the caller.
//!
//! Two projections are offered:
//! - records (`TableIter::records`): requested fields in requested order,
//!   absent fields read as empty strings
//! - bindings (`TableIter::bind`): one `prefix + field` binding per field,
//!   an absent field aborts with `field "F" missing from row`

use crate::database::{Database, DbError, Row, Table};

/// Outcome of one run of the per-row body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowFlow<T> {
    /// Go on with the next row
    Continue,
    /// Move on without further work on this row; same as `Continue`
    Skip,
    /// End the loop without error; no further rows are visited
    Stop,
    /// End the loop and return this value from the iteration
    Return(T),
}

/// Which fields a record carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection<'a> {
    /// Every field present in the row, in row order
    All,
    /// Exactly these fields, in this order
    Fields(&'a [&'a str]),
}

/// One projected row in records mode.
///
/// Field order is the requested order, independent of row storage order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    name: String,
    fields: Vec<(String, String)>,
}

impl Record {
    /// Record name: the prefix, which defaults to the table name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of `field`, if it was requested
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    /// Field names in projection order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// (field, value) pairs in projection order
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
}

/// Per-row bindings in binding mode, keyed `prefix + field`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bindings {
    prefix: String,
    values: Vec<(String, String)>,
}

impl Bindings {
    /// Value bound under `key` (`prefix + field`)
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// Value bound for `field`, looked up through the prefix
    pub fn field(&self, field: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(name, _)| {
                name.strip_prefix(self.prefix.as_str()) == Some(field)
            })
            .map(|(_, value)| value.as_str())
    }

    /// Binding prefix in effect
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// (key, value) pairs in requested field order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

/// Iteration over one table of a database.
///
/// Built with `Database::iter_table`; nothing is looked up until a
/// `records` or `bind` call runs.
#[derive(Debug, Clone)]
pub struct TableIter<'a> {
    db: &'a Database,
    table: &'a str,
    projection: Projection<'a>,
    prefix: Option<&'a str>,
}

impl<'a> TableIter<'a> {
    pub fn new(db: &'a Database, table: &'a str) -> Self {
        Self {
            db,
            table,
            projection: Projection::All,
            prefix: None,
        }
    }

    /// Limits records to `fields`, in that order
    pub fn select(mut self, fields: &'a [&'a str]) -> Self {
        self.projection = Projection::Fields(fields);
        self
    }

    /// Sets the record projection
    pub fn projection(mut self, projection: Projection<'a>) -> Self {
        self.projection = projection;
        self
    }

    /// Overrides the record name / binding prefix (default: table name)
    pub fn prefix(mut self, prefix: &'a str) -> Self {
        self.prefix = Some(prefix);
        self
    }

    fn lookup<E: From<DbError>>(&self) -> Result<&'a Table, E> {
        self.db
            .table(self.table)
            .ok_or_else(|| DbError::unknown_table(self.table).into())
    }

    fn prefix_or_table(&self) -> &'a str {
        self.prefix.unwrap_or(self.table)
    }

    /// Runs `body` once per row with the projected record.
    ///
    /// Returns `Ok(Some(value))` when the body returned
    /// `RowFlow::Return(value)`, `Ok(None)` when the rows ran out or the
    /// body stopped, and the body's own error otherwise.
    pub fn records<T, E, F>(self, mut body: F) -> Result<Option<T>, E>
    where
        E: From<DbError>,
        F: FnMut(&Record) -> Result<RowFlow<T>, E>,
    {
        let table = self.lookup::<E>()?;
        let name = self.prefix_or_table();

        for row in table.iter() {
            let record = project(name, row, self.projection);
            match body(&record)? {
                RowFlow::Continue | RowFlow::Skip => {}
                RowFlow::Stop => break,
                RowFlow::Return(value) => return Ok(Some(value)),
            }
        }

        Ok(None)
    }

    /// Runs `body` once per row with `prefix + field` bindings for each
    /// of `fields`. A row lacking one of them aborts the loop with
    /// `field "F" missing from row` before the body sees that row.
    pub fn bind<T, E, F>(self, fields: &[&str], mut body: F) -> Result<Option<T>, E>
    where
        E: From<DbError>,
        F: FnMut(&Bindings) -> Result<RowFlow<T>, E>,
    {
        let table = self.lookup::<E>()?;
        let prefix = self.prefix_or_table();

        for row in table.iter() {
            let bindings = bind_row(prefix, row, fields)?;
            match body(&bindings)? {
                RowFlow::Continue | RowFlow::Skip => {}
                RowFlow::Stop => break,
                RowFlow::Return(value) => return Ok(Some(value)),
            }
        }

        Ok(None)
    }
}

fn project(name: &str, row: &Row, projection: Projection<'_>) -> Record {
    let fields = match projection {
        Projection::All => row
            .iter()
            .map(|(field, value)| (field.to_string(), value.to_string()))
            .collect(),
        Projection::Fields(fields) => fields
            .iter()
            .map(|field| (field.to_string(), row.get(field).unwrap_or("").to_string()))
            .collect(),
    };
    Record {
        name: name.to_string(),
        fields,
    }
}

fn bind_row(prefix: &str, row: &Row, fields: &[&str]) -> Result<Bindings, DbError> {
    let values = fields
        .iter()
        .map(|field| {
            row.get(field)
                .map(|value| (format!("{}{}", prefix, field), value.to_string()))
                .ok_or_else(|| DbError::field_missing_from_row(field))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Bindings {
        prefix: prefix.to_string(),
        values,
    })
}

impl Database {
    /// Starts an iteration over `table`.
    pub fn iter_table<'a>(&'a self, table: &'a str) -> TableIter<'a> {
        TableIter::new(self, table)
    }
}
