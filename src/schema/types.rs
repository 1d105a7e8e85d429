//! Table definitions
//!
//! A `TableDef` is the rule set for one table: which fields are
//! mandatory, which are optional, and which must hold unique values.
//! Field lists keep declaration order so checks run deterministically.

use std::collections::HashMap;

use crate::database::Row;

/// Fields of a `_tabledef` row
pub const NAME_FIELD: &str = "name";
pub const MANDATORY_FIELD: &str = "mandatory";
pub const OPTIONAL_FIELD: &str = "optional";
pub const UNIQUE_FIELD: &str = "unique";

/// Rule set for one table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableDef {
    /// Fields every row must carry
    pub mandatory: Vec<String>,
    /// Fields a row may carry
    pub optional: Vec<String>,
    /// Fields whose trimmed values are pairwise distinct
    pub unique: Vec<String>,
}

impl TableDef {
    /// Creates a definition from field lists, dropping repeated entries.
    pub fn new<S: AsRef<str>>(mandatory: &[S], optional: &[S], unique: &[S]) -> Self {
        Self {
            mandatory: dedup(mandatory),
            optional: dedup(optional),
            unique: dedup(unique),
        }
    }

    /// The fixed definition `_tabledef` is checked against before it is
    /// trusted. Never derived from the database being validated.
    pub fn bootstrap() -> Self {
        Self::new(
            &[NAME_FIELD],
            &[MANDATORY_FIELD, OPTIONAL_FIELD, UNIQUE_FIELD],
            &[NAME_FIELD],
        )
    }

    /// Builds a definition from a `_tabledef` row. Absent lists are empty.
    pub fn from_row(row: &Row) -> Self {
        Self::new(
            &row.list(MANDATORY_FIELD),
            &row.list(OPTIONAL_FIELD),
            &row.list(UNIQUE_FIELD),
        )
    }

    pub fn is_mandatory(&self, field: &str) -> bool {
        self.mandatory.iter().any(|f| f == field)
    }

    pub fn is_optional(&self, field: &str) -> bool {
        self.optional.iter().any(|f| f == field)
    }

    /// Returns true if rows of this table may carry `field`
    pub fn is_declared(&self, field: &str) -> bool {
        self.is_mandatory(field) || self.is_optional(field)
    }

    /// First mandatory field that is also optional, in declaration order
    pub fn overlap(&self) -> Option<&str> {
        self.mandatory
            .iter()
            .find(|field| self.is_optional(field))
            .map(String::as_str)
    }

    /// Every field a row may carry: mandatory first, then optional.
    pub fn declared_fields(&self) -> impl Iterator<Item = &str> {
        self.mandatory
            .iter()
            .chain(self.optional.iter())
            .map(String::as_str)
    }
}

fn dedup<S: AsRef<str>>(fields: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(fields.len());
    for field in fields {
        let field = field.as_ref();
        if !out.iter().any(|f| f == field) {
            out.push(field.to_string());
        }
    }
    out
}

/// Resolved rule sets, keyed by table name
pub type TableDefs = HashMap<String, TableDef>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_definition() {
        let def = TableDef::bootstrap();
        assert_eq!(def.mandatory, vec!["name"]);
        assert_eq!(def.optional, vec!["mandatory", "optional", "unique"]);
        assert_eq!(def.unique, vec!["name"]);
        assert!(def.overlap().is_none());
    }

    #[test]
    fn test_from_row_defaults_to_empty() {
        let def = TableDef::from_row(&Row::new().with("name", "tag"));
        assert!(def.mandatory.is_empty());
        assert!(def.optional.is_empty());
        assert!(def.unique.is_empty());
    }

    #[test]
    fn test_from_row_reads_lists() {
        let row = Row::new()
            .with("name", "tag")
            .with("mandatory", "name title")
            .with("optional", "main main")
            .with("unique", "name");
        let def = TableDef::from_row(&row);
        assert_eq!(def.mandatory, vec!["name", "title"]);
        assert_eq!(def.optional, vec!["main"]);
        assert!(def.is_declared("main"));
        assert!(!def.is_declared("priority"));
        assert_eq!(
            def.declared_fields().collect::<Vec<_>>(),
            vec!["name", "title", "main"]
        );
    }

    #[test]
    fn test_overlap_reports_first_in_mandatory_order() {
        let def = TableDef::new(&["a", "b", "c"], &["c", "b"], &[]);
        assert_eq!(def.overlap(), Some("b"));
    }
}
