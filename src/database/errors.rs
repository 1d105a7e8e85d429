//! Database error types
//!
//! Every error carries a code, the category it belongs to, and the
//! canonical message. The message text is a compatibility surface:
//! callers match on it, so `Display` renders it verbatim.
//!
//! Categories:
//! - Structural (outer / table / row shape)
//! - Schema (`_tabledef` inconsistencies)
//! - Constraint (mandatory / unique / extra field)
//! - Name (invalid identifiers)
//! - Lookup (unknown table, missing bound field)
//! - Io (delegated from reading and parsing)

use std::fmt;

use super::types::TABLEDEF;

/// Error category, one per failure family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Shape mismatch at outer, table or row level
    Structural,
    /// Inconsistent `_tabledef`
    Schema,
    /// Mandatory, unique or extra-field violation
    Constraint,
    /// Invalid table or field identifier
    Name,
    /// Unknown table or missing field during iteration
    Lookup,
    /// File could not be read or parsed
    Io,
}

impl ErrorCategory {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Structural => "STRUCTURAL",
            ErrorCategory::Schema => "SCHEMA",
            ErrorCategory::Constraint => "CONSTRAINT",
            ErrorCategory::Name => "NAME",
            ErrorCategory::Lookup => "LOOKUP",
            ErrorCategory::Io => "IO",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Database error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbErrorCode {
    /// Root value is not a mapping of tables
    OuterStructure,
    /// Table value is not a sequence of rows
    TableStructure,
    /// Row value is not a record of scalar fields
    RowStructure,
    /// No `_tabledef` table
    TabledefMissing,
    /// Row lacks a mandatory field
    MandatoryFieldMissing,
    /// Unique field value repeats
    FieldNotUnique,
    /// `_tabledef` row names `_tabledef`
    TabledefSelfDefinition,
    /// Table name breaks the naming rule
    InvalidTableName,
    /// Field name breaks the naming rule
    InvalidFieldName,
    /// Row field not declared for its table
    ExtraField,
    /// Field listed as both mandatory and optional
    OptionalAndMandatory,
    /// Table has no `_tabledef` row
    NoTabledefEntry,
    /// Table lookup failed
    UnknownTable,
    /// Bound field absent from a row
    FieldMissingFromRow,
    /// File could not be read
    ReadFailed,
    /// File content is not a valid literal
    ParseFailed,
}

impl DbErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            DbErrorCode::OuterStructure => "TDB_OUTER_STRUCTURE",
            DbErrorCode::TableStructure => "TDB_TABLE_STRUCTURE",
            DbErrorCode::RowStructure => "TDB_ROW_STRUCTURE",
            DbErrorCode::TabledefMissing => "TDB_TABLEDEF_MISSING",
            DbErrorCode::MandatoryFieldMissing => "TDB_MANDATORY_FIELD_MISSING",
            DbErrorCode::FieldNotUnique => "TDB_FIELD_NOT_UNIQUE",
            DbErrorCode::TabledefSelfDefinition => "TDB_TABLEDEF_SELF_DEFINITION",
            DbErrorCode::InvalidTableName => "TDB_INVALID_TABLE_NAME",
            DbErrorCode::InvalidFieldName => "TDB_INVALID_FIELD_NAME",
            DbErrorCode::ExtraField => "TDB_EXTRA_FIELD",
            DbErrorCode::OptionalAndMandatory => "TDB_OPTIONAL_AND_MANDATORY",
            DbErrorCode::NoTabledefEntry => "TDB_NO_TABLEDEF_ENTRY",
            DbErrorCode::UnknownTable => "TDB_UNKNOWN_TABLE",
            DbErrorCode::FieldMissingFromRow => "TDB_FIELD_MISSING_FROM_ROW",
            DbErrorCode::ReadFailed => "TDB_READ_FAILED",
            DbErrorCode::ParseFailed => "TDB_PARSE_FAILED",
        }
    }

    /// Returns the category this code belongs to
    pub fn category(&self) -> ErrorCategory {
        match self {
            DbErrorCode::OuterStructure
            | DbErrorCode::TableStructure
            | DbErrorCode::RowStructure => ErrorCategory::Structural,
            DbErrorCode::TabledefMissing
            | DbErrorCode::TabledefSelfDefinition
            | DbErrorCode::OptionalAndMandatory
            | DbErrorCode::NoTabledefEntry => ErrorCategory::Schema,
            DbErrorCode::MandatoryFieldMissing
            | DbErrorCode::FieldNotUnique
            | DbErrorCode::ExtraField => ErrorCategory::Constraint,
            DbErrorCode::InvalidTableName | DbErrorCode::InvalidFieldName => ErrorCategory::Name,
            DbErrorCode::UnknownTable | DbErrorCode::FieldMissingFromRow => ErrorCategory::Lookup,
            DbErrorCode::ReadFailed | DbErrorCode::ParseFailed => ErrorCategory::Io,
        }
    }
}

impl fmt::Display for DbErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Database error with the location it refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbError {
    code: DbErrorCode,
    message: String,
    table: Option<String>,
    field: Option<String>,
    row: Option<usize>,
}

impl DbError {
    fn new(code: DbErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            table: None,
            field: None,
            row: None,
        }
    }

    fn in_table(mut self, table: &str) -> Self {
        self.table = Some(table.to_string());
        self
    }

    fn on_field(mut self, field: &str) -> Self {
        self.field = Some(field.to_string());
        self
    }

    pub fn outer_structure() -> Self {
        Self::new(
            DbErrorCode::OuterStructure,
            "outer structure of database not valid".into(),
        )
    }

    pub fn table_structure(table: &str) -> Self {
        Self::new(
            DbErrorCode::TableStructure,
            format!("structure of table \"{}\" not valid", table),
        )
        .in_table(table)
    }

    pub fn row_structure(table: &str, row: usize) -> Self {
        let mut err = Self::new(
            DbErrorCode::RowStructure,
            format!("structure of row {} in table \"{}\" not valid", row, table),
        )
        .in_table(table);
        err.row = Some(row);
        err
    }

    pub fn tabledef_missing() -> Self {
        Self::new(
            DbErrorCode::TabledefMissing,
            format!("table \"{}\" is missing", TABLEDEF),
        )
        .in_table(TABLEDEF)
    }

    pub fn mandatory_field_missing(table: &str, field: &str) -> Self {
        Self::new(
            DbErrorCode::MandatoryFieldMissing,
            format!("mandatory field \"{}\" in table \"{}\" is missing", field, table),
        )
        .in_table(table)
        .on_field(field)
    }

    pub fn field_not_unique(table: &str, field: &str) -> Self {
        Self::new(
            DbErrorCode::FieldNotUnique,
            format!("field \"{}\" in table \"{}\" isn't unique", field, table),
        )
        .in_table(table)
        .on_field(field)
    }

    pub fn tabledef_self_definition() -> Self {
        Self::new(
            DbErrorCode::TabledefSelfDefinition,
            format!("can't define \"{0}\" in table \"{0}\"", TABLEDEF),
        )
        .in_table(TABLEDEF)
    }

    pub fn invalid_table_name(table: &str) -> Self {
        Self::new(
            DbErrorCode::InvalidTableName,
            format!("invalid table name \"{}\"", table),
        )
        .in_table(table)
    }

    pub fn invalid_field_name(table: &str, field: &str) -> Self {
        Self::new(
            DbErrorCode::InvalidFieldName,
            format!("invalid field name \"{}\" in table \"{}\"", field, table),
        )
        .in_table(table)
        .on_field(field)
    }

    pub fn extra_field(table: &str, field: &str) -> Self {
        Self::new(
            DbErrorCode::ExtraField,
            format!("extra field \"{}\" in table \"{}\"", field, table),
        )
        .in_table(table)
        .on_field(field)
    }

    pub fn optional_and_mandatory(table: &str, field: &str) -> Self {
        Self::new(
            DbErrorCode::OptionalAndMandatory,
            format!(
                "field \"{}\" in table \"{}\" can't be optional and mandatory",
                field, table
            ),
        )
        .in_table(table)
        .on_field(field)
    }

    pub fn no_tabledef_entry(table: &str) -> Self {
        Self::new(
            DbErrorCode::NoTabledefEntry,
            format!("no entry for table \"{}\" in table \"{}\"", table, TABLEDEF),
        )
        .in_table(table)
    }

    pub fn unknown_table(table: &str) -> Self {
        Self::new(
            DbErrorCode::UnknownTable,
            format!("unknown table \"{}\" in database", table),
        )
        .in_table(table)
    }

    pub fn field_missing_from_row(field: &str) -> Self {
        Self::new(
            DbErrorCode::FieldMissingFromRow,
            format!("field \"{}\" missing from row", field),
        )
        .on_field(field)
    }

    pub fn read_failed(path: &str, reason: impl fmt::Display) -> Self {
        Self::new(
            DbErrorCode::ReadFailed,
            format!("can't read \"{}\": {}", path, reason),
        )
    }

    pub fn parse_failed(path: &str, reason: impl fmt::Display) -> Self {
        Self::new(
            DbErrorCode::ParseFailed,
            format!("can't parse \"{}\": {}", path, reason),
        )
    }

    /// Returns the error code
    pub fn code(&self) -> DbErrorCode {
        self.code
    }

    /// Returns the error category
    pub fn category(&self) -> ErrorCategory {
        self.code.category()
    }

    /// Returns the canonical message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the offending table, if any
    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    /// Returns the offending field, if any
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Returns the offending row index, if any
    pub fn row(&self) -> Option<usize> {
        self.row
    }
}

impl fmt::Display for DbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for DbError {}

/// Result type for database operations
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_messages() {
        assert_eq!(
            DbError::outer_structure().to_string(),
            "outer structure of database not valid"
        );
        assert_eq!(
            DbError::table_structure("tag").to_string(),
            "structure of table \"tag\" not valid"
        );
        assert_eq!(
            DbError::row_structure("tag", 3).to_string(),
            "structure of row 3 in table \"tag\" not valid"
        );
        assert_eq!(
            DbError::tabledef_missing().to_string(),
            "table \"_tabledef\" is missing"
        );
        assert_eq!(
            DbError::mandatory_field_missing("link", "title").to_string(),
            "mandatory field \"title\" in table \"link\" is missing"
        );
        assert_eq!(
            DbError::field_not_unique("_tabledef", "name").to_string(),
            "field \"name\" in table \"_tabledef\" isn't unique"
        );
        assert_eq!(
            DbError::tabledef_self_definition().to_string(),
            "can't define \"_tabledef\" in table \"_tabledef\""
        );
        assert_eq!(
            DbError::invalid_table_name("_x").to_string(),
            "invalid table name \"_x\""
        );
        assert_eq!(
            DbError::invalid_field_name("tag", "a_").to_string(),
            "invalid field name \"a_\" in table \"tag\""
        );
        assert_eq!(
            DbError::extra_field("tag", "priority").to_string(),
            "extra field \"priority\" in table \"tag\""
        );
        assert_eq!(
            DbError::optional_and_mandatory("link", "url").to_string(),
            "field \"url\" in table \"link\" can't be optional and mandatory"
        );
        assert_eq!(
            DbError::no_tabledef_entry("link").to_string(),
            "no entry for table \"link\" in table \"_tabledef\""
        );
        assert_eq!(
            DbError::unknown_table("nope").to_string(),
            "unknown table \"nope\" in database"
        );
        assert_eq!(
            DbError::field_missing_from_row("url").to_string(),
            "field \"url\" missing from row"
        );
    }

    #[test]
    fn test_categories() {
        assert_eq!(DbError::outer_structure().category(), ErrorCategory::Structural);
        assert_eq!(DbError::tabledef_missing().category(), ErrorCategory::Schema);
        assert_eq!(
            DbError::extra_field("t", "f").category(),
            ErrorCategory::Constraint
        );
        assert_eq!(DbError::invalid_table_name("_").category(), ErrorCategory::Name);
        assert_eq!(DbError::unknown_table("t").category(), ErrorCategory::Lookup);
        assert_eq!(
            DbError::read_failed("db.json", "gone").category(),
            ErrorCategory::Io
        );
    }

    #[test]
    fn test_location_accessors() {
        let err = DbError::row_structure("tag", 2);
        assert_eq!(err.table(), Some("tag"));
        assert_eq!(err.row(), Some(2));
        assert_eq!(err.field(), None);

        let err = DbError::field_not_unique("tag", "name");
        assert_eq!(err.field(), Some("name"));
        assert_eq!(err.code().code(), "TDB_FIELD_NOT_UNIQUE");
    }
}
