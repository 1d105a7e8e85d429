//! Read and validate operations
//!
//! Flow: file bytes -> serde_json literal -> outer shape check ->
//! `_tabledef` resolution -> per-table validation -> `Database`.
//! Read and parse failures surface unchanged as `Io` category errors.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde_json::Value;

use crate::observability::{log_event_with_fields, Event};
use crate::schema::{SchemaResolver, Validator};

use super::errors::{DbError, DbResult};
use super::raw;
use super::types::{Database, TABLEDEF};

/// Reads, parses and validates the database file at `path`.
pub fn read(path: impl AsRef<Path>) -> DbResult<Database> {
    let path = path.as_ref();
    let shown = path.display().to_string();

    let text = fs::read_to_string(path).map_err(|e| DbError::read_failed(&shown, e))?;
    log_event_with_fields(
        Event::DatabaseRead,
        &[("path", shown.as_str()), ("bytes", text.len().to_string().as_str())],
    );

    let value = parse_str(&shown, &text)?;
    load(&value)
}

/// Parses database text. `origin` names the source in error messages.
pub fn parse_str(origin: &str, text: &str) -> DbResult<Value> {
    let value = serde_json::from_str(text).map_err(|e| DbError::parse_failed(origin, e))?;
    log_event_with_fields(Event::DatabaseParsed, &[("origin", origin)]);
    Ok(value)
}

/// Validates an already parsed literal and returns it as a `Database`.
pub fn load(value: &Value) -> DbResult<Database> {
    let result = load_tables(value);
    match &result {
        Ok(db) => log_event_with_fields(
            Event::ValidationPassed,
            &[("tables", db.len().to_string().as_str())],
        ),
        Err(e) => log_event_with_fields(
            Event::ValidationFailed,
            &[("code", e.code().code()), ("message", e.message())],
        ),
    }
    result
}

/// Validates an already parsed literal. `Ok(())` means the value would
/// load; otherwise the first error in traversal order is returned.
pub fn validate(value: &Value) -> DbResult<()> {
    load(value).map(|_| ())
}

fn load_tables(value: &Value) -> DbResult<Database> {
    let tables = raw::outer_tables(value)?;

    let (tabledef, defs) = SchemaResolver::resolve_raw(tables)?;
    log_event_with_fields(Event::SchemaResolved, &[("tables", defs.len().to_string().as_str())]);

    let validator = Validator::new(&defs);
    let mut db = Database::new();
    let mut tabledef = Some(tabledef);

    for (name, value) in tables {
        if name == TABLEDEF {
            // Checked by the resolver already
            if let Some(table) = tabledef.take() {
                db.insert(name.as_str(), table);
            }
            continue;
        }
        let table = validator.validate_raw_table(name, value)?;
        db.insert(name.as_str(), table);
    }

    Ok(db)
}

impl Database {
    /// Re-validates this database: `_tabledef` against the bootstrap
    /// definition, then every other table in order.
    pub fn validate(&self) -> DbResult<()> {
        let defs = SchemaResolver::resolve(self)?;
        let validator = Validator::new(&defs);

        for (name, table) in self.tables() {
            if name == TABLEDEF {
                continue;
            }
            validator.validate_table(name, table)?;
        }

        Ok(())
    }
}

impl FromStr for Database {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        load(&parse_str("<string>", s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{DbErrorCode, ErrorCategory, Row};
    use serde_json::json;
    use tempfile::TempDir;

    fn sample() -> Value {
        json!({
            "_tabledef": [
                {"name": "tag", "mandatory": ["name", "title"], "optional": ["main"], "unique": ["name"]},
                {"name": "link", "mandatory": ["title"], "optional": ["url", "tags"]}
            ],
            "tag": [
                {"name": "cooking", "title": "How to Cook", "main": true},
                {"name": "mechanics", "title": "How to Make Things", "main": true},
                {"name": "article", "title": "An Article", "main": false}
            ],
            "link": [
                {"title": "Bread", "url": "http://bread.example", "tags": ["cooking"]}
            ]
        })
    }

    #[test]
    fn test_load_keeps_table_order() {
        let db = load(&sample()).unwrap();
        assert_eq!(db.table_names().collect::<Vec<_>>(), vec!["_tabledef", "tag", "link"]);
        assert_eq!(db.table("tag").unwrap().len(), 3);
        assert_eq!(
            db.table("tag").unwrap().rows()[2].get("main"),
            Some("false")
        );
    }

    #[test]
    fn test_outer_checked_first() {
        let err = validate(&json!(["_tabledef"])).unwrap_err();
        assert_eq!(err.code(), DbErrorCode::OuterStructure);
    }

    #[test]
    fn test_tabledef_resolved_before_other_tables() {
        // "tag" comes first in the file but _tabledef errors win
        let value = json!({
            "tag": "broken",
            "_tabledef": [{"name": "_tabledef"}]
        });
        let err = validate(&value).unwrap_err();
        assert_eq!(err.code(), DbErrorCode::OuterStructure);

        let value = json!({
            "tag": {"broken": true},
            "_tabledef": [{"name": "_tabledef"}]
        });
        let err = validate(&value).unwrap_err();
        assert_eq!(err.code(), DbErrorCode::TabledefSelfDefinition);
    }

    #[test]
    fn test_tables_checked_in_file_order() {
        let mut value = sample();
        value["tag"][0]["priority"] = json!("high");
        value["link"][0]["colour"] = json!("red");
        let err = validate(&value).unwrap_err();
        assert_eq!(err.to_string(), "extra field \"priority\" in table \"tag\"");
    }

    #[test]
    fn test_table_without_entry() {
        let mut value = sample();
        value["note"] = json!([]);
        let err = validate(&value).unwrap_err();
        assert_eq!(err.to_string(), "no entry for table \"note\" in table \"_tabledef\"");
    }

    #[test]
    fn test_revalidate_loaded_database() {
        let db = load(&sample()).unwrap();
        assert!(db.validate().is_ok());
        assert!(db.validate().is_ok());
    }

    #[test]
    fn test_revalidate_catches_edits() {
        let db = load(&sample()).unwrap();
        let broken = db.replace_table(
            "link",
            vec![Row::new().with("url", "http://x")].into(),
        );
        let err = broken.validate().unwrap_err();
        assert_eq!(err.to_string(), "mandatory field \"title\" in table \"link\" is missing");
        assert!(db.validate().is_ok());
    }

    #[test]
    fn test_from_str() {
        let db: Database = sample().to_string().parse().unwrap();
        assert_eq!(db.len(), 3);

        let err = "{not json".parse::<Database>().unwrap_err();
        assert_eq!(err.code(), DbErrorCode::ParseFailed);
        assert_eq!(err.category(), ErrorCategory::Io);
    }

    #[test]
    fn test_read_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("site.json");
        fs::write(&path, serde_json::to_string_pretty(&sample()).unwrap()).unwrap();

        let db = read(&path).unwrap();
        assert_eq!(db.table("link").unwrap().rows()[0].get("tags"), Some("cooking"));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read(dir.path().join("absent.json")).unwrap_err();
        assert_eq!(err.code(), DbErrorCode::ReadFailed);
        assert!(err.message().starts_with("can't read"));
    }
}
