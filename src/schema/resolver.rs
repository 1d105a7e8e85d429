//! Resolution of the reserved `_tabledef` table
//!
//! `_tabledef` describes every other table, including rules for itself
//! that are never read from the file: it is first checked against the
//! hardcoded bootstrap definition, and only then trusted.

use serde_json::{Map, Value};

use crate::database::{
    is_valid_field_name, is_valid_table_name, raw, Database, DbError, DbResult, Table, TABLEDEF,
};

use super::types::{TableDef, TableDefs, NAME_FIELD};
use super::validator::check_rows;

/// Extracts and checks the per-table rule sets.
pub struct SchemaResolver;

impl SchemaResolver {
    /// Resolves the definitions of a raw database whose outer shape has
    /// already been checked. Returns the typed `_tabledef` alongside the
    /// rules so the caller does not convert it twice.
    pub fn resolve_raw(tables: &Map<String, Value>) -> DbResult<(Table, TableDefs)> {
        let value = tables.get(TABLEDEF).ok_or_else(DbError::tabledef_missing)?;
        let table = raw::table_from_value(TABLEDEF, value)?;
        let defs = Self::resolve_table(&table)?;
        Ok((table, defs))
    }

    /// Resolves the definitions of a typed database.
    pub fn resolve(db: &Database) -> DbResult<TableDefs> {
        let table = db.table(TABLEDEF).ok_or_else(DbError::tabledef_missing)?;
        Self::resolve_table(table)
    }

    /// Checks `_tabledef` against the bootstrap definition and builds one
    /// `TableDef` per row. The first error short-circuits.
    pub fn resolve_table(table: &Table) -> DbResult<TableDefs> {
        check_rows(TABLEDEF, table, &TableDef::bootstrap())?;

        let mut defs = TableDefs::with_capacity(table.len());
        for row in table.iter() {
            // Present on every row after the bootstrap check
            let name = row
                .get(NAME_FIELD)
                .ok_or_else(|| DbError::mandatory_field_missing(TABLEDEF, NAME_FIELD))?;

            if name == TABLEDEF {
                return Err(DbError::tabledef_self_definition());
            }
            if !is_valid_table_name(name) {
                return Err(DbError::invalid_table_name(name));
            }

            let def = TableDef::from_row(row);
            if let Some(field) = def
                .declared_fields()
                .chain(def.unique.iter().map(String::as_str))
                .find(|field| !is_valid_field_name(field))
            {
                return Err(DbError::invalid_field_name(name, field));
            }
            if let Some(field) = def.overlap() {
                return Err(DbError::optional_and_mandatory(name, field));
            }

            defs.insert(name.to_string(), def);
        }

        Ok(defs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{DbErrorCode, Row};
    use serde_json::json;

    fn resolve(value: Value) -> DbResult<TableDefs> {
        let tables = value.as_object().cloned().unwrap_or_default();
        SchemaResolver::resolve_raw(&tables).map(|(_, defs)| defs)
    }

    #[test]
    fn test_missing_tabledef() {
        let err = resolve(json!({"tag": []})).unwrap_err();
        assert_eq!(err.to_string(), "table \"_tabledef\" is missing");
    }

    #[test]
    fn test_resolves_definitions() {
        let defs = resolve(json!({
            "_tabledef": [
                {"name": "tag", "mandatory": ["name", "title"], "optional": "main", "unique": ["name"]},
                {"name": "link"}
            ]
        }))
        .unwrap();

        assert_eq!(defs.len(), 2);
        let tag = &defs["tag"];
        assert_eq!(tag.mandatory, vec!["name", "title"]);
        assert_eq!(tag.optional, vec!["main"]);
        assert_eq!(tag.unique, vec!["name"]);
        assert_eq!(defs["link"], TableDef::default());
    }

    #[test]
    fn test_tabledef_checked_against_bootstrap() {
        let err = resolve(json!({"_tabledef": [{"mandatory": ["a"]}]})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "mandatory field \"name\" in table \"_tabledef\" is missing"
        );

        let err = resolve(json!({"_tabledef": [{"name": "a", "fields": "x"}]})).unwrap_err();
        assert_eq!(err.to_string(), "extra field \"fields\" in table \"_tabledef\"");
    }

    #[test]
    fn test_duplicate_definition() {
        let err = resolve(json!({
            "_tabledef": [{"name": "link"}, {"name": " link"}]
        }))
        .unwrap_err();
        assert_eq!(err.to_string(), "field \"name\" in table \"_tabledef\" isn't unique");
    }

    #[test]
    fn test_self_definition_rejected() {
        let err = resolve(json!({"_tabledef": [{"name": "_tabledef"}]})).unwrap_err();
        assert_eq!(err.to_string(), "can't define \"_tabledef\" in table \"_tabledef\"");
    }

    #[test]
    fn test_invalid_defined_table_name() {
        let err = resolve(json!({"_tabledef": [{"name": "bad-name"}]})).unwrap_err();
        assert_eq!(err.code(), DbErrorCode::InvalidTableName);
    }

    #[test]
    fn test_invalid_listed_field_name() {
        let err = resolve(json!({
            "_tabledef": [{"name": "tag", "optional": ["ok", "_bad"]}]
        }))
        .unwrap_err();
        assert_eq!(err.to_string(), "invalid field name \"_bad\" in table \"tag\"");
    }

    #[test]
    fn test_optional_and_mandatory() {
        let err = resolve(json!({
            "_tabledef": [{"name": "link", "mandatory": ["title", "url"], "optional": ["url"]}]
        }))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "field \"url\" in table \"link\" can't be optional and mandatory"
        );
    }

    #[test]
    fn test_tabledef_structure() {
        let err = resolve(json!({"_tabledef": {"name": "tag"}})).unwrap_err();
        assert_eq!(err.to_string(), "structure of table \"_tabledef\" not valid");
    }

    #[test]
    fn test_resolve_typed_database() {
        let db = Database::new().with_table(
            TABLEDEF,
            vec![Row::new().with("name", "tag").with("mandatory", "name")],
        );
        let defs = SchemaResolver::resolve(&db).unwrap();
        assert!(defs["tag"].is_mandatory("name"));

        let err = SchemaResolver::resolve(&Database::new()).unwrap_err();
        assert_eq!(err.code(), DbErrorCode::TabledefMissing);
    }
}
