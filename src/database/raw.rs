//! Structural conversion from the parsed literal to typed tables
//!
//! Accepted shape:
//! - root: object of tables, each member an array or object
//! - table: array of rows
//! - row: object whose values are scalars or arrays of scalars
//!
//! Scalars keep their literal text. Arrays are list literals and are
//! stored joined by single spaces, so `["a", "b"]` and `"a b"` read the
//! same through `Row::list`.

use serde_json::{Map, Value};

use super::errors::{DbError, DbResult};
use super::types::{Row, Table};

/// Checks the outer shape and returns the tables in file order.
pub(crate) fn outer_tables(value: &Value) -> DbResult<&Map<String, Value>> {
    let tables = value.as_object().ok_or_else(DbError::outer_structure)?;

    if tables
        .values()
        .any(|table| !(table.is_array() || table.is_object()))
    {
        return Err(DbError::outer_structure());
    }

    Ok(tables)
}

/// Converts one table value, reporting the first malformed row.
pub(crate) fn table_from_value(name: &str, value: &Value) -> DbResult<Table> {
    let rows = value
        .as_array()
        .ok_or_else(|| DbError::table_structure(name))?;

    rows.iter()
        .enumerate()
        .map(|(index, row)| row_from_value(name, index, row))
        .collect::<DbResult<Vec<_>>>()
        .map(Table::new)
}

fn row_from_value(table: &str, index: usize, value: &Value) -> DbResult<Row> {
    let fields = value
        .as_object()
        .ok_or_else(|| DbError::row_structure(table, index))?;

    let mut row = Row::new();
    for (field, value) in fields {
        let text = field_text(value).ok_or_else(|| DbError::row_structure(table, index))?;
        row.insert(field.as_str(), text);
    }
    Ok(row)
}

fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(scalar_text)
            .collect::<Option<Vec<_>>>()
            .map(|words| words.join(" ")),
        other => scalar_text(other),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_outer_must_be_object() {
        for value in [json!([]), json!("db"), json!(null), json!(1)] {
            let err = outer_tables(&value).unwrap_err();
            assert_eq!(err.to_string(), "outer structure of database not valid");
        }
    }

    #[test]
    fn test_outer_members_must_be_containers() {
        let value = json!({"_tabledef": [], "tag": "cooking"});
        assert_eq!(
            outer_tables(&value).unwrap_err().to_string(),
            "outer structure of database not valid"
        );
    }

    #[test]
    fn test_outer_keeps_file_order() {
        let value: Value = serde_json::from_str(r#"{"zz": [], "_tabledef": [], "aa": {}}"#).unwrap();
        let names: Vec<_> = outer_tables(&value).unwrap().keys().cloned().collect();
        assert_eq!(names, vec!["zz", "_tabledef", "aa"]);
    }

    #[test]
    fn test_table_must_be_array() {
        let err = table_from_value("tag", &json!({"name": "x"})).unwrap_err();
        assert_eq!(err.to_string(), "structure of table \"tag\" not valid");
    }

    #[test]
    fn test_row_must_be_object() {
        let err = table_from_value("tag", &json!([{"name": "a"}, "b"])).unwrap_err();
        assert_eq!(err.to_string(), "structure of row 1 in table \"tag\" not valid");
        assert_eq!(err.row(), Some(1));
    }

    #[test]
    fn test_row_values_must_be_scalars() {
        for bad in [json!(null), json!({"x": 1}), json!([["nested"]]), json!([null])] {
            let err = table_from_value("tag", &json!([{"name": bad}])).unwrap_err();
            assert_eq!(err.to_string(), "structure of row 0 in table \"tag\" not valid");
        }
    }

    #[test]
    fn test_scalar_and_list_text() {
        let table = table_from_value(
            "tag",
            &json!([{"name": "cooking", "main": true, "rank": 3, "tags": ["a", 1, false]}]),
        )
        .unwrap();
        let row = &table.rows()[0];
        assert_eq!(row.get("name"), Some("cooking"));
        assert_eq!(row.get("main"), Some("true"));
        assert_eq!(row.get("rank"), Some("3"));
        assert_eq!(row.get("tags"), Some("a 1 false"));
        assert_eq!(row.list("tags"), vec!["a", "1", "false"]);
    }
}
