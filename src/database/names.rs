//! Identifier rules for tables and fields
//!
//! Both kinds of name match `[A-Za-z0-9][A-Za-z0-9_]*` and never end in
//! `_`. Field names additionally never start with `_`; table names may
//! only do so when they are exactly `_tabledef`.

use super::types::TABLEDEF;

/// Returns true if `name` is an acceptable table name.
pub fn is_valid_table_name(name: &str) -> bool {
    name == TABLEDEF || is_identifier(name)
}

/// Returns true if `name` is an acceptable field name.
pub fn is_valid_field_name(name: &str) -> bool {
    is_identifier(name)
}

fn is_identifier(name: &str) -> bool {
    let bytes = name.as_bytes();
    match bytes.first() {
        Some(first) if first.is_ascii_alphanumeric() => {}
        _ => return false,
    }
    if bytes.last() == Some(&b'_') {
        return false;
    }
    bytes.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'_')
}
