//! INSERT builder.
//!
//! This is the parameterized path: the statement carries `$1..$n`
//! placeholders numbered row-major across the whole statement, and the
//! value list comes back in the same order for binding.

use serde_json::Value;

use super::Statement;
use crate::error::{BridgeError, BridgeResult};
use crate::types::JsonMap;
use crate::value::PgValue;

/// Build `INSERT INTO table (cols) VALUES ($1, ...), ...` plus its
/// parameter list.
///
/// The column set is taken from the first row's keys; a later row missing
/// one of those columns binds NULL for it.
pub fn build_insert(table: &str, rows: &[JsonMap]) -> BridgeResult<Statement> {
    let Some(first) = rows.first() else {
        return Err(BridgeError::validation("INSERT requires at least one row"));
    };
    if first.is_empty() {
        return Err(BridgeError::validation(
            "INSERT rows must contain at least one column",
        ));
    }

    let columns: Vec<&str> = first.keys().map(String::as_str).collect();
    let mut params = Vec::with_capacity(rows.len() * columns.len());
    let mut groups = Vec::with_capacity(rows.len());
    let mut index = 0usize;

    for row in rows {
        let mut placeholders = Vec::with_capacity(columns.len());
        for column in &columns {
            index += 1;
            placeholders.push(format!("${index}"));
            params.push(PgValue(row.get(*column).cloned().unwrap_or(Value::Null)));
        }
        groups.push(format!("({})", placeholders.join(", ")));
    }

    let sql = format!(
        "INSERT INTO {} ({}) VALUES {}",
        table,
        columns.join(", "),
        groups.join(", ")
    );

    Ok(Statement { sql, params })
}
