//! UPDATE builder.

use super::where_clause::render_filter;
use crate::error::{BridgeError, BridgeResult};
use crate::types::{Conditions, JsonMap};
use crate::value::ValueMode;

/// Build `UPDATE table SET col = literal, ... WHERE ...`.
///
/// Exactly one row of assignments is accepted: an update fanning one WHERE
/// across several SET rows is not a well-defined relational operation, so
/// zero rows and two-plus rows are both validation errors. A non-empty
/// WHERE filter is required.
pub fn build_update(table: &str, rows: &[JsonMap], conditions: &Conditions) -> BridgeResult<String> {
    build_update_with(table, rows, conditions, ValueMode::Statement)
}

pub(crate) fn build_update_with(
    table: &str,
    rows: &[JsonMap],
    conditions: &Conditions,
    mode: ValueMode,
) -> BridgeResult<String> {
    let row = match rows {
        [] => return Err(BridgeError::validation("UPDATE requires a row of assignments")),
        [row] => row,
        _ => {
            return Err(BridgeError::validation(
                "UPDATE accepts exactly one row of assignments per request",
            ));
        }
    };
    if row.is_empty() {
        return Err(BridgeError::validation(
            "UPDATE requires at least one assignment",
        ));
    }

    let filter = conditions
        .filter
        .as_ref()
        .filter(|filter| !filter.is_empty())
        .ok_or_else(|| BridgeError::validation("UPDATE requires a non-empty WHERE filter"))?;

    let assignments = row
        .iter()
        .map(|(column, value)| format!("{} = {}", column, mode.literal(value)))
        .collect::<Vec<_>>()
        .join(", ");

    Ok(format!(
        "UPDATE {} SET {} WHERE {}",
        table,
        assignments,
        render_filter(filter, mode)
    ))
}
