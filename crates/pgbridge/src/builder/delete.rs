//! DELETE builder.

use super::where_clause::render_filter;
use crate::types::Conditions;
use crate::value::ValueMode;

/// Build `DELETE FROM table [WHERE ...]`.
///
/// The filter is optional; a request without one deletes every row, which
/// is the caller's decision to make.
pub fn build_delete(table: &str, conditions: Option<&Conditions>) -> String {
    build_delete_with(table, conditions, ValueMode::Statement)
}

pub(crate) fn build_delete_with(
    table: &str,
    conditions: Option<&Conditions>,
    mode: ValueMode,
) -> String {
    let mut sql = format!("DELETE FROM {table}");

    if let Some(filter) = conditions.and_then(|c| c.filter.as_ref()) {
        if !filter.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&render_filter(filter, mode));
        }
    }

    sql
}
