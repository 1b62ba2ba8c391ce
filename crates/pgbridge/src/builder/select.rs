//! SELECT builder.

use super::where_clause::push_condition_clauses;
use crate::types::Conditions;
use crate::value::ValueMode;

/// Build `SELECT cols|* FROM table` plus condition clauses.
///
/// Clause order is fixed by SQL: WHERE, then ORDER BY, then LIMIT, then
/// OFFSET.
pub fn build_select(
    table: &str,
    columns: Option<&[String]>,
    conditions: Option<&Conditions>,
) -> String {
    build_select_with(table, columns, conditions, ValueMode::Statement)
}

pub(crate) fn build_select_with(
    table: &str,
    columns: Option<&[String]>,
    conditions: Option<&Conditions>,
    mode: ValueMode,
) -> String {
    let column_list = match columns {
        Some(columns) if !columns.is_empty() => columns.join(", "),
        _ => "*".to_string(),
    };

    let mut sql = format!("SELECT {column_list} FROM {table}");
    if let Some(conditions) = conditions {
        push_condition_clauses(&mut sql, conditions, mode);
    }
    sql
}
