//! Shared WHERE/ORDER BY/LIMIT/OFFSET rendering for the row-level builders.

use crate::types::{Conditions, JsonMap};
use crate::value::ValueMode;

/// Render an equality filter as `col = literal AND ...`, in entry order,
/// without the leading keyword. Equality is the only supported comparison;
/// filters always combine with AND.
pub(crate) fn render_filter(filter: &JsonMap, mode: ValueMode) -> String {
    filter
        .iter()
        .map(|(column, value)| format!("{} = {}", column, mode.literal(value)))
        .collect::<Vec<_>>()
        .join(" AND ")
}

/// Append WHERE, ORDER BY, LIMIT, and OFFSET clauses in the order SQL
/// requires them.
pub(crate) fn push_condition_clauses(sql: &mut String, conditions: &Conditions, mode: ValueMode) {
    if let Some(filter) = &conditions.filter {
        if !filter.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&render_filter(filter, mode));
        }
    }

    if let Some(order_by) = &conditions.order_by {
        if !order_by.is_empty() {
            let clauses = order_by
                .iter()
                .map(|order| format!("{} {}", order.column, order.direction.as_sql()))
                .collect::<Vec<_>>()
                .join(", ");
            sql.push_str(" ORDER BY ");
            sql.push_str(&clauses);
        }
    }

    if let Some(limit) = conditions.limit {
        sql.push_str(&format!(" LIMIT {limit}"));
    }

    if let Some(offset) = conditions.offset {
        sql.push_str(&format!(" OFFSET {offset}"));
    }
}
