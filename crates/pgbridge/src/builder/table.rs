//! CREATE TABLE builder.

use std::collections::HashSet;

use crate::error::{BridgeError, BridgeResult};
use crate::types::TableDefinition;

/// Build `CREATE TABLE [IF NOT EXISTS] name (columns, constraints)`.
///
/// Column definitions and table constraints render independently and join
/// with commas in the order the caller gave them.
pub fn build_create_table(definition: &TableDefinition) -> BridgeResult<String> {
    if definition.columns.is_empty() {
        return Err(BridgeError::validation(format!(
            "table '{}' must define at least one column",
            definition.table_name
        )));
    }

    let mut seen = HashSet::new();
    for column in &definition.columns {
        if !seen.insert(column.name.as_str()) {
            return Err(BridgeError::validation(format!(
                "table '{}' defines column '{}' more than once",
                definition.table_name, column.name
            )));
        }
    }

    let mut parts: Vec<String> = definition
        .columns
        .iter()
        .map(|column| column.to_sql())
        .collect();
    parts.extend(definition.constraints.iter().map(|c| c.to_sql()));

    let mut sql = String::from("CREATE TABLE ");
    if definition.if_not_exists {
        sql.push_str("IF NOT EXISTS ");
    }
    sql.push_str(&definition.table_name);
    sql.push_str(&format!(" ({})", parts.join(", ")));

    Ok(sql)
}
