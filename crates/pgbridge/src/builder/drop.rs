//! DROP TABLE builder.

use crate::error::{BridgeError, BridgeResult};
use crate::types::DropTableDefinition;

/// Build `DROP TABLE [IF EXISTS] t1, t2, ... CASCADE|RESTRICT`.
///
/// One statement covers every listed table. RESTRICT is the default when
/// cascade was not requested.
pub fn build_drop_table(definition: &DropTableDefinition) -> BridgeResult<String> {
    if definition.tables.is_empty() {
        return Err(BridgeError::validation("DROP requires at least one table"));
    }

    let mut sql = String::from("DROP TABLE ");
    if definition.if_exists {
        sql.push_str("IF EXISTS ");
    }
    sql.push_str(&definition.tables.join(", "));
    sql.push_str(if definition.cascade {
        " CASCADE"
    } else {
        " RESTRICT"
    });

    Ok(sql)
}
