//! ALTER TABLE builder.

use crate::types::{AlterAction, AlterTableDefinition};

/// Build `ALTER TABLE name <ACTION>`.
///
/// The action enum guarantees the required fields are present, so this
/// builder cannot fail. For ALTER_COLUMN only the supplied definition's type
/// is applied; constraints on it are ignored.
pub fn build_alter_table(definition: &AlterTableDefinition) -> String {
    let mut sql = format!("ALTER TABLE {}", definition.table_name);

    match &definition.action {
        AlterAction::AddColumn { column_definition } => {
            sql.push_str(" ADD COLUMN ");
            sql.push_str(&column_definition.to_sql());
        }
        AlterAction::DropColumn { column_name } => {
            sql.push_str(" DROP COLUMN ");
            sql.push_str(column_name);
        }
        AlterAction::RenameColumn {
            column_name,
            new_column_name,
        } => {
            sql.push_str(&format!(" RENAME COLUMN {column_name} TO {new_column_name}"));
        }
        AlterAction::AlterColumn {
            column_name,
            column_definition,
        } => {
            sql.push_str(&format!(
                " ALTER COLUMN {column_name} TYPE {}",
                column_definition.data_type.to_sql()
            ));
        }
    }

    sql
}
