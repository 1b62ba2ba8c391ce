//! Schema and condition descriptors carried by requests.
//!
//! These types accept the JSON wire shape directly (camelCase fields,
//! `"NOT NULL"`-style constraint strings, `{"type": "VARCHAR", ...}` objects)
//! and know how to render themselves as SQL fragments. Unknown type or
//! constraint shapes are rejected at deserialization; nothing degrades
//! silently.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::value::sql_literal;

/// Order-preserving JSON object, used for row records and WHERE filters.
pub type JsonMap = serde_json::Map<String, Value>;

/// A PostgreSQL data type descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataType {
    /// Bare keyword type, e.g. `"INTEGER"` or `"UUID"`.
    Keyword(TypeKeyword),
    /// Parameterized type, e.g. `{"type": "VARCHAR", "length": 50}`.
    Parameterized(ParameterizedType),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TypeKeyword {
    Integer,
    Bigint,
    Serial,
    Bigserial,
    Text,
    Date,
    Timestamp,
    Boolean,
    Uuid,
}

impl TypeKeyword {
    pub fn as_sql(&self) -> &'static str {
        match self {
            TypeKeyword::Integer => "INTEGER",
            TypeKeyword::Bigint => "BIGINT",
            TypeKeyword::Serial => "SERIAL",
            TypeKeyword::Bigserial => "BIGSERIAL",
            TypeKeyword::Text => "TEXT",
            TypeKeyword::Date => "DATE",
            TypeKeyword::Timestamp => "TIMESTAMP",
            TypeKeyword::Boolean => "BOOLEAN",
            TypeKeyword::Uuid => "UUID",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ParameterizedType {
    #[serde(rename = "VARCHAR")]
    Varchar { length: u32 },
    #[serde(rename = "DECIMAL")]
    Decimal {
        precision: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scale: Option<u32>,
    },
}

impl DataType {
    /// Render the type as it appears in a column definition.
    pub fn to_sql(&self) -> String {
        match self {
            DataType::Keyword(keyword) => keyword.as_sql().to_string(),
            DataType::Parameterized(ParameterizedType::Varchar { length }) => {
                format!("VARCHAR({length})")
            }
            DataType::Parameterized(ParameterizedType::Decimal {
                precision,
                scale: Some(scale),
            }) => format!("DECIMAL({precision}, {scale})"),
            DataType::Parameterized(ParameterizedType::Decimal {
                precision,
                scale: None,
            }) => format!("DECIMAL({precision})"),
        }
    }
}

/// Referential action for ON DELETE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OnDelete {
    #[serde(rename = "CASCADE")]
    Cascade,
    #[serde(rename = "SET NULL")]
    SetNull,
}

impl OnDelete {
    pub fn as_sql(&self) -> &'static str {
        match self {
            OnDelete::Cascade => "CASCADE",
            OnDelete::SetNull => "SET NULL",
        }
    }
}

/// A constraint attached to a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnConstraint {
    Keyword(ConstraintKeyword),
    Parameterized(ParameterizedConstraint),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintKeyword {
    #[serde(rename = "NOT NULL")]
    NotNull,
    #[serde(rename = "UNIQUE")]
    Unique,
    #[serde(rename = "PRIMARY KEY")]
    PrimaryKey,
}

impl ConstraintKeyword {
    pub fn as_sql(&self) -> &'static str {
        match self {
            ConstraintKeyword::NotNull => "NOT NULL",
            ConstraintKeyword::Unique => "UNIQUE",
            ConstraintKeyword::PrimaryKey => "PRIMARY KEY",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ParameterizedConstraint {
    #[serde(rename = "DEFAULT")]
    Default { value: Value },
    #[serde(rename = "REFERENCES", rename_all = "camelCase")]
    References {
        table: String,
        column: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        on_delete: Option<OnDelete>,
    },
}

impl ColumnConstraint {
    /// Render the constraint as it appears after the column type.
    pub fn to_sql(&self) -> String {
        match self {
            ColumnConstraint::Keyword(keyword) => keyword.as_sql().to_string(),
            ColumnConstraint::Parameterized(ParameterizedConstraint::Default { value }) => {
                match value {
                    // Recognized marker for the engine's current-date keyword.
                    Value::String(s) if s.to_uppercase().contains("CURRENT_DATE") => {
                        "DEFAULT CURRENT_DATE".to_string()
                    }
                    other => format!("DEFAULT {}", sql_literal(other)),
                }
            }
            ColumnConstraint::Parameterized(ParameterizedConstraint::References {
                table,
                column,
                on_delete,
            }) => {
                let mut sql = format!("REFERENCES {table}({column})");
                if let Some(action) = on_delete {
                    sql.push_str(" ON DELETE ");
                    sql.push_str(action.as_sql());
                }
                sql
            }
        }
    }
}

/// Render a constraint list, space-separated.
pub fn format_constraints(constraints: &[ColumnConstraint]) -> String {
    constraints
        .iter()
        .map(|constraint| constraint.to_sql())
        .collect::<Vec<_>>()
        .join(" ")
}

/// One column in a CREATE TABLE or ALTER TABLE request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDefinition {
    pub name: String,
    pub data_type: DataType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<ColumnConstraint>,
}

impl ColumnDefinition {
    /// Render as `name TYPE [constraints...]`.
    pub fn to_sql(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.data_type.to_sql());
        if !self.constraints.is_empty() {
            sql.push(' ');
            sql.push_str(&format_constraints(&self.constraints));
        }
        sql
    }
}

/// A table-level constraint spanning one or more columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TableConstraint {
    #[serde(rename = "PRIMARY KEY")]
    PrimaryKey { columns: Vec<String> },
    #[serde(rename = "FOREIGN KEY", rename_all = "camelCase")]
    ForeignKey {
        columns: Vec<String>,
        references: ForeignKeyTarget,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        on_delete: Option<OnDelete>,
    },
    #[serde(rename = "UNIQUE")]
    Unique { columns: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignKeyTarget {
    pub table: String,
    pub columns: Vec<String>,
}

impl TableConstraint {
    pub fn to_sql(&self) -> String {
        match self {
            TableConstraint::PrimaryKey { columns } => {
                format!("PRIMARY KEY ({})", columns.join(", "))
            }
            TableConstraint::ForeignKey {
                columns,
                references,
                on_delete,
            } => {
                let mut sql = format!(
                    "FOREIGN KEY ({}) REFERENCES {}({})",
                    columns.join(", "),
                    references.table,
                    references.columns.join(", ")
                );
                if let Some(action) = on_delete {
                    sql.push_str(" ON DELETE ");
                    sql.push_str(action.as_sql());
                }
                sql
            }
            TableConstraint::Unique { columns } => {
                format!("UNIQUE ({})", columns.join(", "))
            }
        }
    }
}

/// One table in a CREATE request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDefinition {
    pub table_name: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub if_not_exists: bool,
    pub columns: Vec<ColumnDefinition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<TableConstraint>,
}

/// The WHERE/ORDER_BY/LIMIT/OFFSET bundle attached to select/update/delete.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Conditions {
    /// Equality filter, AND-combined in entry order.
    #[serde(rename = "WHERE", default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<JsonMap>,
    #[serde(rename = "ORDER_BY", default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<Vec<OrderBy>>,
    #[serde(rename = "LIMIT", default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(rename = "OFFSET", default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBy {
    pub column: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// An ALTER TABLE request: table name plus exactly one action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlterTableDefinition {
    pub table_name: String,
    #[serde(flatten)]
    pub action: AlterAction,
}

/// The four mutually exclusive ALTER TABLE actions. Each variant carries
/// exactly the fields its action needs, so a request with the wrong field
/// set fails at deserialization instead of deep inside a builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum AlterAction {
    #[serde(rename = "ADD_COLUMN", rename_all = "camelCase")]
    AddColumn { column_definition: ColumnDefinition },
    #[serde(rename = "DROP_COLUMN", rename_all = "camelCase")]
    DropColumn { column_name: String },
    #[serde(rename = "RENAME_COLUMN", rename_all = "camelCase")]
    RenameColumn {
        column_name: String,
        new_column_name: String,
    },
    #[serde(rename = "ALTER_COLUMN", rename_all = "camelCase")]
    AlterColumn {
        column_name: String,
        column_definition: ColumnDefinition,
    },
}

/// A DROP TABLE request covering one or more tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropTableDefinition {
    pub tables: Vec<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub if_exists: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub cascade: bool,
}
