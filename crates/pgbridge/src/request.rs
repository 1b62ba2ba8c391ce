//! The inbound request model.
//!
//! A [`Request`] is one JSON object tagged by `"operation"`. Each variant
//! carries only the payload fields its operation needs; a request with a
//! missing field fails at deserialization with an error naming the field,
//! and an unknown operation tag never constructs at all.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{
    AlterTableDefinition, Conditions, DataType, DropTableDefinition, JsonMap, TableDefinition,
};
use crate::value::sql_literal;

/// One declarative database operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation")]
pub enum Request {
    #[serde(rename = "CREATE", rename_all = "camelCase")]
    Create { create_table: Vec<TableDefinition> },

    #[serde(rename = "INSERT")]
    Insert { table: String, data: Vec<JsonMap> },

    #[serde(rename = "SELECT")]
    Select {
        table: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        columns: Option<Vec<String>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        conditions: Option<Conditions>,
    },

    #[serde(rename = "UPDATE")]
    Update {
        table: String,
        data: Vec<JsonMap>,
        conditions: Conditions,
    },

    #[serde(rename = "DELETE")]
    Delete {
        table: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        conditions: Option<Conditions>,
    },

    #[serde(rename = "DROP", rename_all = "camelCase")]
    Drop { drop_table: DropTableDefinition },

    #[serde(rename = "ALTER", rename_all = "camelCase")]
    Alter { alter_table: AlterTableDefinition },

    #[serde(rename = "CALL_PROCEDURE")]
    CallProcedure { procedure: RoutineCall },

    #[serde(rename = "CALL_FUNCTION")]
    CallFunction { function: RoutineCall },

    #[serde(rename = "CREATE_PROCEDURE", rename_all = "camelCase")]
    CreateProcedure { create_procedure: ProcedureDefinition },

    #[serde(rename = "CREATE_FUNCTION", rename_all = "camelCase")]
    CreateFunction { create_function: FunctionDefinition },
}

impl Request {
    /// The wire-level operation tag.
    pub fn operation(&self) -> &'static str {
        match self {
            Request::Create { .. } => "CREATE",
            Request::Insert { .. } => "INSERT",
            Request::Select { .. } => "SELECT",
            Request::Update { .. } => "UPDATE",
            Request::Delete { .. } => "DELETE",
            Request::Drop { .. } => "DROP",
            Request::Alter { .. } => "ALTER",
            Request::CallProcedure { .. } => "CALL_PROCEDURE",
            Request::CallFunction { .. } => "CALL_FUNCTION",
            Request::CreateProcedure { .. } => "CREATE_PROCEDURE",
            Request::CreateFunction { .. } => "CREATE_FUNCTION",
        }
    }
}

/// Invocation of a stored procedure or function by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineCall {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Value>,
}

/// One declared routine parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineParameter {
    pub name: String,
    pub data_type: DataType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
}

impl RoutineParameter {
    /// Render as `name TYPE [DEFAULT literal]`.
    pub fn to_sql(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.data_type.to_sql());
        if let Some(default) = &self.default_value {
            sql.push_str(" DEFAULT ");
            sql.push_str(&sql_literal(default));
        }
        sql
    }
}

/// Definition of a stored procedure: name, parameters, and a body of
/// nested DML requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedureDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<RoutineParameter>,
    pub body: Vec<Request>,
}

/// Definition of a stored function: like a procedure, plus a return
/// specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<RoutineParameter>,
    pub return_type: ReturnSpec,
    pub body: Vec<Request>,
}

/// A function's declared return: tabular, nothing, or a scalar type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReturnSpec {
    Keyword(ReturnKeyword),
    Scalar(DataType),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReturnKeyword {
    #[serde(rename = "TABLE")]
    Table,
    #[serde(rename = "VOID")]
    Void,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_request_wire_shape() {
        let request: Request = serde_json::from_value(json!({
            "operation": "CREATE",
            "createTable": [{
                "tableName": "users",
                "columns": [
                    {"name": "id", "dataType": "SERIAL"},
                    {"name": "name", "dataType": {"type": "VARCHAR", "length": 50}, "constraints": ["NOT NULL"]}
                ],
                "constraints": [{"type": "PRIMARY KEY", "columns": ["id"]}]
            }]
        }))
        .unwrap();
        assert_eq!(request.operation(), "CREATE");
    }

    #[test]
    fn missing_payload_field_is_named_in_the_error() {
        let err = serde_json::from_value::<Request>(json!({"operation": "INSERT", "table": "t"}))
            .unwrap_err();
        assert!(err.to_string().contains("data"), "{err}");
    }

    #[test]
    fn unknown_operation_tag_is_rejected() {
        let err = serde_json::from_value::<Request>(json!({"operation": "TRUNCATE", "table": "t"}))
            .unwrap_err();
        assert!(err.to_string().contains("TRUNCATE"), "{err}");
    }

    #[test]
    fn select_conditions_are_optional() {
        let request: Request =
            serde_json::from_value(json!({"operation": "SELECT", "table": "users"})).unwrap();
        let Request::Select { columns, conditions, .. } = request else {
            panic!("expected SELECT");
        };
        assert!(columns.is_none());
        assert!(conditions.is_none());
    }

    #[test]
    fn function_return_spec_accepts_sentinels_and_types() {
        let void: ReturnSpec = serde_json::from_value(json!("VOID")).unwrap();
        assert_eq!(void, ReturnSpec::Keyword(ReturnKeyword::Void));

        let table: ReturnSpec = serde_json::from_value(json!("TABLE")).unwrap();
        assert_eq!(table, ReturnSpec::Keyword(ReturnKeyword::Table));

        let scalar: ReturnSpec = serde_json::from_value(json!("INTEGER")).unwrap();
        assert!(matches!(scalar, ReturnSpec::Scalar(_)));
    }

    #[test]
    fn routine_parameter_renders_default() {
        let param: RoutineParameter = serde_json::from_value(json!({
            "name": "p_limit",
            "dataType": "INTEGER",
            "defaultValue": 10
        }))
        .unwrap();
        assert_eq!(param.to_sql(), "p_limit INTEGER DEFAULT 10");
    }

    #[test]
    fn request_round_trips_to_wire_shape() {
        let wire = json!({
            "operation": "DROP",
            "dropTable": {"tables": ["a", "b"], "ifExists": true}
        });
        let request: Request = serde_json::from_value(wire.clone()).unwrap();
        assert_eq!(serde_json::to_value(&request).unwrap(), wire);
    }

    #[test]
    fn nested_body_requests_deserialize() {
        let request: Request = serde_json::from_value(json!({
            "operation": "CREATE_PROCEDURE",
            "createProcedure": {
                "name": "archive_user",
                "parameters": [{"name": "p_id", "dataType": "INTEGER"}],
                "body": [
                    {"operation": "DELETE", "table": "users",
                     "conditions": {"WHERE": {"id": "p_id"}}}
                ]
            }
        }))
        .unwrap();
        let Request::CreateProcedure { create_procedure } = request else {
            panic!("expected CREATE_PROCEDURE");
        };
        assert_eq!(create_procedure.body.len(), 1);
    }
}
