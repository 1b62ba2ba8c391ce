use super::*;
use crate::request::{FunctionDefinition, ProcedureDefinition, RoutineCall};
use crate::types::{AlterTableDefinition, Conditions, DropTableDefinition, TableDefinition};
use serde_json::json;

fn table_definition(value: serde_json::Value) -> TableDefinition {
    serde_json::from_value(value).unwrap()
}

fn conditions(value: serde_json::Value) -> Conditions {
    serde_json::from_value(value).unwrap()
}

fn rows(value: serde_json::Value) -> Vec<crate::types::JsonMap> {
    serde_json::from_value(value).unwrap()
}

// ==================== CREATE TABLE ====================

#[test]
fn test_create_table_basic() {
    let def = table_definition(json!({
        "tableName": "users",
        "columns": [
            {"name": "id", "dataType": "SERIAL"},
            {"name": "name", "dataType": {"type": "VARCHAR", "length": 50}, "constraints": ["NOT NULL"]}
        ],
        "constraints": [{"type": "PRIMARY KEY", "columns": ["id"]}]
    }));
    assert_eq!(
        build_create_table(&def).unwrap(),
        "CREATE TABLE users (id SERIAL, name VARCHAR(50) NOT NULL, PRIMARY KEY (id))"
    );
}

#[test]
fn test_create_table_if_not_exists() {
    let def = table_definition(json!({
        "tableName": "logs",
        "ifNotExists": true,
        "columns": [{"name": "id", "dataType": "BIGSERIAL"}]
    }));
    assert_eq!(
        build_create_table(&def).unwrap(),
        "CREATE TABLE IF NOT EXISTS logs (id BIGSERIAL)"
    );
}

#[test]
fn test_create_table_preserves_column_and_constraint_order() {
    let def = table_definition(json!({
        "tableName": "orders",
        "columns": [
            {"name": "b", "dataType": "INTEGER"},
            {"name": "a", "dataType": "INTEGER"}
        ],
        "constraints": [
            {"type": "UNIQUE", "columns": ["b"]},
            {"type": "PRIMARY KEY", "columns": ["a", "b"]}
        ]
    }));
    assert_eq!(
        build_create_table(&def).unwrap(),
        "CREATE TABLE orders (b INTEGER, a INTEGER, UNIQUE (b), PRIMARY KEY (a, b))"
    );
}

#[test]
fn test_create_table_foreign_key_constraint() {
    let def = table_definition(json!({
        "tableName": "orders",
        "columns": [{"name": "user_id", "dataType": "INTEGER"}],
        "constraints": [{
            "type": "FOREIGN KEY",
            "columns": ["user_id"],
            "references": {"table": "users", "columns": ["id"]},
            "onDelete": "CASCADE"
        }]
    }));
    assert_eq!(
        build_create_table(&def).unwrap(),
        "CREATE TABLE orders (user_id INTEGER, FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE)"
    );
}

#[test]
fn test_create_table_rejects_empty_columns() {
    let def = table_definition(json!({"tableName": "empty", "columns": []}));
    assert!(build_create_table(&def).unwrap_err().is_validation());
}

#[test]
fn test_create_table_rejects_duplicate_columns() {
    let def = table_definition(json!({
        "tableName": "users",
        "columns": [
            {"name": "id", "dataType": "INTEGER"},
            {"name": "id", "dataType": "BIGINT"}
        ]
    }));
    let err = build_create_table(&def).unwrap_err();
    assert!(err.to_string().contains("more than once"), "{err}");
}

// ==================== ALTER TABLE ====================

#[test]
fn test_alter_add_column() {
    let def: AlterTableDefinition = serde_json::from_value(json!({
        "tableName": "users",
        "action": "ADD_COLUMN",
        "columnDefinition": {
            "name": "age",
            "dataType": "INTEGER",
            "constraints": [{"type": "DEFAULT", "value": 0}]
        }
    }))
    .unwrap();
    assert_eq!(
        build_alter_table(&def),
        "ALTER TABLE users ADD COLUMN age INTEGER DEFAULT 0"
    );
}

#[test]
fn test_alter_drop_column() {
    let def: AlterTableDefinition = serde_json::from_value(json!({
        "tableName": "users",
        "action": "DROP_COLUMN",
        "columnName": "age"
    }))
    .unwrap();
    assert_eq!(build_alter_table(&def), "ALTER TABLE users DROP COLUMN age");
}

#[test]
fn test_alter_rename_column() {
    let def: AlterTableDefinition = serde_json::from_value(json!({
        "tableName": "users",
        "action": "RENAME_COLUMN",
        "columnName": "name",
        "newColumnName": "full_name"
    }))
    .unwrap();
    assert_eq!(
        build_alter_table(&def),
        "ALTER TABLE users RENAME COLUMN name TO full_name"
    );
}

#[test]
fn test_alter_column_type_ignores_constraints() {
    let def: AlterTableDefinition = serde_json::from_value(json!({
        "tableName": "users",
        "action": "ALTER_COLUMN",
        "columnName": "name",
        "columnDefinition": {
            "name": "name",
            "dataType": "TEXT",
            "constraints": ["NOT NULL"]
        }
    }))
    .unwrap();
    assert_eq!(
        build_alter_table(&def),
        "ALTER TABLE users ALTER COLUMN name TYPE TEXT"
    );
}

// ==================== DROP TABLE ====================

#[test]
fn test_drop_defaults_to_restrict() {
    let def: DropTableDefinition =
        serde_json::from_value(json!({"tables": ["users"]})).unwrap();
    assert_eq!(build_drop_table(&def).unwrap(), "DROP TABLE users RESTRICT");
}

#[test]
fn test_drop_multiple_tables_with_flags() {
    let def: DropTableDefinition = serde_json::from_value(json!({
        "tables": ["users", "orders"],
        "ifExists": true,
        "cascade": true
    }))
    .unwrap();
    assert_eq!(
        build_drop_table(&def).unwrap(),
        "DROP TABLE IF EXISTS users, orders CASCADE"
    );
}

#[test]
fn test_drop_rejects_empty_table_list() {
    let def: DropTableDefinition = serde_json::from_value(json!({"tables": []})).unwrap();
    assert!(build_drop_table(&def).unwrap_err().is_validation());
}

// ==================== INSERT ====================

#[test]
fn test_insert_two_rows_row_major_placeholders() {
    let statement = build_insert(
        "t",
        &rows(json!([{"a": 1, "b": "x"}, {"a": 2, "b": "y"}])),
    )
    .unwrap();
    assert_eq!(
        statement.sql,
        "INSERT INTO t (a, b) VALUES ($1, $2), ($3, $4)"
    );
    let values: Vec<_> = statement.params.iter().map(|p| p.0.clone()).collect();
    assert_eq!(values, vec![json!(1), json!("x"), json!(2), json!("y")]);
}

#[test]
fn test_insert_placeholder_count_matches_rows_times_columns() {
    let data = rows(json!([
        {"a": 1, "b": 2, "c": 3, "d": 4},
        {"a": 5, "b": 6, "c": 7, "d": 8},
        {"a": 9, "b": 10, "c": 11, "d": 12}
    ]));
    let statement = build_insert("wide", &data).unwrap();
    assert_eq!(statement.params.len(), 12);
    for n in 1..=12 {
        assert!(statement.sql.contains(&format!("${n}")), "missing ${n}");
    }
    assert!(!statement.sql.contains("$13"));
    assert_eq!(statement.params_ref().len(), 12);
}

#[test]
fn test_insert_missing_column_in_later_row_binds_null() {
    let statement = build_insert("t", &rows(json!([{"a": 1, "b": 2}, {"a": 3}]))).unwrap();
    assert_eq!(statement.params[3].0, serde_json::Value::Null);
}

#[test]
fn test_insert_empty_rows_is_validation_error() {
    assert!(build_insert("t", &[]).unwrap_err().is_validation());
}

#[test]
fn test_insert_empty_first_row_is_validation_error() {
    assert!(build_insert("t", &rows(json!([{}]))).unwrap_err().is_validation());
}

// ==================== SELECT ====================

#[test]
fn test_select_all_columns() {
    assert_eq!(build_select("users", None, None), "SELECT * FROM users");
}

#[test]
fn test_select_with_conditions_in_fixed_clause_order() {
    let conditions = conditions(json!({
        "WHERE": {"status": "active"},
        "ORDER_BY": [{"column": "id", "direction": "ASC"}],
        "LIMIT": 10
    }));
    assert_eq!(
        build_select("t", None, Some(&conditions)),
        "SELECT * FROM t WHERE status = 'active' ORDER BY id ASC LIMIT 10"
    );
}

#[test]
fn test_select_full_clause_order() {
    let conditions = conditions(json!({
        "WHERE": {"status": "active", "role": "admin"},
        "ORDER_BY": [
            {"column": "created_at", "direction": "DESC"},
            {"column": "id", "direction": "ASC"}
        ],
        "LIMIT": 25,
        "OFFSET": 50
    }));
    assert_eq!(
        build_select("users", Some(&["id".to_string(), "name".to_string()]), Some(&conditions)),
        "SELECT id, name FROM users WHERE status = 'active' AND role = 'admin' \
         ORDER BY created_at DESC, id ASC LIMIT 25 OFFSET 50"
    );
}

#[test]
fn test_select_numeric_filter_is_unquoted() {
    let conditions = conditions(json!({"WHERE": {"id": 7, "active": true}}));
    assert_eq!(
        build_select("users", None, Some(&conditions)),
        "SELECT * FROM users WHERE id = 7 AND active = TRUE"
    );
}

#[test]
fn test_select_empty_columns_falls_back_to_star() {
    assert_eq!(build_select("users", Some(&[]), None), "SELECT * FROM users");
}

// ==================== UPDATE ====================

#[test]
fn test_update_single_row() {
    let conditions = conditions(json!({"WHERE": {"id": 1}}));
    assert_eq!(
        build_update("users", &rows(json!([{"name": "alice", "age": 30}])), &conditions).unwrap(),
        "UPDATE users SET name = 'alice', age = 30 WHERE id = 1"
    );
}

#[test]
fn test_update_empty_rows_is_validation_error() {
    let conditions = conditions(json!({"WHERE": {"id": 1}}));
    assert!(build_update("users", &[], &conditions).unwrap_err().is_validation());
}

#[test]
fn test_update_multiple_rows_is_validation_error() {
    let conditions = conditions(json!({"WHERE": {"id": 1}}));
    let err = build_update(
        "users",
        &rows(json!([{"name": "a"}, {"name": "b"}])),
        &conditions,
    )
    .unwrap_err();
    assert!(err.to_string().contains("exactly one row"), "{err}");
}

#[test]
fn test_update_requires_where_filter() {
    let err = build_update("users", &rows(json!([{"name": "a"}])), &Conditions::default())
        .unwrap_err();
    assert!(err.to_string().contains("WHERE"), "{err}");
}

// ==================== DELETE ====================

#[test]
fn test_delete_without_conditions() {
    assert_eq!(build_delete("users", None), "DELETE FROM users");
}

#[test]
fn test_delete_with_filter() {
    let conditions = conditions(json!({"WHERE": {"status": "inactive", "age": 99}}));
    assert_eq!(
        build_delete("users", Some(&conditions)),
        "DELETE FROM users WHERE status = 'inactive' AND age = 99"
    );
}

// ==================== ROUTINE CALLS ====================

#[test]
fn test_call_procedure_quotes_string_arguments() {
    let call = RoutineCall {
        name: "archive_user".to_string(),
        parameters: vec![json!(42), json!("note"), json!(null)],
    };
    assert_eq!(
        build_call_procedure(&call),
        "CALL archive_user(42, 'note', NULL)"
    );
}

#[test]
fn test_call_function_selects_from_it() {
    let call = RoutineCall {
        name: "active_users".to_string(),
        parameters: vec![],
    };
    assert_eq!(build_call_function(&call), "SELECT * FROM active_users()");
}

// ==================== CREATE PROCEDURE / FUNCTION ====================

fn procedure_definition(value: serde_json::Value) -> ProcedureDefinition {
    serde_json::from_value(value).unwrap()
}

fn function_definition(value: serde_json::Value) -> FunctionDefinition {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_create_procedure_with_delete_body() {
    let def = procedure_definition(json!({
        "name": "purge_user",
        "parameters": [{"name": "p_id", "dataType": "INTEGER"}],
        "body": [
            {"operation": "DELETE", "table": "users",
             "conditions": {"WHERE": {"id": "p_id"}}}
        ]
    }));
    assert_eq!(
        build_create_procedure(&def).unwrap(),
        "CREATE OR REPLACE PROCEDURE purge_user(p_id INTEGER) LANGUAGE plpgsql AS $$\n\
         BEGIN\n\
         DELETE FROM users WHERE id = p_id;\n\
         END\n\
         $$;"
    );
}

#[test]
fn test_create_procedure_inlines_insert_parameters() {
    let def = procedure_definition(json!({
        "name": "seed",
        "body": [
            {"operation": "INSERT", "table": "t",
             "data": [{"a": 1, "b": "x"}]}
        ]
    }));
    let sql = build_create_procedure(&def).unwrap();
    assert!(sql.contains("INSERT INTO t (a, b) VALUES (1, 'x')"), "{sql}");
    assert!(!sql.contains("$1"), "{sql}");
}

#[test]
fn test_inline_parameters_do_not_collide_past_ten() {
    // 12 placeholders: $1 must not clobber the prefix of $10..$12.
    let def = procedure_definition(json!({
        "name": "seed_wide",
        "body": [
            {"operation": "INSERT", "table": "wide", "data": [
                {"a": 1, "b": 2, "c": 3, "d": 4},
                {"a": 5, "b": 6, "c": 7, "d": 8},
                {"a": 9, "b": 10, "c": 11, "d": 12}
            ]}
        ]
    }));
    let sql = build_create_procedure(&def).unwrap();
    assert!(
        sql.contains("VALUES (1, 2, 3, 4), (5, 6, 7, 8), (9, 10, 11, 12)"),
        "{sql}"
    );
}

#[test]
fn test_create_function_table_return_wraps_select_in_return_query() {
    let def = function_definition(json!({
        "name": "find_users",
        "parameters": [{"name": "p_status", "dataType": "TEXT"}],
        "returnType": "TABLE",
        "body": [
            {"operation": "SELECT", "table": "users",
             "conditions": {"WHERE": {"status": "p_status"}}}
        ]
    }));
    assert_eq!(
        build_create_function(&def).unwrap(),
        "CREATE OR REPLACE FUNCTION find_users(p_status TEXT) RETURNS TABLE LANGUAGE plpgsql AS $$\n\
         BEGIN\n\
         RETURN QUERY SELECT * FROM users WHERE status = p_status;\n\
         END\n\
         $$;"
    );
}

#[test]
fn test_create_function_scalar_return_wraps_select_in_return() {
    let def = function_definition(json!({
        "name": "count_active",
        "returnType": "INTEGER",
        "body": [
            {"operation": "SELECT", "table": "users",
             "columns": ["id"],
             "conditions": {"WHERE": {"status": "active"}}}
        ]
    }));
    let sql = build_create_function(&def).unwrap();
    assert!(sql.contains(" RETURNS INTEGER "), "{sql}");
    assert!(
        sql.contains("RETURN (SELECT id FROM users WHERE status = 'active');"),
        "{sql}"
    );
}

#[test]
fn test_create_function_void_return_emits_body_unwrapped() {
    let def = function_definition(json!({
        "name": "cleanup",
        "returnType": "VOID",
        "body": [
            {"operation": "DELETE", "table": "sessions"}
        ]
    }));
    assert_eq!(
        build_create_function(&def).unwrap(),
        "CREATE OR REPLACE FUNCTION cleanup() RETURNS VOID LANGUAGE plpgsql AS $$\n\
         BEGIN\n\
         DELETE FROM sessions;\n\
         END\n\
         $$;"
    );
}

#[test]
fn test_create_function_non_select_leading_statement_is_unwrapped() {
    let def = function_definition(json!({
        "name": "touch",
        "returnType": "TABLE",
        "body": [
            {"operation": "DELETE", "table": "stale"},
            {"operation": "SELECT", "table": "stale"}
        ]
    }));
    let sql = build_create_function(&def).unwrap();
    assert!(!sql.contains("RETURN QUERY"), "{sql}");
    assert!(sql.contains("DELETE FROM stale;\nSELECT * FROM stale;"), "{sql}");
}

#[test]
fn test_routine_body_rejects_ddl() {
    let def = procedure_definition(json!({
        "name": "bad",
        "body": [
            {"operation": "DROP", "dropTable": {"tables": ["users"]}}
        ]
    }));
    let err = build_create_procedure(&def).unwrap_err();
    assert!(matches!(err, crate::error::BridgeError::Unsupported(_)), "{err}");
}

#[test]
fn test_routine_body_must_not_be_empty() {
    let def = procedure_definition(json!({"name": "noop", "body": []}));
    assert!(build_create_procedure(&def).unwrap_err().is_validation());
}

#[test]
fn test_routine_body_update_keeps_parameter_references_bare() {
    let def = procedure_definition(json!({
        "name": "rename_user",
        "parameters": [
            {"name": "p_id", "dataType": "INTEGER"},
            {"name": "p_name", "dataType": "TEXT"}
        ],
        "body": [
            {"operation": "UPDATE", "table": "users",
             "data": [{"name": "p_name"}],
             "conditions": {"WHERE": {"id": "p_id"}}}
        ]
    }));
    let sql = build_create_procedure(&def).unwrap();
    assert!(sql.contains("SET name = p_name WHERE id = p_id"), "{sql}");
}
