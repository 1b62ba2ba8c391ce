//! Stored procedure and function builders.
//!
//! Routine bodies are ordered lists of nested DML requests compiled through
//! the same row-level builders as top-level statements. A routine body must
//! be static SQL text, so the insert builder's placeholders are substituted
//! back into literal positions here.

use serde_json::Value;

use super::Statement;
use super::delete::build_delete_with;
use super::insert::build_insert;
use super::select::build_select_with;
use super::update::build_update_with;
use crate::error::{BridgeError, BridgeResult};
use crate::request::{FunctionDefinition, ProcedureDefinition, Request, ReturnKeyword, ReturnSpec, RoutineCall, RoutineParameter};
use crate::value::{ValueMode, sql_literal};

/// Build `CALL name(args)`.
pub fn build_call_procedure(call: &RoutineCall) -> String {
    format!("CALL {}({})", call.name, render_arguments(&call.parameters))
}

/// Build `SELECT * FROM name(args)` for a function invocation.
pub fn build_call_function(call: &RoutineCall) -> String {
    format!(
        "SELECT * FROM {}({})",
        call.name,
        render_arguments(&call.parameters)
    )
}

fn render_arguments(arguments: &[Value]) -> String {
    arguments
        .iter()
        .map(sql_literal)
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_parameters(parameters: &[RoutineParameter]) -> String {
    parameters
        .iter()
        .map(|parameter| parameter.to_sql())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build `CREATE OR REPLACE PROCEDURE name(params) LANGUAGE plpgsql AS $$...$$;`.
pub fn build_create_procedure(definition: &ProcedureDefinition) -> BridgeResult<String> {
    let body = compile_body(&definition.body)?;
    Ok(format!(
        "CREATE OR REPLACE PROCEDURE {}({}) LANGUAGE plpgsql AS $$\nBEGIN\n{};\nEND\n$$;",
        definition.name,
        render_parameters(&definition.parameters),
        body
    ))
}

/// Build `CREATE OR REPLACE FUNCTION name(params) RETURNS spec LANGUAGE plpgsql AS $$...$$;`.
///
/// The body wrapping depends on the return spec: a tabular return wraps a
/// leading SELECT in `RETURN QUERY ...;`, a scalar return wraps it in
/// `RETURN (...);`, and a void return (or a non-SELECT leading statement)
/// emits the body unwrapped.
pub fn build_create_function(definition: &FunctionDefinition) -> BridgeResult<String> {
    let body = compile_body(&definition.body)?;

    let mut sql = format!(
        "CREATE OR REPLACE FUNCTION {}({})",
        definition.name,
        render_parameters(&definition.parameters)
    );

    match &definition.return_type {
        ReturnSpec::Keyword(ReturnKeyword::Table) => sql.push_str(" RETURNS TABLE"),
        ReturnSpec::Keyword(ReturnKeyword::Void) => sql.push_str(" RETURNS VOID"),
        ReturnSpec::Scalar(data_type) => {
            sql.push_str(" RETURNS ");
            sql.push_str(&data_type.to_sql());
        }
    }

    let leads_with_select = body.trim_start().to_uppercase().starts_with("SELECT");
    let wrapped = match &definition.return_type {
        ReturnSpec::Keyword(ReturnKeyword::Table) if leads_with_select => {
            format!("RETURN QUERY {body};")
        }
        ReturnSpec::Scalar(_) if leads_with_select => format!("RETURN ({body});"),
        _ => format!("{body};"),
    };

    sql.push_str(&format!(" LANGUAGE plpgsql AS $$\nBEGIN\n{wrapped}\nEND\n$$;"));
    Ok(sql)
}

/// Compile a routine body: each nested request through the row-level
/// builders, joined with `;\n`.
fn compile_body(body: &[Request]) -> BridgeResult<String> {
    if body.is_empty() {
        return Err(BridgeError::validation(
            "routine body must contain at least one statement",
        ));
    }

    let statements = body
        .iter()
        .map(compile_body_statement)
        .collect::<BridgeResult<Vec<_>>>()?;
    Ok(statements.join(";\n"))
}

fn compile_body_statement(request: &Request) -> BridgeResult<String> {
    match request {
        Request::Insert { table, data } => {
            let statement = build_insert(table, data)?;
            Ok(inline_parameters(statement))
        }
        Request::Select {
            table,
            columns,
            conditions,
        } => Ok(build_select_with(
            table,
            columns.as_deref(),
            conditions.as_ref(),
            ValueMode::RoutineBody,
        )),
        Request::Update {
            table,
            data,
            conditions,
        } => build_update_with(table, data, conditions, ValueMode::RoutineBody),
        Request::Delete { table, conditions } => Ok(build_delete_with(
            table,
            conditions.as_ref(),
            ValueMode::RoutineBody,
        )),
        other => Err(BridgeError::unsupported(format!(
            "{} cannot appear in a routine body",
            other.operation()
        ))),
    }
}

/// Substitute bound placeholders back into literal positions.
///
/// Placeholders appear in ascending order in the insert builder's output,
/// so replacing from the highest index down means `$1` can never match the
/// prefix of an unreplaced `$10`.
fn inline_parameters(statement: Statement) -> String {
    let mut sql = statement.sql;
    for (index, value) in statement.params.iter().enumerate().rev() {
        let placeholder = format!("${}", index + 1);
        let literal = ValueMode::RoutineBody.literal(&value.0);
        sql = sql.replacen(&placeholder, &literal, 1);
    }
    sql
}
