//! Operation dispatch.
//!
//! [`compile`] is the pure translation path: one request in, the ordered
//! statement list out, nothing executed. [`dispatch`] drives the same
//! builders and hands each statement to the executor, mapping results to
//! [`Outcome`] values.
//!
//! Multi-item payloads (several CREATE TABLE definitions, several DROP
//! targets) become a sequence of independent statements. No transaction is
//! implied; pass a `tokio_postgres::Transaction` as the client to get
//! atomicity.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::builder::{
    Statement, build_alter_table, build_call_function, build_call_procedure, build_create_function,
    build_create_procedure, build_create_table, build_delete, build_drop_table, build_insert,
    build_select, build_update,
};
use crate::client::GenericClient;
use crate::error::{BridgeError, BridgeResult};
use crate::request::Request;
use crate::row::row_to_json;

/// The result of one executed statement: row data for reads, a
/// confirmation message for everything else.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Rows(Vec<Value>),
    Message { message: String },
}

impl Outcome {
    fn message(text: impl Into<String>) -> Self {
        Outcome::Message {
            message: text.into(),
        }
    }
}

/// Compile a request into its ordered statement list without executing it.
pub fn compile(request: &Request) -> BridgeResult<Vec<Statement>> {
    match request {
        Request::Create { create_table } => {
            if create_table.is_empty() {
                return Err(BridgeError::validation(
                    "CREATE requires at least one table definition",
                ));
            }
            create_table
                .iter()
                .map(|definition| build_create_table(definition).map(Statement::text))
                .collect()
        }
        Request::Insert { table, data } => Ok(vec![build_insert(table, data)?]),
        Request::Select {
            table,
            columns,
            conditions,
        } => Ok(vec![Statement::text(build_select(
            table,
            columns.as_deref(),
            conditions.as_ref(),
        ))]),
        Request::Update {
            table,
            data,
            conditions,
        } => Ok(vec![Statement::text(build_update(table, data, conditions)?)]),
        Request::Delete { table, conditions } => Ok(vec![Statement::text(build_delete(
            table,
            conditions.as_ref(),
        ))]),
        Request::Drop { drop_table } => Ok(vec![Statement::text(build_drop_table(drop_table)?)]),
        Request::Alter { alter_table } => Ok(vec![Statement::text(build_alter_table(alter_table))]),
        Request::CallProcedure { procedure } => {
            Ok(vec![Statement::text(build_call_procedure(procedure))])
        }
        Request::CallFunction { function } => {
            Ok(vec![Statement::text(build_call_function(function))])
        }
        Request::CreateProcedure { create_procedure } => Ok(vec![Statement::text(
            build_create_procedure(create_procedure)?,
        )]),
        Request::CreateFunction { create_function } => Ok(vec![Statement::text(
            build_create_function(create_function)?,
        )]),
    }
}

/// Execute a request against the given client and collect its outcomes.
///
/// Every statement of a multi-item payload is compiled before the first one
/// executes, so a validation error never leaves partial effects behind.
/// Execution errors partway through a sequence do: earlier statements stay
/// committed unless the client is a transaction.
pub async fn dispatch(
    client: &impl GenericClient,
    request: &Request,
) -> BridgeResult<Vec<Outcome>> {
    match request {
        Request::Create { create_table } => {
            if create_table.is_empty() {
                return Err(BridgeError::validation(
                    "CREATE requires at least one table definition",
                ));
            }
            let statements = create_table
                .iter()
                .map(|definition| {
                    build_create_table(definition)
                        .map(|sql| (definition.table_name.clone(), sql))
                })
                .collect::<BridgeResult<Vec<_>>>()?;

            let mut outcomes = Vec::with_capacity(statements.len());
            for (table_name, sql) in statements {
                execute(client, &Statement::text(sql)).await?;
                outcomes.push(Outcome::message(format!(
                    "Table '{table_name}' created successfully"
                )));
            }
            Ok(outcomes)
        }
        Request::Insert { table, data } => {
            let statement = build_insert(table, data)?;
            execute(client, &statement).await?;
            Ok(vec![Outcome::message(format!(
                "{} record(s) inserted into '{}' successfully",
                data.len(),
                table
            ))])
        }
        Request::Select {
            table,
            columns,
            conditions,
        } => {
            let statement =
                Statement::text(build_select(table, columns.as_deref(), conditions.as_ref()));
            let rows = query(client, &statement).await?;
            Ok(vec![Outcome::Rows(rows)])
        }
        Request::Update {
            table,
            data,
            conditions,
        } => {
            let statement = Statement::text(build_update(table, data, conditions)?);
            execute(client, &statement).await?;
            Ok(vec![Outcome::message(format!(
                "Records in '{table}' updated successfully"
            ))])
        }
        Request::Delete { table, conditions } => {
            let statement = Statement::text(build_delete(table, conditions.as_ref()));
            let count = execute(client, &statement).await?;
            Ok(vec![Outcome::message(format!(
                "{count} record(s) deleted from '{table}' successfully"
            ))])
        }
        Request::Drop { drop_table } => {
            let statement = Statement::text(build_drop_table(drop_table)?);
            execute(client, &statement).await?;
            Ok(drop_table
                .tables
                .iter()
                .map(|table| Outcome::message(format!("Table '{table}' dropped successfully")))
                .collect())
        }
        Request::Alter { alter_table } => {
            let statement = Statement::text(build_alter_table(alter_table));
            execute(client, &statement).await?;
            Ok(vec![Outcome::message(format!(
                "Table '{}' altered successfully",
                alter_table.table_name
            ))])
        }
        Request::CallProcedure { procedure } => {
            let statement = Statement::text(build_call_procedure(procedure));
            execute(client, &statement)
                .await
                .map_err(|err| BridgeError::routine(&procedure.name, err))?;
            Ok(vec![Outcome::message(format!(
                "Procedure '{}' executed successfully",
                procedure.name
            ))])
        }
        Request::CallFunction { function } => {
            let statement = Statement::text(build_call_function(function));
            let rows = query(client, &statement)
                .await
                .map_err(|err| BridgeError::routine(&function.name, err))?;

            if rows.is_empty() {
                Ok(vec![Outcome::message(format!(
                    "Function '{}' executed successfully (no results returned)",
                    function.name
                ))])
            } else {
                Ok(vec![
                    Outcome::Rows(rows),
                    Outcome::message(format!(
                        "Function '{}' executed successfully",
                        function.name
                    )),
                ])
            }
        }
        Request::CreateProcedure { create_procedure } => {
            let statement = Statement::text(build_create_procedure(create_procedure)?);
            execute(client, &statement).await?;
            Ok(vec![Outcome::message(format!(
                "Procedure '{}' created successfully",
                create_procedure.name
            ))])
        }
        Request::CreateFunction { create_function } => {
            let statement = Statement::text(build_create_function(create_function)?);
            execute(client, &statement).await?;
            Ok(vec![Outcome::message(format!(
                "Function '{}' created successfully",
                create_function.name
            ))])
        }
    }
}

async fn execute(client: &impl GenericClient, statement: &Statement) -> BridgeResult<u64> {
    debug!(sql = %statement.sql, params = statement.params.len(), "executing statement");
    client.execute(&statement.sql, &statement.params_ref()).await
}

async fn query(client: &impl GenericClient, statement: &Statement) -> BridgeResult<Vec<Value>> {
    debug!(sql = %statement.sql, "executing query");
    let rows = client.query(&statement.sql, &statement.params_ref()).await?;
    rows.iter().map(row_to_json).collect()
}
