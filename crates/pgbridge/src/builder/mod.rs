//! Statement builders.
//!
//! One module per operation kind. Every builder is a stateless function from
//! a typed request fragment to SQL text; only the insert builder also
//! produces bound parameters. Shared WHERE/ORDER BY rendering lives in
//! [`where_clause`].

pub mod alter;
pub mod delete;
pub mod drop;
pub mod insert;
pub mod routine;
pub mod select;
pub mod table;
pub mod update;
mod where_clause;

pub use alter::build_alter_table;
pub use delete::build_delete;
pub use drop::build_drop_table;
pub use insert::build_insert;
pub use routine::{
    build_call_function, build_call_procedure, build_create_function, build_create_procedure,
};
pub use select::build_select;
pub use table::build_create_table;
pub use update::build_update;

use tokio_postgres::types::ToSql;

use crate::value::PgValue;

/// A compiled SQL statement plus its bound parameters.
///
/// Every builder except insert produces plain text; insert is the
/// parameterized path and carries its values here.
#[derive(Debug)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<PgValue>,
}

impl Statement {
    /// A statement with no bound parameters.
    pub fn text(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Parameter references in the form tokio-postgres expects.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .map(|value| value as &(dyn ToSql + Sync))
            .collect()
    }
}

#[cfg(test)]
mod tests;
