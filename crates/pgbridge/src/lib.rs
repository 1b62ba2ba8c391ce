//! # pgbridge
//!
//! Compile JSON-described PostgreSQL operations into SQL.
//!
//! One [`Request`] describes one DDL or DML operation — create/alter/drop
//! table, insert/select/update/delete rows, create/call stored routines —
//! and the engine turns it into correct, unambiguous SQL text (plus a bound
//! parameter list for inserts).
//!
//! ## Features
//!
//! - **Typed requests**: the wire shape deserializes into a tagged sum type;
//!   a malformed or unknown payload is rejected at the boundary
//! - **One quoting rule**: every literal goes through [`sql_literal`]
//! - **Pure builders**: stateless functions from request fragment to SQL,
//!   safe to call concurrently
//! - **Pluggable execution**: [`dispatch`] drives any [`GenericClient`];
//!   pass a transaction for multi-statement atomicity
//!
//! ## Example
//!
//! ```ignore
//! use pgbridge::{compile, Request};
//!
//! let request: Request = serde_json::from_str(r#"{
//!     "operation": "SELECT",
//!     "table": "users",
//!     "conditions": {"WHERE": {"status": "active"}, "LIMIT": 10}
//! }"#)?;
//!
//! let statements = compile(&request)?;
//! assert_eq!(
//!     statements[0].sql,
//!     "SELECT * FROM users WHERE status = 'active' LIMIT 10"
//! );
//! ```

pub mod builder;
pub mod client;
pub mod dispatch;
pub mod error;
pub mod request;
pub mod row;
pub mod types;
pub mod value;

pub use builder::Statement;
pub use client::GenericClient;
pub use dispatch::{Outcome, compile, dispatch};
pub use error::{BridgeError, BridgeResult};
pub use request::{
    FunctionDefinition, ProcedureDefinition, Request, ReturnKeyword, ReturnSpec, RoutineCall,
    RoutineParameter,
};
pub use row::row_to_json;
pub use types::{
    AlterAction, AlterTableDefinition, ColumnConstraint, ColumnDefinition, Conditions, DataType,
    DropTableDefinition, JsonMap, OnDelete, OrderBy, SortDirection, TableConstraint,
    TableDefinition,
};
pub use value::{PgValue, sql_literal};

#[cfg(feature = "pool")]
pub mod pool;

#[cfg(feature = "pool")]
pub use client::PoolClient;

#[cfg(feature = "pool")]
pub use pool::{create_pool, create_pool_with_config};
