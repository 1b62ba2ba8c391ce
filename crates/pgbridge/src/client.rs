//! Generic client trait for unified database access.

use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

use crate::error::{BridgeError, BridgeResult};

/// A trait that unifies database clients and transactions.
///
/// The dispatcher only needs two capabilities from its executor: run a
/// statement for its row data, or run it for an affected-row count. Passing
/// a `tokio_postgres::Transaction` makes a multi-item request atomic.
pub trait GenericClient: Send + Sync {
    /// Execute a query and return all rows.
    fn query(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = BridgeResult<Vec<Row>>> + Send;

    /// Execute a statement and return the number of affected rows.
    fn execute(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = BridgeResult<u64>> + Send;
}

impl GenericClient for tokio_postgres::Client {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> BridgeResult<Vec<Row>> {
        tokio_postgres::Client::query(self, sql, params)
            .await
            .map_err(BridgeError::from_db_error)
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> BridgeResult<u64> {
        tokio_postgres::Client::execute(self, sql, params)
            .await
            .map_err(BridgeError::from_db_error)
    }
}

impl GenericClient for tokio_postgres::Transaction<'_> {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> BridgeResult<Vec<Row>> {
        tokio_postgres::Transaction::query(self, sql, params)
            .await
            .map_err(BridgeError::from_db_error)
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> BridgeResult<u64> {
        tokio_postgres::Transaction::execute(self, sql, params)
            .await
            .map_err(BridgeError::from_db_error)
    }
}

impl<C: GenericClient> GenericClient for &C {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> BridgeResult<Vec<Row>> {
        (*self).query(sql, params).await
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> BridgeResult<u64> {
        (*self).execute(sql, params).await
    }
}

/// Pooled client wrapper.
#[cfg(feature = "pool")]
pub struct PoolClient(deadpool_postgres::Client);

#[cfg(feature = "pool")]
impl PoolClient {
    /// Take a connection from the pool.
    pub async fn from_pool(pool: &deadpool_postgres::Pool) -> BridgeResult<Self> {
        Ok(Self(pool.get().await?))
    }
}

#[cfg(feature = "pool")]
impl GenericClient for PoolClient {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> BridgeResult<Vec<Row>> {
        self.0
            .query(sql, params)
            .await
            .map_err(BridgeError::from_db_error)
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> BridgeResult<u64> {
        self.0
            .execute(sql, params)
            .await
            .map_err(BridgeError::from_db_error)
    }
}
