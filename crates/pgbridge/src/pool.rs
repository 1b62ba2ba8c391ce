//! Connection pool utilities

use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use tokio_postgres::NoTls;

use crate::error::{BridgeError, BridgeResult};

/// Create a connection pool from a database URL.
///
/// Uses `NoTls` and small default settings, suitable for local use. For
/// tuned pools, use [`create_pool_with_config`].
pub fn create_pool(database_url: &str) -> BridgeResult<Pool> {
    create_pool_with_config(database_url, 16)
}

/// Create a connection pool with a custom maximum size.
pub fn create_pool_with_config(database_url: &str, max_size: usize) -> BridgeResult<Pool> {
    let pg_config: tokio_postgres::Config = database_url
        .parse()
        .map_err(|e: tokio_postgres::Error| BridgeError::Connection(e.to_string()))?;

    let manager_config = ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    };
    let manager = Manager::from_config(pg_config, NoTls, manager_config);
    Pool::builder(manager)
        .max_size(max_size)
        .build()
        .map_err(|e| BridgeError::Pool(e.to_string()))
}
