//! Cache invalidation
//!
//! Deleting fixture data must be paired with a cache flush, otherwise stale
//! cached reads keep surfacing the deleted rows. [`CacheInvalidator`] is the
//! single-call contract; [`RedisCache`] flushes the development Redis
//! database.

use std::future::Future;

use redis::aio::ConnectionManager;

use crate::error::{BillingError, BillingResult};

/// Cache-invalidation contract
pub trait CacheInvalidator: Send + Sync {
    /// Drop every cached entry
    fn flush_all(&self) -> impl Future<Output = BillingResult<()>> + Send;
}

/// Redis-backed cache invalidator
#[derive(Clone)]
pub struct RedisCache {
    manager: ConnectionManager,
}

impl RedisCache {
    /// Connect to Redis at the given URL
    pub async fn connect(url: &str) -> BillingResult<Self> {
        let client = redis::Client::open(url).map_err(|e| BillingError::Cache(e.to_string()))?;
        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| BillingError::Cache(e.to_string()))?;

        Ok(Self { manager })
    }
}

impl CacheInvalidator for RedisCache {
    async fn flush_all(&self) -> BillingResult<()> {
        let mut conn = self.manager.clone();
        let _: () = redis::cmd("FLUSHDB")
            .query_async(&mut conn)
            .await
            .map_err(|e| BillingError::Cache(e.to_string()))?;

        tracing::debug!("Flushed cache");

        Ok(())
    }
}
