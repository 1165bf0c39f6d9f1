//! Redis lock store provider
//!
//! Distributed lock store using Redis as the backend. Works against a single
//! server or a Redis Cluster.
//!
//! ## Features
//!
//! - `SET key value NX PX ttl` for acquisition
//! - Server-side Lua scripts for compare-and-delete and compare-and-expire
//! - Topology detection through `INFO cluster` when not configured
//!
//! ## Example
//!
//! ```ignore
//! use idemp_providers::lock_store::{RedisLockStore, RedisTopology};
//!
//! let store = RedisLockStore::standalone("redis://localhost:6379").await?;
//! // Or a cluster, from any subset of its nodes
//! let store = RedisLockStore::connect(&nodes, RedisTopology::Cluster).await?;
//! ```

use crate::constants::{
    REDIS_CLUSTER_ENABLED_LINE, REDIS_COMPARE_AND_DELETE_SCRIPT, REDIS_COMPARE_AND_EXPIRE_SCRIPT,
};
use async_trait::async_trait;
use idemp_domain::error::{Error, Result};
use idemp_domain::ports::LockStore;
use redis::aio::ConnectionManager;
use redis::cluster::ClusterClient;
use redis::cluster_async::ClusterConnection;
use redis::{Client, Cmd, FromRedisValue, RedisResult, Script};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// How the store reaches Redis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedisTopology {
    /// Cluster when several nodes are given, otherwise ask the node
    #[default]
    Auto,
    /// A single server
    Standalone,
    /// A Redis Cluster
    Cluster,
}

#[derive(Clone)]
enum RedisConnection {
    Standalone(ConnectionManager),
    Cluster(ClusterConnection),
}

/// Redis lock store
///
/// Connections are multiplexed and cheap to clone; each operation works on
/// its own handle.
#[derive(Clone)]
pub struct RedisLockStore {
    connection: RedisConnection,
    nodes: Vec<String>,
    compare_and_delete: Script,
    compare_and_expire: Script,
}

impl RedisLockStore {
    /// Connect to Redis
    ///
    /// # Arguments
    ///
    /// * `nodes` - One URL for a standalone server, one or more for a cluster
    /// * `topology` - Deployment kind, or `Auto` to detect it
    pub async fn connect(nodes: &[String], topology: RedisTopology) -> Result<Self> {
        let first = nodes
            .first()
            .ok_or_else(|| Error::invalid_argument("At least one Redis URL is required"))?;

        let topology = match topology {
            RedisTopology::Auto if nodes.len() > 1 => RedisTopology::Cluster,
            RedisTopology::Auto => detect_topology(first).await?,
            explicit => explicit,
        };

        let connection = match topology {
            RedisTopology::Cluster => RedisConnection::Cluster(cluster_connection(nodes).await?),
            _ => RedisConnection::Standalone(standalone_connection(first).await?),
        };

        info!(nodes = nodes.len(), topology = ?topology, "Connected to Redis lock store");

        Ok(Self {
            connection,
            nodes: nodes.to_vec(),
            compare_and_delete: Script::new(REDIS_COMPARE_AND_DELETE_SCRIPT),
            compare_and_expire: Script::new(REDIS_COMPARE_AND_EXPIRE_SCRIPT),
        })
    }

    /// Connect to a single Redis server
    pub async fn standalone(url: &str) -> Result<Self> {
        Self::connect(&[url.to_string()], RedisTopology::Standalone).await
    }

    /// Connect to a Redis Cluster through the given seed nodes
    pub async fn cluster(nodes: &[String]) -> Result<Self> {
        Self::connect(nodes, RedisTopology::Cluster).await
    }

    /// Whether the store talks to a Redis Cluster
    pub fn is_cluster(&self) -> bool {
        matches!(self.connection, RedisConnection::Cluster(_))
    }

    async fn query<T: FromRedisValue>(&self, cmd: &Cmd) -> RedisResult<T> {
        match &self.connection {
            RedisConnection::Standalone(manager) => {
                let mut conn = manager.clone();
                cmd.query_async(&mut conn).await
            }
            RedisConnection::Cluster(cluster) => {
                let mut conn = cluster.clone();
                cmd.query_async(&mut conn).await
            }
        }
    }

    async fn eval(&self, script: &Script, key: &str, args: &[&str]) -> RedisResult<i64> {
        let mut invocation = script.prepare_invoke();
        invocation.key(key);
        for arg in args {
            invocation.arg(*arg);
        }

        match &self.connection {
            RedisConnection::Standalone(manager) => {
                let mut conn = manager.clone();
                invocation.invoke_async(&mut conn).await
            }
            RedisConnection::Cluster(cluster) => {
                let mut conn = cluster.clone();
                invocation.invoke_async(&mut conn).await
            }
        }
    }
}

#[async_trait]
impl LockStore for RedisLockStore {
    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> Result<bool> {
        let mut cmd = redis::cmd("SET");
        cmd.arg(key)
            .arg(value)
            .arg("NX")
            .arg("PX")
            .arg(ttl_millis(ttl));

        let reply: Option<String> = self
            .query(&cmd)
            .await
            .map_err(|e| Error::store_unavailable_with_source(format!("Redis SET NX failed: {e}"), e))?;

        debug!(key = %key, created = reply.is_some(), "Redis SET NX");
        Ok(reply.is_some())
    }

    async fn compare_and_delete(&self, key: &str, expected: &str) -> Result<bool> {
        let deleted = self
            .eval(&self.compare_and_delete, key, &[expected])
            .await
            .map_err(|e| {
                Error::store_unavailable_with_source(format!("Redis compare-and-delete failed: {e}"), e)
            })?;
        Ok(deleted > 0)
    }

    async fn compare_and_expire(&self, key: &str, expected: &str, ttl: Duration) -> Result<bool> {
        let ttl = ttl_millis(ttl).to_string();
        let updated = self
            .eval(&self.compare_and_expire, key, &[expected, &ttl])
            .await
            .map_err(|e| {
                Error::store_unavailable_with_source(format!("Redis compare-and-expire failed: {e}"), e)
            })?;
        Ok(updated > 0)
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut cmd = redis::cmd("GET");
        cmd.arg(key);

        self.query(&cmd)
            .await
            .map_err(|e| Error::store_unavailable_with_source(format!("Redis GET failed: {e}"), e))
    }

    fn provider_name(&self) -> &str {
        "redis"
    }
}

impl std::fmt::Debug for RedisLockStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisLockStore")
            .field("nodes", &self.nodes)
            .field("cluster", &self.is_cluster())
            .finish()
    }
}

/// Redis rejects a zero expiry, so sub-millisecond TTLs round up to 1 ms
fn ttl_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1)
}

fn open_client(url: &str) -> Result<Client> {
    Client::open(url)
        .map_err(|e| Error::configuration_with_source(format!("Invalid Redis URL {url}: {e}"), e))
}

async fn standalone_connection(url: &str) -> Result<ConnectionManager> {
    let client = open_client(url)?;
    ConnectionManager::new(client).await.map_err(|e| {
        Error::store_unavailable_with_source(format!("Failed to connect to Redis at {url}: {e}"), e)
    })
}

async fn cluster_connection(nodes: &[String]) -> Result<ClusterConnection> {
    let client = ClusterClient::new(nodes.to_vec()).map_err(|e| {
        Error::configuration_with_source(format!("Invalid Redis Cluster nodes: {e}"), e)
    })?;
    client.get_async_connection().await.map_err(|e| {
        Error::store_unavailable_with_source(format!("Failed to connect to Redis Cluster: {e}"), e)
    })
}

async fn detect_topology(url: &str) -> Result<RedisTopology> {
    let client = open_client(url)?;
    let mut conn = client.get_multiplexed_async_connection().await.map_err(|e| {
        Error::store_unavailable_with_source(format!("Failed to connect to Redis at {url}: {e}"), e)
    })?;

    let info: String = redis::cmd("INFO")
        .arg("cluster")
        .query_async(&mut conn)
        .await
        .map_err(|e| Error::store_unavailable_with_source(format!("Redis INFO failed: {e}"), e))?;

    let topology = if cluster_enabled(&info) {
        RedisTopology::Cluster
    } else {
        RedisTopology::Standalone
    };
    debug!(url = %url, topology = ?topology, "Detected Redis topology");
    Ok(topology)
}

fn cluster_enabled(info: &str) -> bool {
    info.lines().any(|line| line.trim() == REDIS_CLUSTER_ENABLED_LINE)
}
