//! Message producers.

use crate::error::{QueueError, QueueResult};
use crate::job::{JobEnvelope, JobId};
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Config, Pool, Runtime};
use openmusic_config::QueueConfig;
use openmusic_core::Interface;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Fire-and-forget enqueue of a serialized message onto a named queue.
#[async_trait]
pub trait MessageProducer: Interface + Send + Sync {
    /// Enqueues `envelope` on its queue and returns its id.
    async fn send(&self, envelope: JobEnvelope) -> QueueResult<JobId>;
}

/// Creates a Redis connection pool for the producer.
pub async fn create_queue_pool(config: &QueueConfig) -> QueueResult<Pool> {
    info!("Creating Redis connection pool for the export queue...");

    let pool = Config::from_url(&config.url)
        .builder()
        .map_err(|e| QueueError::Configuration(format!("Invalid Redis config: {}", e)))?
        .runtime(Runtime::Tokio1)
        .build()
        .map_err(|e| QueueError::Configuration(format!("Failed to create pool: {}", e)))?;

    let mut conn = pool.get().await?;
    redis::cmd("PING").query_async::<String>(&mut *conn).await?;

    info!("Export queue pool created successfully");
    Ok(pool)
}

/// Producer that `LPUSH`es JSON envelopes onto `<key_prefix>:<queue>`.
pub struct RedisMessageProducer {
    pool: Arc<Pool>,
    key_prefix: String,
}

impl RedisMessageProducer {
    /// Creates a producer over an existing pool.
    #[must_use]
    pub fn new(pool: Arc<Pool>, config: &QueueConfig) -> Self {
        Self {
            pool,
            key_prefix: config.key_prefix.clone(),
        }
    }

    fn queue_key(&self, queue: &str) -> String {
        format!("{}:{}", self.key_prefix, queue)
    }
}

#[async_trait]
impl MessageProducer for RedisMessageProducer {
    async fn send(&self, envelope: JobEnvelope) -> QueueResult<JobId> {
        let key = self.queue_key(&envelope.queue);
        let json = serde_json::to_string(&envelope)?;

        let mut conn = self.pool.get().await?;
        let _: () = conn.lpush(&key, json).await?;

        metrics::counter!("openmusic_jobs_enqueued_total", "queue" => envelope.queue.clone()).increment(1);
        debug!("Enqueued job {} on {}", envelope.id, key);
        Ok(envelope.id)
    }
}

/// Producer that keeps messages in memory, for local runs and tests.
#[derive(Default)]
pub struct InMemoryMessageProducer {
    sent: Mutex<Vec<JobEnvelope>>,
}

impl InMemoryMessageProducer {
    /// Creates an empty producer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages sent so far, oldest first.
    pub async fn sent(&self) -> Vec<JobEnvelope> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl MessageProducer for InMemoryMessageProducer {
    async fn send(&self, envelope: JobEnvelope) -> QueueResult<JobId> {
        let id = envelope.id.clone();
        self.sent.lock().await.push(envelope);
        Ok(id)
    }
}
