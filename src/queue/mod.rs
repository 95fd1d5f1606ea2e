//! Handicap recalculation queue.
//!
//! The request path pushes `HandicapJob`s into a bounded channel with
//! `try_send`; a background worker drains it and hands each job to a
//! `JobPublisher`, retrying with linear backoff before dead-lettering.

pub mod log;
#[cfg(feature = "sqs")]
pub mod sqs;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::config::{QueueBackend, QueueConfig};

pub use self::log::LogPublisher;
#[cfg(feature = "sqs")]
pub use self::sqs::SqsPublisher;

/// Request to recompute one golfer's handicap index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandicapJob {
    pub job_id: Uuid,
    pub user_id: i32,
    pub requested_at: DateTime<Utc>,
}

impl HandicapJob {
    pub fn new(user_id: i32) -> Self {
        Self {
            job_id: Uuid::new_v4(),
            user_id,
            requested_at: Utc::now(),
        }
    }
}

#[derive(Debug, Error)]
pub enum QueueError {
    #[error("handicap queue is full")]
    Full,

    #[error("handicap queue is closed")]
    Closed,

    #[error("failed to publish job: {0}")]
    Publish(String),

    #[error("queue configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

/// Sending half shared by request handlers
#[derive(Debug, Clone)]
pub struct HandicapQueue {
    tx: mpsc::Sender<HandicapJob>,
}

impl HandicapQueue {
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<HandicapJob>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }

    /// Never waits for space
    pub fn enqueue(&self, job: HandicapJob) -> Result<(), QueueError> {
        self.tx.try_send(job).map_err(|e| match e {
            TrySendError::Full(_) => QueueError::Full,
            TrySendError::Closed(_) => QueueError::Closed,
        })
    }
}

/// Transport that delivers a job to the handicap calculator
#[async_trait]
pub trait JobPublisher: Send + Sync {
    async fn publish(&self, job: &HandicapJob) -> Result<(), QueueError>;
}

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl From<&QueueConfig> for RetryPolicy {
    fn from(config: &QueueConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            backoff: Duration::from_millis(config.retry_backoff_ms),
        }
    }
}

/// Drain `rx` until every `HandicapQueue` is dropped
pub fn spawn_handicap_worker(
    mut rx: mpsc::Receiver<HandicapJob>,
    publisher: Arc<dyn JobPublisher>,
    policy: RetryPolicy,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(job) = rx.recv().await {
            deliver(publisher.as_ref(), &job, policy).await;
        }
        tracing::info!("Handicap queue closed, worker exiting");
    })
}

async fn deliver(publisher: &dyn JobPublisher, job: &HandicapJob, policy: RetryPolicy) -> bool {
    for attempt in 1..=policy.max_attempts {
        match publisher.publish(job).await {
            Ok(()) => {
                tracing::debug!("Published handicap job {} on attempt {}", job.job_id, attempt);
                return true;
            }
            Err(e) if attempt < policy.max_attempts => {
                tracing::warn!(
                    "Handicap job {} attempt {}/{} failed: {}",
                    job.job_id,
                    attempt,
                    policy.max_attempts,
                    e
                );
                tokio::time::sleep(policy.backoff * attempt).await;
            }
            Err(e) => {
                let payload = serde_json::to_string(job).unwrap_or_default();
                tracing::error!(
                    "Dead-lettering handicap job after {} attempts: {} payload={}",
                    attempt,
                    e,
                    payload
                );
            }
        }
    }
    false
}

/// Build the configured transport
pub async fn publisher_from_config(config: &QueueConfig) -> Result<Arc<dyn JobPublisher>, QueueError> {
    match config.backend {
        QueueBackend::Log => Ok(Arc::new(LogPublisher)),
        #[cfg(feature = "sqs")]
        QueueBackend::Sqs => {
            let url = config
                .queue_url
                .clone()
                .ok_or_else(|| QueueError::Config("HANDICAP_QUEUE_URL is not set".to_string()))?;
            Ok(Arc::new(SqsPublisher::from_env(url).await))
        }
        #[cfg(not(feature = "sqs"))]
        QueueBackend::Sqs => Err(QueueError::Config(
            "QUEUE_BACKEND=sqs requires building with --features sqs".to_string(),
        )),
    }
}
