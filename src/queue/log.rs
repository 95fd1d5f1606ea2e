use async_trait::async_trait;

use super::{HandicapJob, JobPublisher, QueueError};

/// Records jobs in the log; the default transport for local runs
#[derive(Debug, Default, Clone, Copy)]
pub struct LogPublisher;

#[async_trait]
impl JobPublisher for LogPublisher {
    async fn publish(&self, job: &HandicapJob) -> Result<(), QueueError> {
        let payload = serde_json::to_string(job)?;
        tracing::info!(user_id = job.user_id, job_id = %job.job_id, "Handicap recalculation requested: {}", payload);
        Ok(())
    }
}
