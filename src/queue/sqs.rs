use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_sqs::Client as SqsClient;

use super::{HandicapJob, JobPublisher, QueueError};

/// Sends each job as a JSON message to one SQS queue
#[derive(Debug, Clone)]
pub struct SqsPublisher {
    client: SqsClient,
    queue_url: String,
}

impl SqsPublisher {
    pub fn new(client: SqsClient, queue_url: String) -> Self {
        Self { client, queue_url }
    }

    /// Credentials and region from the standard AWS environment chain
    pub async fn from_env(queue_url: String) -> Self {
        let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        Self::new(SqsClient::new(&config), queue_url)
    }
}

#[async_trait]
impl JobPublisher for SqsPublisher {
    async fn publish(&self, job: &HandicapJob) -> Result<(), QueueError> {
        let body = serde_json::to_string(job)?;
        self.client
            .send_message()
            .queue_url(&self.queue_url)
            .message_body(body)
            .send()
            .await
            .map_err(|e| QueueError::Publish(e.to_string()))?;
        Ok(())
    }
}
