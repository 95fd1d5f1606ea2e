use std::sync::Arc;

use crate::database::models::GolfRound;
use crate::database::{DatabaseError, GolfRoundRepository, Repository};
use crate::queue::{HandicapJob, HandicapQueue};
use crate::schemas::GolfRoundInput;

/// Persists submitted rounds and asks for the owner's handicap to be recomputed
#[derive(Clone)]
pub struct RoundService {
    rounds: Arc<dyn GolfRoundRepository>,
    queue: HandicapQueue,
}

impl RoundService {
    pub fn new(rounds: Arc<dyn GolfRoundRepository>, queue: HandicapQueue) -> Self {
        Self { rounds, queue }
    }

    pub async fn create_round(
        &self,
        user_id: i32,
        round_data: GolfRoundInput,
    ) -> Result<GolfRound, DatabaseError> {
        let round = self.rounds.create(round_data.into_new(user_id)).await?;
        tracing::info!("Created golf round {} for user {}", round.id, user_id);

        self.queue_handicap_calculation(user_id);
        Ok(round)
    }

    /// Enqueue failures are logged; the round has already been stored
    pub fn queue_handicap_calculation(&self, user_id: i32) {
        let job = HandicapJob::new(user_id);
        let job_id = job.job_id;
        match self.queue.enqueue(job) {
            Ok(()) => tracing::debug!("Queued handicap job {} for user {}", job_id, user_id),
            Err(e) => tracing::error!("Could not queue handicap recalculation for user {}: {}", user_id, e),
        }
    }
}
