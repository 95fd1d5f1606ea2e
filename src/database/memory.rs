use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicI32, Ordering};
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{GolfCourse, GolfRound, Hole, TeeBox};
use crate::database::repository::{
    parse_ids, GolfCourseRepository, GolfRoundRepository, HoleRepository, Model, Repository,
    TeeBoxRepository,
};

/// Process-local store used for `DATABASE_BACKEND=memory` and tests.
/// Records are kept flat: owned children are not attached on read and
/// foreign keys are not enforced.
pub struct MemoryRepository<M> {
    records: RwLock<Vec<M>>,
    next_id: AtomicI32,
}

impl<M: Model> MemoryRepository<M> {
    pub fn new() -> Self {
        Self::with_records(vec![])
    }

    /// Seed the store; new ids continue after the largest seeded id
    pub fn with_records(records: Vec<M>) -> Self {
        let next_id = records.iter().map(|r| r.id()).max().unwrap_or(0) + 1;
        Self {
            records: RwLock::new(records),
            next_id: AtomicI32::new(next_id),
        }
    }

    pub async fn filter<F>(&self, predicate: F) -> Vec<M>
    where
        F: Fn(&M) -> bool + Send,
    {
        self.records
            .read()
            .await
            .iter()
            .filter(|r| predicate(r))
            .cloned()
            .collect()
    }

    fn insert(&self, records: &mut Vec<M>, data: M::New) -> M {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = M::materialize(id, data, Utc::now().naive_utc());
        records.push(record.clone());
        record
    }
}

impl<M: Model> Default for MemoryRepository<M> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<M: Model> Repository<M> for MemoryRepository<M> {
    async fn get(&self, model_id: i32) -> Result<Option<M>, DatabaseError> {
        Ok(self.filter(|r| r.id() == model_id).await.into_iter().next())
    }

    async fn get_by_ids(&self, ids: &[String]) -> Result<Vec<M>, DatabaseError> {
        let ids = parse_ids(ids)?;
        Ok(self.filter(|r| ids.contains(&r.id())).await)
    }

    async fn get_all(&self) -> Result<Vec<M>, DatabaseError> {
        Ok(self.records.read().await.clone())
    }

    async fn create(&self, data: M::New) -> Result<M, DatabaseError> {
        let mut records = self.records.write().await;
        Ok(self.insert(&mut records, data))
    }

    async fn bulk_create(&self, data: Vec<M::New>) -> Result<Vec<M>, DatabaseError> {
        let mut records = self.records.write().await;
        Ok(data
            .into_iter()
            .map(|new| self.insert(&mut records, new))
            .collect())
    }

    async fn delete(&self, model_id: i32) -> Result<bool, DatabaseError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id() != model_id);
        Ok(records.len() < before)
    }
}

#[async_trait]
impl GolfCourseRepository for MemoryRepository<GolfCourse> {
    async fn get_by_golf_club_id(&self, golf_club_id: i32) -> Result<Vec<GolfCourse>, DatabaseError> {
        Ok(self.filter(|c| c.golf_club_id == golf_club_id).await)
    }
}

#[async_trait]
impl TeeBoxRepository for MemoryRepository<TeeBox> {
    async fn get_by_golf_course_id(&self, golf_course_id: i32) -> Result<Vec<TeeBox>, DatabaseError> {
        Ok(self.filter(|t| t.golf_course_id == golf_course_id).await)
    }
}

#[async_trait]
impl HoleRepository for MemoryRepository<Hole> {
    async fn get_by_tee_box_id(&self, tee_box_id: i32) -> Result<Vec<Hole>, DatabaseError> {
        let mut holes = self.filter(|h| h.tee_box_id == tee_box_id).await;
        holes.sort_by_key(|h| h.hole_number);
        Ok(holes)
    }
}

#[async_trait]
impl GolfRoundRepository for MemoryRepository<GolfRound> {
    async fn get_by_user_id(&self, user_id: i32) -> Result<Vec<GolfRound>, DatabaseError> {
        let mut rounds = self.filter(|r| r.user_id == user_id).await;
        rounds.sort_by(|a, b| b.played_on.cmp(&a.played_on).then(b.id.cmp(&a.id)));
        Ok(rounds)
    }
}
