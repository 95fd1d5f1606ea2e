pub mod manager;
pub mod memory;
pub mod models;
pub mod repository;

use sqlx::PgPool;
use std::sync::Arc;

use models::{GolfClub, GolfCourse, GolfRound, Hole, TeeBox};

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryRepository;
pub use repository::{
    GolfClubRepository, GolfCourseRepository, GolfRoundRepository, HoleRepository, Model,
    PgRepository, Repository, TeeBoxRepository,
};

/// One repository handle per entity, shared across requests
#[derive(Clone)]
pub struct Repositories {
    pub golf_clubs: Arc<GolfClubRepository>,
    pub golf_courses: Arc<dyn GolfCourseRepository>,
    pub tee_boxes: Arc<dyn TeeBoxRepository>,
    pub holes: Arc<dyn HoleRepository>,
    pub golf_rounds: Arc<dyn GolfRoundRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            golf_clubs: Arc::new(PgRepository::<GolfClub>::new(pool.clone())),
            golf_courses: Arc::new(PgRepository::<GolfCourse>::new(pool.clone())),
            tee_boxes: Arc::new(PgRepository::<TeeBox>::new(pool.clone())),
            holes: Arc::new(PgRepository::<Hole>::new(pool.clone())),
            golf_rounds: Arc::new(PgRepository::<GolfRound>::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            golf_clubs: Arc::new(MemoryRepository::<GolfClub>::new()),
            golf_courses: Arc::new(MemoryRepository::<GolfCourse>::new()),
            tee_boxes: Arc::new(MemoryRepository::<TeeBox>::new()),
            holes: Arc::new(MemoryRepository::<Hole>::new()),
            golf_rounds: Arc::new(MemoryRepository::<GolfRound>::new()),
        }
    }
}
