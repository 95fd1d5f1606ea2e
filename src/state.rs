use axum::extract::FromRef;
use sqlx::PgPool;

use crate::auth::JwtService;
use crate::database::Repositories;
use crate::queue::HandicapQueue;
use crate::services::RoundService;

/// Everything a request handler may touch, cloned per request
#[derive(Clone)]
pub struct AppState {
    pub repos: Repositories,
    pub round_service: RoundService,
    pub jwt: JwtService,
    /// Present only with the PostgreSQL backend; used by `/health`
    pub db: Option<PgPool>,
}

impl AppState {
    pub fn new(repos: Repositories, queue: HandicapQueue, jwt: JwtService, db: Option<PgPool>) -> Self {
        let round_service = RoundService::new(repos.golf_rounds.clone(), queue);
        Self {
            repos,
            round_service,
            jwt,
            db,
        }
    }
}

impl FromRef<AppState> for JwtService {
    fn from_ref(state: &AppState) -> Self {
        state.jwt.clone()
    }
}
