use axum::extract::{Extension, State};

use crate::database::models::GolfRound;
use crate::database::GolfRoundRepository;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, JsonBody};
use crate::schemas::{GolfRoundInput, Validate};
use crate::state::AppState;

/// GET /api/golf-rounds/ - The caller's rounds, most recent first
pub async fn list(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Vec<GolfRound>> {
    let rounds = state.repos.golf_rounds.get_by_user_id(auth_user.user_id).await?;
    Ok(ApiResponse::success(rounds))
}

/// POST /api/golf-rounds/ - Record a round for the caller
pub async fn create(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    JsonBody(input): JsonBody<GolfRoundInput>,
) -> ApiResult<GolfRound> {
    let input = input.validated()?;
    let round = state.round_service.create_round(auth_user.user_id, input).await?;
    Ok(ApiResponse::success(round))
}
