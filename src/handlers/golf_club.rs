use axum::extract::{RawQuery, State};

use crate::database::models::{GolfClub, GolfCourse};
use crate::database::{GolfCourseRepository, Repository};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, IdPath, JsonBody};
use crate::schemas::{GolfClubInput, GolfCourseInput, Validate};
use crate::state::AppState;

use super::utils::ids_from_query;

/// GET /api/golf-clubs/ - All clubs, or those named by repeated `id` parameters
pub async fn list(State(state): State<AppState>, RawQuery(query): RawQuery) -> ApiResult<Vec<GolfClub>> {
    let ids = ids_from_query(query.as_deref());
    let clubs = if ids.is_empty() {
        state.repos.golf_clubs.get_all().await?
    } else {
        state.repos.golf_clubs.get_by_ids(&ids).await?
    };
    Ok(ApiResponse::success(clubs))
}

/// POST /api/golf-clubs/
pub async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<GolfClubInput>,
) -> ApiResult<GolfClub> {
    let input = input.validated()?;
    let club = state.repos.golf_clubs.create(input.into_new()).await?;
    Ok(ApiResponse::success(club))
}

/// GET /api/golf-clubs/:id
pub async fn get(State(state): State<AppState>, IdPath(id): IdPath<i32>) -> ApiResult<GolfClub> {
    state
        .repos
        .golf_clubs
        .get(id)
        .await?
        .map(ApiResponse::success)
        .ok_or_else(|| ApiError::not_found(format!("Golf club {} not found", id)))
}

/// DELETE /api/golf-clubs/:id
pub async fn delete(State(state): State<AppState>, IdPath(id): IdPath<i32>) -> ApiResult<()> {
    if state.repos.golf_clubs.delete(id).await? {
        Ok(ApiResponse::no_content())
    } else {
        Err(ApiError::bad_request(format!("Golf club {} could not be deleted", id)))
    }
}

/// GET /api/golf-clubs/:id/golf-courses
pub async fn list_courses(State(state): State<AppState>, IdPath(id): IdPath<i32>) -> ApiResult<Vec<GolfCourse>> {
    let courses = state.repos.golf_courses.get_by_golf_club_id(id).await?;
    Ok(ApiResponse::success(courses))
}

/// POST /api/golf-clubs/:id/golf-courses
pub async fn create_course(
    State(state): State<AppState>,
    IdPath(id): IdPath<i32>,
    JsonBody(input): JsonBody<GolfCourseInput>,
) -> ApiResult<GolfCourse> {
    let input = input.validated()?;
    let course = state.repos.golf_courses.create(input.into_new(id)).await?;
    Ok(ApiResponse::success(course))
}
