use axum::extract::{RawQuery, State};
use serde_json::{Map, Value};

use crate::database::models::{GolfCourse, Hole, TeeBox};
use crate::database::{HoleRepository, Repository, TeeBoxRepository};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, IdPath, JsonBody};
use crate::schemas::{HoleBatch, TeeBoxInput, Validate};
use crate::state::AppState;

use super::utils::ids_from_query;

/// GET /api/golf-courses/ - All courses, or those named by repeated `id` parameters
pub async fn list(State(state): State<AppState>, RawQuery(query): RawQuery) -> ApiResult<Vec<GolfCourse>> {
    let ids = ids_from_query(query.as_deref());
    let courses = if ids.is_empty() {
        state.repos.golf_courses.get_all().await?
    } else {
        state.repos.golf_courses.get_by_ids(&ids).await?
    };
    Ok(ApiResponse::success(courses))
}

/// GET /api/golf-courses/:id
pub async fn get(State(state): State<AppState>, IdPath(id): IdPath<i32>) -> ApiResult<GolfCourse> {
    state
        .repos
        .golf_courses
        .get(id)
        .await?
        .map(ApiResponse::success)
        .ok_or_else(|| ApiError::not_found(format!("Golf course {} not found", id)))
}

/// DELETE /api/golf-courses/:id
pub async fn delete(State(state): State<AppState>, IdPath(id): IdPath<i32>) -> ApiResult<()> {
    if state.repos.golf_courses.delete(id).await? {
        Ok(ApiResponse::no_content())
    } else {
        Err(ApiError::bad_request(format!("Golf course {} could not be deleted", id)))
    }
}

/// GET /api/golf-courses/:id/tee-boxes
pub async fn list_tee_boxes(State(state): State<AppState>, IdPath(id): IdPath<i32>) -> ApiResult<Vec<TeeBox>> {
    let tee_boxes = state.repos.tee_boxes.get_by_golf_course_id(id).await?;
    Ok(ApiResponse::success(tee_boxes))
}

/// POST /api/golf-courses/:id/tee-boxes
pub async fn create_tee_box(
    State(state): State<AppState>,
    IdPath(id): IdPath<i32>,
    JsonBody(input): JsonBody<TeeBoxInput>,
) -> ApiResult<TeeBox> {
    let input = input.validated()?;
    let tee_box = state.repos.tee_boxes.create(input.into_new(id)).await?;
    Ok(ApiResponse::success(tee_box))
}

/// GET /api/golf-courses/tee-boxes/:id
pub async fn get_tee_box(State(state): State<AppState>, IdPath(id): IdPath<i32>) -> ApiResult<TeeBox> {
    state
        .repos
        .tee_boxes
        .get(id)
        .await?
        .map(ApiResponse::success)
        .ok_or_else(|| ApiError::not_found(format!("Tee box {} not found", id)))
}

/// DELETE /api/golf-courses/tee-boxes/:id
pub async fn delete_tee_box(State(state): State<AppState>, IdPath(id): IdPath<i32>) -> ApiResult<()> {
    if state.repos.tee_boxes.delete(id).await? {
        Ok(ApiResponse::no_content())
    } else {
        Err(ApiError::bad_request(format!("Tee box {} could not be deleted", id)))
    }
}

/// GET /api/golf-courses/:id/tee-boxes/:tee_box_id/holes
pub async fn list_holes(
    State(state): State<AppState>,
    IdPath((_id, tee_box_id)): IdPath<(i32, i32)>,
) -> ApiResult<Vec<Hole>> {
    let holes = state.repos.holes.get_by_tee_box_id(tee_box_id).await?;
    Ok(ApiResponse::success(holes))
}

/// POST /api/golf-courses/:id/tee-boxes/:tee_box_id/holes - Bulk create a tee box's holes
pub async fn create_holes(
    State(state): State<AppState>,
    IdPath((id, tee_box_id)): IdPath<(i32, i32)>,
    JsonBody(body): JsonBody<Map<String, Value>>,
) -> ApiResult<Vec<Hole>> {
    let batch = HoleBatch::from_body(body)?.validated()?;

    let tee_box = state
        .repos
        .tee_boxes
        .get(tee_box_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Tee box {} not found", tee_box_id)))?;
    if tee_box.golf_course_id != id {
        return Err(ApiError::bad_request(format!(
            "Tee box {} does not belong to golf course {}",
            tee_box_id, id
        )));
    }

    let stored = state.repos.holes.get_by_tee_box_id(tee_box_id).await?;
    batch.check_against(&stored)?;

    let holes = state.repos.holes.bulk_create(batch.into_new(id, tee_box_id)).await?;
    tracing::info!("Created {} holes for tee box {}", holes.len(), tee_box_id);
    Ok(ApiResponse::success(holes))
}
