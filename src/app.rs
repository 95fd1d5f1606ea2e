use axum::{
    http::HeaderValue,
    middleware,
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::handlers;
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

/// Router for every endpoint, bound to `state`
pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/health", get(handlers::health::health))
        .merge(golf_club_routes())
        .merge(golf_course_routes())
        // Bearer token required
        .merge(golf_round_routes(&state))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Outer layers that depend on deployment config
pub fn with_http_layers(router: Router, config: &AppConfig) -> Router {
    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .layer(TimeoutLayer::new(Duration::from_secs(config.server.request_timeout_secs)))
        .layer(cors)
}

fn golf_club_routes() -> Router<AppState> {
    use handlers::golf_club;

    Router::new()
        .route("/api/golf-clubs", get(golf_club::list).post(golf_club::create))
        .route("/api/golf-clubs/", get(golf_club::list).post(golf_club::create))
        .route("/api/golf-clubs/:id", get(golf_club::get).delete(golf_club::delete))
        .route(
            "/api/golf-clubs/:id/golf-courses",
            get(golf_club::list_courses).post(golf_club::create_course),
        )
}

fn golf_course_routes() -> Router<AppState> {
    use handlers::golf_course;

    Router::new()
        .route("/api/golf-courses", get(golf_course::list))
        .route("/api/golf-courses/", get(golf_course::list))
        .route("/api/golf-courses/:id", get(golf_course::get).delete(golf_course::delete))
        .route(
            "/api/golf-courses/:id/tee-boxes",
            get(golf_course::list_tee_boxes).post(golf_course::create_tee_box),
        )
        .route(
            "/api/golf-courses/tee-boxes/:id",
            get(golf_course::get_tee_box).delete(golf_course::delete_tee_box),
        )
        .route(
            "/api/golf-courses/:id/tee-boxes/:tee_box_id/holes",
            get(golf_course::list_holes).post(golf_course::create_holes),
        )
}

fn golf_round_routes(state: &AppState) -> Router<AppState> {
    use handlers::golf_round;

    Router::new()
        .route("/api/golf-rounds", get(golf_round::list).post(golf_round::create))
        .route("/api/golf-rounds/", get(golf_round::list).post(golf_round::create))
        .route_layer(middleware::from_fn_with_state(state.clone(), jwt_auth_middleware))
}
