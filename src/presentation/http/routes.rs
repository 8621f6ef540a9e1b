//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    middleware,
    response::IntoResponse,
    routing::{delete, get, post},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::{auth_middleware, track_metrics};
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_routes(state.clone()))
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .route_layer(middleware::from_fn(track_metrics))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}

/// API v1 routes, all protected
fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(user_routes())
        .merge(group_routes())
        .merge(match_routes())
        .merge(message_routes())
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/me",
            get(handlers::user::get_current_user).patch(handlers::user::update_current_user),
        )
        .route("/users", get(handlers::user::list_users))
        .route("/users/{user_id}", get(handlers::user::get_user))
}

/// Group routes
fn group_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/groups",
            post(handlers::group::create_group).get(handlers::group::list_groups),
        )
        .route(
            "/groups/{group_id}",
            get(handlers::group::get_group)
                .patch(handlers::group::rename_group)
                .delete(handlers::group::delete_group),
        )
        .route("/groups/{group_id}/players", post(handlers::group::add_player))
        .route(
            "/groups/{group_id}/players/{user_id}",
            delete(handlers::group::remove_player),
        )
        .route("/groups/{group_id}/events", get(handlers::group::group_events))
}

/// Match routes
fn match_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/groups/{group_id}/matches",
            post(handlers::matches::create_match).get(handlers::matches::list_matches),
        )
        .route(
            "/matches/{match_id}",
            get(handlers::matches::get_match).delete(handlers::matches::cancel_match),
        )
        .route(
            "/matches/{match_id}/players",
            post(handlers::matches::join_match).delete(handlers::matches::leave_match),
        )
}

/// Message routes
fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/messages", get(handlers::message::list_messages))
        .route("/messages/{message_id}/read", post(handlers::message::mark_read))
        .route(
            "/messages/{message_id}",
            delete(handlers::message::delete_message),
        )
}
