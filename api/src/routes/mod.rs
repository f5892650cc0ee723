//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → Health check endpoint
//! - `/members` → Member directory CRUD
//! - `/attendance` → Check-in/check-out tracking and attendance statistics

use axum::Router;
use util::state::AppState;

pub mod attendance;
pub mod health;
pub mod members;

/// Builds the complete application router for all HTTP endpoints.
///
/// The returned router owns the shared `AppState` and mounts all route
/// groups under their respective base paths.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health::health_routes())
        .nest("/members", members::member_routes())
        .nest("/attendance", attendance::attendance_routes())
        .with_state(app_state)
}
