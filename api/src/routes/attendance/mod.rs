use axum::{
    Router,
    routing::{get, post},
};
use util::state::AppState;

mod common;
mod get;
mod post;

pub use get::{currently_checked_in, stats, today_snapshot};
pub use post::{check_in, check_out};

pub fn attendance_routes() -> Router<AppState> {
    Router::new()
        .route("/checkin/{member_id}", post(check_in))
        .route("/checkout/{member_id}", post(check_out))
        .route("/today", get(today_snapshot))
        .route("/current", get(currently_checked_in))
        .route("/stats", get(stats))
}
