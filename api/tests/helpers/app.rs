use api::routes::routes;
use axum::Router;
use sea_orm::DatabaseConnection;
use util::state::AppState;

use db::test_utils::setup_test_db;

/// Builds the full application router over a fresh in-memory database.
///
/// Returns the router plus the database handle so tests can seed fixtures
/// and inspect state directly.
pub async fn make_test_app() -> (Router, DatabaseConnection) {
    let db = setup_test_db().await;
    let app_state = AppState::new(db.clone());

    let app = Router::new().nest("/api", routes(app_state));
    (app, db)
}
