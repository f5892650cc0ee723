use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::response::ApiResponse;
use util::state::AppState;

use db::models::member::Model as Member;

/// DELETE /api/members/{member_id}
///
/// Removes a member; their attendance records go with them (cascade).
pub async fn delete_member(
    State(state): State<AppState>,
    Path(member_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<()>>) {
    let db = state.db();

    match Member::delete_by_id(db, member_id).await {
        Ok(true) => (
            StatusCode::OK,
            Json(ApiResponse::success((), "Member deleted")),
        ),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Member not found")),
        ),
        Err(e) => {
            tracing::error!("failed to delete member {member_id}: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error deleting member")),
            )
        }
    }
}
