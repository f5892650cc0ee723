use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::response::ApiResponse;
use util::state::AppState;

use super::common::{EditMemberReq, MemberResponse};
use db::models::member::Model as Member;

/// PUT /api/members/{member_id}
///
/// Replaces a member's details. The email address must stay unique.
pub async fn edit_member(
    State(state): State<AppState>,
    Path(member_id): Path<i64>,
    Json(body): Json<EditMemberReq>,
) -> (StatusCode, Json<ApiResponse<MemberResponse>>) {
    let db = state.db();

    if let Err(errors) = body.validate() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::error(errors.to_string())),
        );
    }

    match Member::email_taken(db, &body.email, Some(member_id)).await {
        Ok(true) => {
            return (
                StatusCode::CONFLICT,
                Json(ApiResponse::error("Email already in use")),
            );
        }
        Ok(false) => {}
        Err(e) => {
            tracing::error!("failed to check member email: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error updating member")),
            );
        }
    }

    match Member::edit(
        db,
        member_id,
        &body.first_name,
        &body.last_name,
        &body.email,
        body.phone.as_deref(),
    )
    .await
    {
        Ok(Some(m)) => (
            StatusCode::OK,
            Json(ApiResponse::success(m.into(), "Member updated")),
        ),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Member not found")),
        ),
        Err(e) => {
            tracing::error!("failed to update member {member_id}: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error updating member")),
            )
        }
    }
}
