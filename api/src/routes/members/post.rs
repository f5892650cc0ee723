use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::response::ApiResponse;
use util::state::AppState;

use super::common::{CreateMemberReq, MemberResponse};
use db::models::member::Model as Member;

/// POST /api/members
///
/// Registers a new member. The email address must be unique.
pub async fn create_member(
    State(state): State<AppState>,
    Json(body): Json<CreateMemberReq>,
) -> (StatusCode, Json<ApiResponse<MemberResponse>>) {
    let db = state.db();

    if let Err(errors) = body.validate() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::error(errors.to_string())),
        );
    }

    match Member::email_taken(db, &body.email, None).await {
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
                Json(ApiResponse::error("Database error creating member")),
            );
        }
    }

    match Member::create(
        db,
        &body.first_name,
        &body.last_name,
        &body.email,
        body.phone.as_deref(),
    )
    .await
    {
        Ok(m) => {
            tracing::info!(member_id = m.id, "member created");
            (
                StatusCode::CREATED,
                Json(ApiResponse::success(m.into(), "Member created")),
            )
        }
        Err(e) => {
            tracing::error!("failed to create member: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error creating member")),
            )
        }
    }
}
