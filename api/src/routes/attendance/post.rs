use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;

use crate::response::ApiResponse;
use util::state::AppState;

use super::common::{AttendanceRecordResponse, CheckInReq, CheckOutReq, attendance_error};
use db::models::attendance_record::Model as AttendanceRecord;

/// POST /api/attendance/checkin/{member_id}
///
/// Opens a visit for the member. Fails with 404 if the member id does not
/// resolve and 400 if the member already has an open visit.
pub async fn check_in(
    State(state): State<AppState>,
    Path(member_id): Path<i64>,
    Json(body): Json<CheckInReq>,
) -> (StatusCode, Json<ApiResponse<AttendanceRecordResponse>>) {
    let db = state.db();

    match AttendanceRecord::check_in(
        db,
        member_id,
        body.location,
        body.notes.as_deref(),
        Utc::now(),
    )
    .await
    {
        Ok(rec) => {
            tracing::info!(member_id, location = %rec.location, "member checked in");
            (
                StatusCode::CREATED,
                Json(ApiResponse::success(rec.into(), "Checked in")),
            )
        }
        Err(e) => attendance_error(e),
    }
}

/// POST /api/attendance/checkout/{member_id}
///
/// Closes the member's open visit, computing its duration. Fails with 404 if
/// the member id does not resolve and 400 if no visit is open — including a
/// repeat checkout, which never double-closes.
pub async fn check_out(
    State(state): State<AppState>,
    Path(member_id): Path<i64>,
    Json(body): Json<CheckOutReq>,
) -> (StatusCode, Json<ApiResponse<AttendanceRecordResponse>>) {
    let db = state.db();

    match AttendanceRecord::check_out(db, member_id, body.notes.as_deref(), Utc::now()).await {
        Ok(rec) => {
            tracing::info!(
                member_id,
                duration_minutes = rec.duration_minutes,
                "member checked out"
            );
            (
                StatusCode::OK,
                Json(ApiResponse::success(rec.into(), "Checked out")),
            )
        }
        Err(e) => attendance_error(e),
    }
}
