//! Attendance: read-only routes (today snapshot, currently checked in,
//! trailing-range statistics).

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use chrono::Utc;

use crate::response::ApiResponse;
use util::state::AppState;

use super::common::{
    AttendanceRecordResponse, DailyStatResponse, StatsQuery, StatsResponse, StatsSummary,
    TodayQuery, TodayResponse,
};
use db::models::attendance_record::{Model as AttendanceRecord, summarize_day};

/// GET `/api/attendance/today`
///
/// Snapshot of one calendar day (UTC): that day's check-ins plus aggregate
/// stats over them.
///
/// **Query**:
/// - `date` *(optional, `YYYY-MM-DD`)*: day to snapshot; defaults to today.
///
/// **Response**: `TodayResponse` — `checkIns`, the same list as `attendance`,
/// and `stats` (`totalCheckIns`, `currentlyInGym`, `averageVisitDuration`).
/// The average covers only that day's closed visits; open visits are not
/// counted as zero-length.
pub async fn today_snapshot(
    State(state): State<AppState>,
    Query(q): Query<TodayQuery>,
) -> (StatusCode, Json<ApiResponse<TodayResponse>>) {
    let db = state.db();
    let day = q.date.unwrap_or_else(|| Utc::now().date_naive());

    match AttendanceRecord::for_day(db, day).await {
        Ok(records) => {
            let stats = summarize_day(&records).into();
            let check_ins: Vec<AttendanceRecordResponse> =
                records.iter().cloned().map(Into::into).collect();
            let attendance = records.into_iter().map(Into::into).collect();

            let resp = TodayResponse {
                check_ins,
                attendance,
                stats,
            };
            (
                StatusCode::OK,
                Json(ApiResponse::success(resp, "Today's attendance retrieved")),
            )
        }
        Err(e) => {
            tracing::error!("failed to load day snapshot: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error retrieving attendance")),
            )
        }
    }
}

/// GET `/api/attendance/current`
///
/// All open records, across all days. A member who checked in yesterday and
/// never checked out still appears here; nothing expires automatically.
///
/// **Response**: array of `AttendanceRecordResponse`, oldest check-in first.
pub async fn currently_checked_in(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<Vec<AttendanceRecordResponse>>>) {
    let db = state.db();

    match AttendanceRecord::currently_checked_in(db).await {
        Ok(records) => {
            let resp: Vec<AttendanceRecordResponse> = records.into_iter().map(Into::into).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(resp, "Currently checked in retrieved")),
            )
        }
        Err(e) => {
            tracing::error!("failed to load open records: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error retrieving attendance")),
            )
        }
    }
}

/// GET `/api/attendance/stats`
///
/// Daily visit counts over a trailing window of calendar days ending today
/// (UTC), zero-filled for days without visits.
///
/// **Query**:
/// - `days` *(optional)*: window size; default 7, clamped to 1..=90.
///
/// **Response**: `StatsResponse` — `dailyStats` (`date`, `visits`,
/// `uniqueMembers` per day) and `summary.totalVisits`.
pub async fn stats(
    State(state): State<AppState>,
    Query(q): Query<StatsQuery>,
) -> (StatusCode, Json<ApiResponse<StatsResponse>>) {
    let db = state.db();
    let days = q.days.unwrap_or(7).clamp(1, 90);
    let today = Utc::now().date_naive();

    match AttendanceRecord::day_stats(db, days, today).await {
        Ok(daily) => {
            let total_visits = daily.iter().map(|d| d.visits).sum();
            let resp = StatsResponse {
                daily_stats: daily.into_iter().map(DailyStatResponse::from).collect(),
                summary: StatsSummary { total_visits },
            };
            (
                StatusCode::OK,
                Json(ApiResponse::success(resp, "Attendance stats retrieved")),
            )
        }
        Err(e) => {
            tracing::error!("failed to aggregate stats: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error retrieving stats")),
            )
        }
    }
}
