use axum::Json;
use axum::http::StatusCode;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::response::ApiResponse;
use db::models::attendance_record::{AttendanceError, DayStat, DaySummary, Location, Model};

/// Wire representation of an attendance record. Field names are camelCase —
/// the contract the member/staff portals consume.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecordResponse {
    pub id: i64,
    pub member_id: i64,
    pub check_in_time: String,
    pub check_out_time: Option<String>,
    pub location: Location,
    pub notes: Option<String>,
    pub duration_minutes: Option<i64>,
}

impl From<Model> for AttendanceRecordResponse {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            member_id: m.member_id,
            check_in_time: m.check_in_time.to_rfc3339(),
            check_out_time: m.check_out_time.map(|t| t.to_rfc3339()),
            location: m.location,
            notes: m.notes,
            duration_minutes: m.duration_minutes,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CheckInReq {
    pub location: Location,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CheckOutReq {
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TodayQuery {
    /// Calendar day to snapshot (UTC); defaults to the current day.
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub days: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayStats {
    pub total_check_ins: i64,
    pub currently_in_gym: i64,
    pub average_visit_duration: f64,
}

impl From<DaySummary> for TodayStats {
    fn from(s: DaySummary) -> Self {
        Self {
            total_check_ins: s.total_check_ins,
            currently_in_gym: s.currently_in_gym,
            average_visit_duration: s.average_visit_duration,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayResponse {
    pub check_ins: Vec<AttendanceRecordResponse>,
    /// Same records under the key older dashboard clients read.
    pub attendance: Vec<AttendanceRecordResponse>,
    pub stats: TodayStats,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStatResponse {
    pub date: String,
    pub visits: i64,
    pub unique_members: i64,
}

impl From<DayStat> for DailyStatResponse {
    fn from(s: DayStat) -> Self {
        Self {
            date: s.date.to_string(),
            visits: s.visits,
            unique_members: s.unique_members,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub total_visits: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub daily_stats: Vec<DailyStatResponse>,
    pub summary: StatsSummary,
}

/// Maps a tracker error to the HTTP status and envelope the clients expect.
/// Invariant violations are 400s with a distinguishing message; storage
/// failures are logged and reported generically.
pub(super) fn attendance_error<T: Serialize>(
    err: AttendanceError,
) -> (StatusCode, Json<ApiResponse<T>>) {
    match err {
        AttendanceError::UnknownMember => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(err.to_string())),
        ),
        AttendanceError::AlreadyCheckedIn | AttendanceError::NotCheckedIn => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(err.to_string())),
        ),
        AttendanceError::Db(e) => {
            tracing::error!("attendance operation failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}
