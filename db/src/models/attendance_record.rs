//! Attendance tracking: one record per gym visit.
//!
//! A record is created open by a check-in (`check_out_time` absent) and
//! closed exactly once by a check-out; nothing else ever mutates it. The
//! "at most one open record per member" invariant is enforced with a single
//! conditional insert, and backed by a partial unique index on
//! `(member_id) WHERE check_out_time IS NULL`.
//!
//! All day-bucketing uses UTC midnights, through [`day_bounds`], so the
//! today snapshot and range statistics always agree on what "a day" is.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{DatabaseConnection, DbBackend, QueryOrder, Statement};
use strum::{Display, EnumString};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, serde::Serialize)]
#[sea_orm(table_name = "attendance_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub member_id: i64,
    /// Set at creation, immutable thereafter.
    pub check_in_time: DateTime<Utc>,
    /// Absent while the member is inside the gym.
    pub check_out_time: Option<DateTime<Utc>>,
    pub location: Location,
    pub notes: Option<String>,
    /// Whole minutes, floored; set once at close, never recomputed.
    pub duration_minutes: Option<i64>,
}

/// Where in the facility the visit was registered. Informational only.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    serde::Serialize,
    serde::Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "attendance_location")]
pub enum Location {
    #[sea_orm(string_value = "Main Gym")]
    #[serde(rename = "Main Gym")]
    #[strum(serialize = "Main Gym")]
    MainGym,

    #[sea_orm(string_value = "Cardio Area")]
    #[serde(rename = "Cardio Area")]
    #[strum(serialize = "Cardio Area")]
    CardioArea,

    #[sea_orm(string_value = "Weight Room")]
    #[serde(rename = "Weight Room")]
    #[strum(serialize = "Weight Room")]
    WeightRoom,

    #[sea_orm(string_value = "Group Classes")]
    #[serde(rename = "Group Classes")]
    #[strum(serialize = "Group Classes")]
    GroupClasses,

    #[sea_orm(string_value = "Pool")]
    #[serde(rename = "Pool")]
    #[strum(serialize = "Pool")]
    Pool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::member::Entity",
        from = "Column::MemberId",
        to = "super::member::Column::Id"
    )]
    Member,
}

impl Related<super::member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Member.def()
    }
    fn via() -> Option<RelationDef> {
        None
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Errors the tracker can return. Every failure is surfaced to the caller;
/// none is ever collapsed into a "succeeded" response.
#[derive(Debug, thiserror::Error)]
pub enum AttendanceError {
    #[error("Member not found")]
    UnknownMember,
    #[error("Member is already checked in")]
    AlreadyCheckedIn,
    #[error("Member is not checked in")]
    NotCheckedIn,
    #[error(transparent)]
    Db(#[from] DbErr),
}

/// Per-day aggregate used by the range statistics.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DayStat {
    pub date: NaiveDate,
    pub visits: i64,
    pub unique_members: i64,
}

/// Aggregate over one day's slice of the log.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DaySummary {
    pub total_check_ins: i64,
    pub currently_in_gym: i64,
    pub average_visit_duration: f64,
}

/// UTC `[midnight, next midnight)` bounds for a calendar day.
///
/// Every day-bucketing query goes through here; check-in classification and
/// "today" queries must not disagree on the boundary.
pub fn day_bounds(day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = day.and_time(NaiveTime::MIN).and_utc();
    (start, start + Duration::days(1))
}

/// Summarizes one day's records: total check-ins, how many of them are still
/// open, and the mean visit duration over the closed ones only. Open records
/// are excluded from the average, not counted as zero-length visits.
pub fn summarize_day(records: &[Model]) -> DaySummary {
    let closed: Vec<i64> = records.iter().filter_map(|r| r.duration_minutes).collect();
    let average_visit_duration = if closed.is_empty() {
        0.0
    } else {
        closed.iter().sum::<i64>() as f64 / closed.len() as f64
    };

    DaySummary {
        total_check_ins: records.len() as i64,
        currently_in_gym: records.iter().filter(|r| r.check_out_time.is_none()).count() as i64,
        average_visit_duration,
    }
}

impl Model {
    /// Opens a new visit for `member_id` at `now`.
    ///
    /// The insert is a single conditional statement, so of two concurrent
    /// check-ins for the same member exactly one creates the open record;
    /// the other gets [`AttendanceError::AlreadyCheckedIn`].
    pub async fn check_in(
        db: &DatabaseConnection,
        member_id: i64,
        location: Location,
        notes: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Self, AttendanceError> {
        if super::member::Entity::find_by_id(member_id)
            .one(db)
            .await?
            .is_none()
        {
            return Err(AttendanceError::UnknownMember);
        }

        let stmt = Statement::from_sql_and_values(
            DbBackend::Sqlite,
            r#"
            INSERT INTO attendance_records (member_id, check_in_time, location, notes)
            SELECT ?, ?, ?, ?
            WHERE NOT EXISTS (
                SELECT 1 FROM attendance_records
                WHERE member_id = ? AND check_out_time IS NULL
            )
            RETURNING id, member_id, check_in_time, check_out_time, location, notes, duration_minutes
            "#,
            [
                member_id.into(),
                now.into(),
                location.into(),
                notes.map(|n| n.to_owned()).into(),
                member_id.into(),
            ],
        );

        Entity::find()
            .from_raw_sql(stmt)
            .one(db)
            .await?
            .ok_or(AttendanceError::AlreadyCheckedIn)
    }

    /// Closes the member's open visit at `now`, computing the duration and
    /// appending any supplied notes to the ones recorded at check-in.
    ///
    /// The close is a guarded update (`WHERE … check_out_time IS NULL`); if a
    /// concurrent checkout got there first, zero rows match and the loser
    /// gets [`AttendanceError::NotCheckedIn`] instead of double-closing.
    pub async fn check_out(
        db: &DatabaseConnection,
        member_id: i64,
        notes: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Self, AttendanceError> {
        if super::member::Entity::find_by_id(member_id)
            .one(db)
            .await?
            .is_none()
        {
            return Err(AttendanceError::UnknownMember);
        }

        let open = Entity::find()
            .filter(Column::MemberId.eq(member_id))
            .filter(Column::CheckOutTime.is_null())
            .one(db)
            .await?
            .ok_or(AttendanceError::NotCheckedIn)?;

        // A checkout can never precede its check-in.
        let close_time = if now < open.check_in_time {
            open.check_in_time
        } else {
            now
        };
        let duration_minutes = (close_time - open.check_in_time).num_milliseconds() / 60_000;

        let merged_notes = match (open.notes.as_deref(), notes) {
            (Some(existing), Some(new)) => Some(format!("{existing}\n{new}")),
            (Some(existing), None) => Some(existing.to_owned()),
            (None, Some(new)) => Some(new.to_owned()),
            (None, None) => None,
        };

        let res = Entity::update_many()
            .col_expr(Column::CheckOutTime, Expr::value(close_time))
            .col_expr(Column::DurationMinutes, Expr::value(duration_minutes))
            .col_expr(Column::Notes, Expr::value(merged_notes))
            .filter(Column::Id.eq(open.id))
            .filter(Column::CheckOutTime.is_null())
            .exec(db)
            .await?;

        if res.rows_affected == 0 {
            return Err(AttendanceError::NotCheckedIn);
        }

        Entity::find_by_id(open.id)
            .one(db)
            .await?
            .ok_or_else(|| {
                AttendanceError::Db(DbErr::RecordNotFound(format!(
                    "attendance record {} vanished after close",
                    open.id
                )))
            })
    }

    /// All records whose check-in falls on `day`, in check-in order.
    pub async fn for_day(db: &DatabaseConnection, day: NaiveDate) -> Result<Vec<Self>, DbErr> {
        let (start, end) = day_bounds(day);
        Entity::find()
            .filter(Column::CheckInTime.gte(start))
            .filter(Column::CheckInTime.lt(end))
            .order_by_asc(Column::CheckInTime)
            .all(db)
            .await
    }

    /// All open records, across all days. A member who checked in yesterday
    /// and never checked out is still here; there is no automatic expiry.
    pub async fn currently_checked_in(db: &DatabaseConnection) -> Result<Vec<Self>, DbErr> {
        Entity::find()
            .filter(Column::CheckOutTime.is_null())
            .order_by_asc(Column::CheckInTime)
            .all(db)
            .await
    }

    /// Per-day visit counts over the trailing `range_days` days ending at
    /// `today`, inclusive. Days without check-ins appear with zero counts.
    pub async fn day_stats(
        db: &DatabaseConnection,
        range_days: u32,
        today: NaiveDate,
    ) -> Result<Vec<DayStat>, DbErr> {
        let days = i64::from(range_days.max(1));
        let first = today - Duration::days(days - 1);
        let (start, _) = day_bounds(first);
        let (_, end) = day_bounds(today);

        let rows = Entity::find()
            .filter(Column::CheckInTime.gte(start))
            .filter(Column::CheckInTime.lt(end))
            .all(db)
            .await?;

        let mut buckets: BTreeMap<NaiveDate, (i64, HashSet<i64>)> = BTreeMap::new();
        for r in rows {
            let bucket = buckets.entry(r.check_in_time.date_naive()).or_default();
            bucket.0 += 1;
            bucket.1.insert(r.member_id);
        }

        let mut stats = Vec::with_capacity(days as usize);
        for offset in 0..days {
            let date = first + Duration::days(offset);
            let (visits, unique_members) = buckets
                .get(&date)
                .map(|(v, members)| (*v, members.len() as i64))
                .unwrap_or((0, 0));
            stats.push(DayStat {
                date,
                visits,
                unique_members,
            });
        }
        Ok(stats)
    }
}
