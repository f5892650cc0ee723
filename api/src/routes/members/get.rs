use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use sea_orm::{ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

use crate::response::ApiResponse;
use util::state::AppState;

use super::common::{ListQuery, ListResponse, MemberResponse};
use db::models::member::{Column as MemberCol, Entity as MemberEntity, Model as Member};

/// GET `/api/members`
///
/// List members of the directory.
///
/// **Query**:
/// - `q` *(optional)*: fuzzy match on first name, last name, or email
/// - `sort` *(optional)*: `created_at` | `first_name` | `last_name` | `email`
///   (prefix `-` for desc)
/// - `page` *(default 1)*
/// - `per_page` *(default 20, max 100)*
pub async fn list_members(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> (StatusCode, Json<ApiResponse<ListResponse>>) {
    let db = state.db();
    let page = q.page.unwrap_or(1).max(1) as u64;
    let per_page = q.per_page.unwrap_or(20).clamp(1, 100) as u64;

    let mut sel = MemberEntity::find();
    if let Some(s) = q.q.as_ref().filter(|s| !s.trim().is_empty()) {
        sel = sel.filter(
            Condition::any()
                .add(MemberCol::FirstName.contains(s.as_str()))
                .add(MemberCol::LastName.contains(s.as_str()))
                .add(MemberCol::Email.contains(s.as_str())),
        );
    }
    sel = match q.sort.as_deref() {
        Some(sort) if sort.starts_with('-') => match &sort[1..] {
            "first_name" => sel.order_by_desc(MemberCol::FirstName),
            "last_name" => sel.order_by_desc(MemberCol::LastName),
            "email" => sel.order_by_desc(MemberCol::Email),
            _ => sel.order_by_desc(MemberCol::CreatedAt),
        },
        Some("first_name") => sel.order_by_asc(MemberCol::FirstName),
        Some("last_name") => sel.order_by_asc(MemberCol::LastName),
        Some("email") => sel.order_by_asc(MemberCol::Email),
        Some("created_at") => sel.order_by_asc(MemberCol::CreatedAt),
        _ => sel.order_by_desc(MemberCol::CreatedAt),
    };

    let paginator = sel.paginate(db, per_page);
    let total = match paginator.num_items().await {
        Ok(n) => n as i32,
        Err(e) => {
            tracing::error!("failed to count members: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error listing members")),
            );
        }
    };
    let rows = paginator
        .fetch_page(page.saturating_sub(1))
        .await
        .unwrap_or_default();

    let resp = ListResponse {
        members: rows.into_iter().map(MemberResponse::from).collect(),
        page: page as i32,
        per_page: per_page as i32,
        total,
    };

    (
        StatusCode::OK,
        Json(ApiResponse::success(resp, "Members retrieved")),
    )
}

/// GET `/api/members/{member_id}`
pub async fn get_member(
    State(state): State<AppState>,
    Path(member_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<MemberResponse>>) {
    let db = state.db();

    match Member::get_by_id(db, member_id).await {
        Ok(Some(m)) => (
            StatusCode::OK,
            Json(ApiResponse::success(m.into(), "Member retrieved")),
        ),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Member not found")),
        ),
        Err(e) => {
            tracing::error!("failed to load member {member_id}: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error retrieving member")),
            )
        }
    }
}
