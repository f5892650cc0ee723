use axum::{
    Router,
    routing::{delete, get, post, put},
};
use util::state::AppState;

mod common;
mod delete;
mod get;
mod post;
mod put;

pub use delete::delete_member;
pub use get::{get_member, list_members};
pub use post::create_member;
pub use put::edit_member;

pub fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_members))
        .route("/", post(create_member))
        .route("/{member_id}", get(get_member))
        .route("/{member_id}", put(edit_member))
        .route("/{member_id}", delete(delete_member))
}
