//! HTTP surface for the to-do service.
//!
//! # Responsibility
//! - Map REST routes onto `todo_core` service calls.
//! - Translate service outcomes into status codes; no business logic here.

use axum::routing::{delete, get};
use axum::Router;
use rusqlite::Connection;

pub mod api;
pub mod error;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

/// Builds the application router over a migrated database connection.
pub fn app(conn: Connection) -> Router {
    let state = AppState::new(conn);
    Router::new()
        .route("/healthz", get(api::health))
        .route(
            "/api/todo",
            get(api::todo::list_todos).post(api::todo::create_todo),
        )
        .route(
            "/api/todo/{todo_id}",
            get(api::todo::get_todo_by_id)
                .patch(api::todo::patch_todo)
                .delete(api::todo::delete_todo),
        )
        .route(
            "/api/todo/{todo_id}/comment",
            get(api::todo::comments_of_todo).post(api::todo::add_comment),
        )
        .route("/api/comment/{comment_id}", delete(api::comment::delete_comment))
        .with_state(state)
}
