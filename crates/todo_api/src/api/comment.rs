//! Comment routes.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use log::info;
use todo_core::{CommentService, SqliteCommentRepository};
use uuid::Uuid;

/// DELETE /api/comment/{comment_id}
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let removed = state
        .with_db(move |conn| {
            let mut service = CommentService::new(SqliteCommentRepository::try_new(conn)?);
            Ok(service.delete_comment(comment_id)?)
        })
        .await?;

    if removed {
        info!("event=comment_delete module=api status=ok comment_id={comment_id}");
        Ok(StatusCode::OK)
    } else {
        Err(ApiError::NotFound)
    }
}
