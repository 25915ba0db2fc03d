//! To-do routes.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use log::info;
use serde::Deserialize;
use todo_core::{
    CommentView, SqliteTodoRepository, TodoService, TodoSortedBy, TodoView,
};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoListParams {
    pub sorted_by: Option<TodoSortedBy>,
    pub include_comments: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    /// Missing fields bind as empty strings and fail validation with 400
    /// instead of rejecting the envelope.
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct PatchTodoRequest {
    pub title: Option<String>,
    pub body: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddCommentRequest {
    #[serde(default)]
    pub body: String,
}

/// GET /api/todo
pub async fn list_todos(
    State(state): State<AppState>,
    Query(params): Query<TodoListParams>,
) -> Result<Json<Vec<TodoView>>, ApiError> {
    let todos = state
        .with_db(move |conn| {
            let service = TodoService::new(SqliteTodoRepository::try_new(conn)?);
            Ok(service.list_todos(params.sorted_by, params.include_comments == Some(true))?)
        })
        .await?;
    Ok(Json(todos))
}

/// GET /api/todo/{todo_id}
pub async fn get_todo_by_id(
    State(state): State<AppState>,
    Path(todo_id): Path<Uuid>,
) -> Result<Json<TodoView>, ApiError> {
    let todo = state
        .with_db(move |conn| {
            let service = TodoService::new(SqliteTodoRepository::try_new(conn)?);
            Ok(service.get_todo_by_id(todo_id)?)
        })
        .await?;
    todo.map(Json).ok_or(ApiError::NotFound)
}

/// POST /api/todo
pub async fn create_todo(
    State(state): State<AppState>,
    Json(request): Json<CreateTodoRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let todo = state
        .with_db(move |conn| {
            let mut service = TodoService::new(SqliteTodoRepository::try_new(conn)?);
            Ok(service.create_todo(&request.title, &request.body)?)
        })
        .await?;

    info!("event=todo_create module=api status=ok todo_id={}", todo.id);
    let location = format!("/api/todo/{}", todo.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(todo),
    ))
}

/// PATCH /api/todo/{todo_id}
pub async fn patch_todo(
    State(state): State<AppState>,
    Path(todo_id): Path<Uuid>,
    Json(request): Json<PatchTodoRequest>,
) -> Result<Json<TodoView>, ApiError> {
    let todo = state
        .with_db(move |conn| {
            let mut service = TodoService::new(SqliteTodoRepository::try_new(conn)?);
            Ok(service.patch_todo(todo_id, request.title.as_deref(), request.body.as_deref())?)
        })
        .await?;

    match todo {
        Some(todo) => {
            info!("event=todo_patch module=api status=ok todo_id={todo_id}");
            Ok(Json(todo))
        }
        None => Err(ApiError::NotFound),
    }
}

/// DELETE /api/todo/{todo_id}
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(todo_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let removed = state
        .with_db(move |conn| {
            let mut service = TodoService::new(SqliteTodoRepository::try_new(conn)?);
            Ok(service.delete_todo(todo_id)?)
        })
        .await?;

    if removed {
        info!("event=todo_delete module=api status=ok todo_id={todo_id}");
        Ok(StatusCode::OK)
    } else {
        Err(ApiError::NotFound)
    }
}

/// GET /api/todo/{todo_id}/comment
pub async fn comments_of_todo(
    State(state): State<AppState>,
    Path(todo_id): Path<Uuid>,
) -> Result<Json<Vec<CommentView>>, ApiError> {
    let comments = state
        .with_db(move |conn| {
            let service = TodoService::new(SqliteTodoRepository::try_new(conn)?);
            Ok(service.comments_of_todo(todo_id)?)
        })
        .await?;
    comments.map(Json).ok_or(ApiError::NotFound)
}

/// POST /api/todo/{todo_id}/comment
pub async fn add_comment(
    State(state): State<AppState>,
    Path(todo_id): Path<Uuid>,
    Json(request): Json<AddCommentRequest>,
) -> Result<Json<CommentView>, ApiError> {
    let comment = state
        .with_db(move |conn| {
            let mut service = TodoService::new(SqliteTodoRepository::try_new(conn)?);
            Ok(service.add_comment(todo_id, &request.body)?)
        })
        .await?;

    match comment {
        Some(comment) => {
            info!(
                "event=comment_add module=api status=ok todo_id={todo_id} comment_id={}",
                comment.id
            );
            Ok(Json(comment))
        }
        None => Err(ApiError::NotFound),
    }
}
