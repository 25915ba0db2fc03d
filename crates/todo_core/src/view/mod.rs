//! Immutable view models returned to API clients.
//!
//! # Invariants
//! - Wire field names are `camelCase`; timestamps serialize as RFC 3339.
//! - `comments` is omitted from JSON entirely when not requested.

use crate::model::comment::{Comment, CommentId};
use crate::model::todo::{Todo, TodoId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Client-facing projection of a to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoView {
    pub id: TodoId,
    pub creation_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
    pub title: String,
    pub body: String,
    /// Nested comments; `None` when the caller did not ask for them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<CommentView>>,
}

impl TodoView {
    /// Projects a domain model, optionally attaching its comments.
    pub fn from_model(todo: &Todo, comments: Option<Vec<CommentView>>) -> Self {
        Self {
            id: todo.id(),
            creation_time: todo.creation_time(),
            update_time: todo.update_time(),
            title: todo.title().to_string(),
            body: todo.body().to_string(),
            comments,
        }
    }
}

/// Client-facing projection of a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: CommentId,
    pub creation_time: DateTime<Utc>,
    pub body: String,
}

impl CommentView {
    pub fn from_model(comment: &Comment) -> Self {
        Self {
            id: comment.id(),
            creation_time: comment.creation_time(),
            body: comment.body().to_string(),
        }
    }
}
