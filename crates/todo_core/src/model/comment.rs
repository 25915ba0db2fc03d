//! Comment domain model.
//!
//! A comment is exclusively owned by its parent to-do item; deleting the
//! item cascades to its comments at the storage layer.

use crate::model::todo::TodoId;
use crate::model::{validated_text, ValidationError};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Stable identifier of a comment.
pub type CommentId = Uuid;

/// A single comment attached to a to-do item.
///
/// All fields are immutable after construction; comments are replaced, not
/// edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    id: CommentId,
    todo_id: TodoId,
    creation_time: DateTime<Utc>,
    body: String,
}

impl Comment {
    /// Creates a comment attached to the given to-do item.
    ///
    /// # Errors
    /// Rejects an empty or whitespace-only body.
    pub fn new(todo_id: TodoId, body: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            id: Uuid::new_v4(),
            todo_id,
            creation_time: Utc::now(),
            body: validated_text(body, ValidationError::EmptyBody)?,
        })
    }

    /// Rebuilds a comment from persisted fields, re-validating them.
    pub fn from_stored(
        id: CommentId,
        todo_id: TodoId,
        creation_time: DateTime<Utc>,
        body: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id,
            todo_id,
            creation_time,
            body: validated_text(body, ValidationError::EmptyBody)?,
        })
    }

    pub fn id(&self) -> CommentId {
        self.id
    }

    pub fn todo_id(&self) -> TodoId {
        self.todo_id
    }

    pub fn creation_time(&self) -> DateTime<Utc> {
        self.creation_time
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}
