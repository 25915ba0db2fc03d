//! To-do item domain model.
//!
//! # Responsibility
//! - Own the title/body validation rules and update-time bookkeeping.
//! - Act as the only way to mint comments attached to this item.
//!
//! # Invariants
//! - `id` and `creation_time` are immutable after construction.
//! - `update_time` is refreshed by every successful title/body mutation and
//!   is never earlier than `creation_time`.

use crate::model::comment::Comment;
use crate::model::{validated_text, ValidationError};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Stable identifier of a to-do item.
pub type TodoId = Uuid;

/// A single to-do item.
///
/// Fields are private so every mutation goes through a validating setter;
/// the storage layer rebuilds instances via [`Todo::from_stored`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    id: TodoId,
    creation_time: DateTime<Utc>,
    update_time: DateTime<Utc>,
    title: String,
    body: String,
}

impl Todo {
    /// Creates a new item with a generated id and `creation_time ==
    /// update_time`.
    ///
    /// # Errors
    /// Rejects empty or whitespace-only title/body.
    pub fn new(title: &str, body: &str) -> Result<Self, ValidationError> {
        let title = validated_text(title, ValidationError::EmptyTitle)?;
        let body = validated_text(body, ValidationError::EmptyBody)?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            creation_time: now,
            update_time: now,
            title,
            body,
        })
    }

    /// Rebuilds an item from persisted fields, re-validating them.
    ///
    /// Read paths must reject invalid persisted state instead of masking it.
    pub fn from_stored(
        id: TodoId,
        creation_time: DateTime<Utc>,
        update_time: DateTime<Utc>,
        title: &str,
        body: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id,
            creation_time,
            update_time,
            title: validated_text(title, ValidationError::EmptyTitle)?,
            body: validated_text(body, ValidationError::EmptyBody)?,
        })
    }

    pub fn id(&self) -> TodoId {
        self.id
    }

    pub fn creation_time(&self) -> DateTime<Utc> {
        self.creation_time
    }

    pub fn update_time(&self) -> DateTime<Utc> {
        self.update_time
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Replaces the title and touches the update timestamp.
    pub fn set_title(&mut self, title: &str) -> Result<(), ValidationError> {
        self.title = validated_text(title, ValidationError::EmptyTitle)?;
        self.touch();
        Ok(())
    }

    /// Replaces the body and touches the update timestamp.
    pub fn set_body(&mut self, body: &str) -> Result<(), ValidationError> {
        self.body = validated_text(body, ValidationError::EmptyBody)?;
        self.touch();
        Ok(())
    }

    /// Mints a new comment attached to this item.
    ///
    /// # Errors
    /// Rejects an empty or whitespace-only comment body.
    pub fn add_comment(&self, body: &str) -> Result<Comment, ValidationError> {
        Comment::new(self.id, body)
    }

    fn touch(&mut self) {
        let now = Utc::now();
        // Wall clock may not have advanced past the stored timestamp within
        // one call; never move update_time backwards.
        if now > self.update_time {
            self.update_time = now;
        } else {
            self.update_time = self.update_time + chrono::Duration::nanoseconds(1);
        }
    }
}
