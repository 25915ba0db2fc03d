//! Domain models for to-do items and their comments.
//!
//! # Responsibility
//! - Define the canonical entities used by core business logic.
//! - Enforce validation at construction and mutation time.
//!
//! # Invariants
//! - Title and body are never empty or whitespace-only; both are stored
//!   trimmed.
//! - Update timestamps never precede creation timestamps.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod comment;
pub mod todo;

/// Validation failure for user-supplied todo/comment text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Title is empty or whitespace-only after trimming.
    EmptyTitle,
    /// Body is empty or whitespace-only after trimming.
    EmptyBody,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty or whitespace-only"),
            Self::EmptyBody => write!(f, "body must not be empty or whitespace-only"),
        }
    }
}

impl Error for ValidationError {}

/// Trims `value` and rejects empty results with the given error.
pub(crate) fn validated_text(value: &str, on_empty: ValidationError) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(on_empty)
    } else {
        Ok(trimmed.to_string())
    }
}
