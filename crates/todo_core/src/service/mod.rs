//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the use-case contracts of the API.
//! - Translate domain models into client-facing view models.
//!
//! # Invariants
//! - A persistence conflict during a mutation degrades to the "not applied"
//!   outcome (`false`/not-found); it never propagates and never leaves
//!   partial state.
//! - Any other repository fault propagates unmodified.

use crate::model::ValidationError;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod comment_service;
pub mod todo_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service-boundary error shared by the todo and comment services.
#[derive(Debug)]
pub enum ServiceError {
    /// Input rejected by domain validation; maps to HTTP 400.
    Validation(ValidationError),
    /// Unexpected repository fault; maps to HTTP 500.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}
