//! Comment use-case service.
//!
//! Deleting by comment id is the only operation that addresses a comment
//! without going through its parent todo.

use crate::model::comment::CommentId;
use crate::repo::comment_repo::CommentRepository;
use crate::repo::RepoError;
use crate::service::ServiceResult;

/// Use-case service for comment-addressed operations.
pub struct CommentService<R: CommentRepository> {
    repo: R,
}

impl<R: CommentRepository> CommentService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Deletes one comment by id. `false` when no such comment existed or
    /// the delete was not applied.
    pub fn delete_comment(&mut self, id: CommentId) -> ServiceResult<bool> {
        match self.repo.delete_comment(id) {
            Ok(existed) => Ok(existed),
            Err(RepoError::Conflict(_)) => Ok(false),
            Err(other) => Err(other.into()),
        }
    }
}
