//! Core domain logic for the to-do API.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::comment::{Comment, CommentId};
pub use model::todo::{Todo, TodoId};
pub use model::ValidationError;
pub use repo::comment_repo::{CommentRepository, SqliteCommentRepository};
pub use repo::todo_repo::{SqliteTodoRepository, TodoRepository, TodoSortedBy};
pub use repo::{RepoError, RepoResult};
pub use service::comment_service::CommentService;
pub use service::todo_service::TodoService;
pub use service::{ServiceError, ServiceResult};
pub use view::{CommentView, TodoView};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
