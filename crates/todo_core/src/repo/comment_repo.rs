//! Comment repository contract and SQLite implementation.
//!
//! Covers the one operation that addresses a comment without going through
//! its parent todo: delete by own id.

use crate::model::comment::CommentId;
use crate::repo::{ensure_connection_ready, RepoResult};
use rusqlite::{Connection, TransactionBehavior};

/// Repository interface for comment-addressed operations.
pub trait CommentRepository {
    /// Deletes one comment by its own id. Returns whether a row existed.
    fn delete_comment(&mut self, id: CommentId) -> RepoResult<bool>;
}

/// SQLite-backed comment repository.
pub struct SqliteCommentRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteCommentRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl CommentRepository for SqliteCommentRepository<'_> {
    fn delete_comment(&mut self, id: CommentId) -> RepoResult<bool> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let changed = tx.execute("DELETE FROM comments WHERE id = ?1;", [id.to_string()])?;
        tx.commit()?;
        Ok(changed > 0)
    }
}
