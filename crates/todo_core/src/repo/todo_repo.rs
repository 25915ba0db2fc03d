//! To-do repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the `todos` and `comments` tables.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Compound mutations (existence check + write) run in one IMMEDIATE
//!   transaction; either everything commits or nothing does.
//! - Comment rows are reachable only through an existing parent todo;
//!   `ON DELETE CASCADE` removes them with the parent.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::model::comment::{Comment, CommentId};
use crate::model::todo::{Todo, TodoId};
use crate::repo::{
    datetime_to_db, ensure_connection_ready, parse_db_datetime, parse_db_uuid, RepoError,
    RepoResult,
};
use rusqlite::{params, Connection, Row, TransactionBehavior};
use serde::{Deserialize, Serialize};

const TODO_SELECT_SQL: &str = "SELECT
    id,
    creation_time,
    update_time,
    title,
    body
FROM todos";

const COMMENT_SELECT_SQL: &str = "SELECT
    id,
    todo_id,
    creation_time,
    body
FROM comments";

/// Sort field for listing todos. Binds by variant name on the wire
/// (`?sortedBy=Title`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoSortedBy {
    CreationTime,
    UpdateTime,
    Title,
}

/// Repository interface for to-do items and their owned comments.
pub trait TodoRepository {
    /// Inserts a new todo row.
    fn insert_todo(&mut self, todo: &Todo) -> RepoResult<()>;
    /// Gets one todo by id.
    fn get_todo(&self, id: TodoId) -> RepoResult<Option<Todo>>;
    /// Lists all todos, ascending by the given field with natural storage
    /// order as tiebreaker; natural order only when no field is given.
    fn list_todos(&self, sorted_by: Option<TodoSortedBy>) -> RepoResult<Vec<Todo>>;
    /// Rewrites an existing todo row. `NotFound` if the row is gone.
    fn update_todo(&mut self, todo: &Todo) -> RepoResult<()>;
    /// Deletes one todo, cascading to its comments. Returns whether a row
    /// existed.
    fn delete_todo(&mut self, id: TodoId) -> RepoResult<bool>;
    /// Lists the comments of one todo in insertion order. Does not check
    /// that the todo exists.
    fn list_comments(&self, todo_id: TodoId) -> RepoResult<Vec<Comment>>;
    /// Inserts a comment after re-checking its parent inside the same
    /// transaction. `NotFound` if the parent is gone.
    fn insert_comment(&mut self, comment: &Comment) -> RepoResult<()>;
    /// Deletes one comment scoped to its parent. Returns `false` when the
    /// todo/comment pairing does not exist.
    fn delete_comment_of_todo(&mut self, todo_id: TodoId, comment_id: CommentId)
        -> RepoResult<bool>;
}

/// SQLite-backed to-do repository.
pub struct SqliteTodoRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteTodoRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl TodoRepository for SqliteTodoRepository<'_> {
    fn insert_todo(&mut self, todo: &Todo) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO todos (id, creation_time, update_time, title, body)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                todo.id().to_string(),
                datetime_to_db(todo.creation_time()),
                datetime_to_db(todo.update_time()),
                todo.title(),
                todo.body(),
            ],
        )?;
        Ok(())
    }

    fn get_todo(&self, id: TodoId) -> RepoResult<Option<Todo>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TODO_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_todo_row(row)?));
        }
        Ok(None)
    }

    fn list_todos(&self, sorted_by: Option<TodoSortedBy>) -> RepoResult<Vec<Todo>> {
        let order = match sorted_by {
            None => "rowid ASC",
            Some(TodoSortedBy::CreationTime) => "creation_time ASC, rowid ASC",
            Some(TodoSortedBy::UpdateTime) => "update_time ASC, rowid ASC",
            Some(TodoSortedBy::Title) => "title ASC, rowid ASC",
        };

        let mut stmt = self
            .conn
            .prepare(&format!("{TODO_SELECT_SQL} ORDER BY {order};"))?;
        let mut rows = stmt.query([])?;
        let mut todos = Vec::new();
        while let Some(row) = rows.next()? {
            todos.push(parse_todo_row(row)?);
        }
        Ok(todos)
    }

    fn update_todo(&mut self, todo: &Todo) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE todos
             SET update_time = ?2, title = ?3, body = ?4
             WHERE id = ?1;",
            params![
                todo.id().to_string(),
                datetime_to_db(todo.update_time()),
                todo.title(),
                todo.body(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(todo.id()));
        }
        Ok(())
    }

    fn delete_todo(&mut self, id: TodoId) -> RepoResult<bool> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        // Cascade removes the comments inside the same transaction.
        let changed = tx.execute("DELETE FROM todos WHERE id = ?1;", [id.to_string()])?;
        tx.commit()?;
        Ok(changed > 0)
    }

    fn list_comments(&self, todo_id: TodoId) -> RepoResult<Vec<Comment>> {
        let mut stmt = self.conn.prepare(&format!(
            "{COMMENT_SELECT_SQL} WHERE todo_id = ?1 ORDER BY rowid ASC;"
        ))?;
        let mut rows = stmt.query([todo_id.to_string()])?;
        let mut comments = Vec::new();
        while let Some(row) = rows.next()? {
            comments.push(parse_comment_row(row)?);
        }
        Ok(comments)
    }

    fn insert_comment(&mut self, comment: &Comment) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        if !todo_exists_in_tx(&tx, comment.todo_id())? {
            return Err(RepoError::NotFound(comment.todo_id()));
        }

        tx.execute(
            "INSERT INTO comments (id, todo_id, creation_time, body)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                comment.id().to_string(),
                comment.todo_id().to_string(),
                datetime_to_db(comment.creation_time()),
                comment.body(),
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn delete_comment_of_todo(
        &mut self,
        todo_id: TodoId,
        comment_id: CommentId,
    ) -> RepoResult<bool> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let changed = tx.execute(
            "DELETE FROM comments WHERE id = ?1 AND todo_id = ?2;",
            params![comment_id.to_string(), todo_id.to_string()],
        )?;
        tx.commit()?;
        Ok(changed > 0)
    }
}

fn parse_todo_row(row: &Row<'_>) -> RepoResult<Todo> {
    let id_text: String = row.get("id")?;
    let id = parse_db_uuid(&id_text, "todos.id")?;
    let creation_text: String = row.get("creation_time")?;
    let update_text: String = row.get("update_time")?;
    let title: String = row.get("title")?;
    let body: String = row.get("body")?;

    Todo::from_stored(
        id,
        parse_db_datetime(&creation_text, "todos.creation_time")?,
        parse_db_datetime(&update_text, "todos.update_time")?,
        &title,
        &body,
    )
    .map_err(|err| RepoError::InvalidData(format!("todo {id}: {err}")))
}

fn parse_comment_row(row: &Row<'_>) -> RepoResult<Comment> {
    let id_text: String = row.get("id")?;
    let id = parse_db_uuid(&id_text, "comments.id")?;
    let todo_id_text: String = row.get("todo_id")?;
    let creation_text: String = row.get("creation_time")?;
    let body: String = row.get("body")?;

    Comment::from_stored(
        id,
        parse_db_uuid(&todo_id_text, "comments.todo_id")?,
        parse_db_datetime(&creation_text, "comments.creation_time")?,
        &body,
    )
    .map_err(|err| RepoError::InvalidData(format!("comment {id}: {err}")))
}

fn todo_exists_in_tx(tx: &rusqlite::Transaction<'_>, id: TodoId) -> RepoResult<bool> {
    let exists: i64 = tx.query_row(
        "SELECT EXISTS(SELECT 1 FROM todos WHERE id = ?1);",
        [id.to_string()],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
