//! To-do use-case service.
//!
//! # Responsibility
//! - Provide the stable CRUD entry points for API callers.
//! - Delegate persistence to the repository and keep storage-agnostic.
//!
//! # Invariants
//! - `get_todo_by_id` and every mutation response include nested comments;
//!   `list_todos` attaches them only on request.
//! - Conflicting concurrent writes degrade to not-found/`false` (last writer
//!   wins at commit time, never silent corruption).

use crate::model::comment::CommentId;
use crate::model::todo::{Todo, TodoId};
use crate::repo::todo_repo::{TodoRepository, TodoSortedBy};
use crate::repo::RepoError;
use crate::service::{ServiceError, ServiceResult};
use crate::view::{CommentView, TodoView};

/// Use-case service for to-do items and their owned comments.
pub struct TodoService<R: TodoRepository> {
    repo: R,
}

impl<R: TodoRepository> TodoService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns all todos, ascending by `sorted_by` when given, natural
    /// storage order otherwise. Comments are attached only when
    /// `include_comments` is set.
    pub fn list_todos(
        &self,
        sorted_by: Option<TodoSortedBy>,
        include_comments: bool,
    ) -> ServiceResult<Vec<TodoView>> {
        let todos = self.repo.list_todos(sorted_by)?;
        let mut views = Vec::with_capacity(todos.len());
        for todo in &todos {
            let comments = if include_comments {
                Some(self.comment_views(todo.id())?)
            } else {
                None
            };
            views.push(TodoView::from_model(todo, comments));
        }
        Ok(views)
    }

    /// Returns one todo with its comments, or `None` when absent.
    pub fn get_todo_by_id(&self, id: TodoId) -> ServiceResult<Option<TodoView>> {
        let Some(todo) = self.repo.get_todo(id)? else {
            return Ok(None);
        };
        let comments = self.comment_views(id)?;
        Ok(Some(TodoView::from_model(&todo, Some(comments))))
    }

    /// Creates a new todo from validated input and returns its view with an
    /// empty comment list.
    pub fn create_todo(&mut self, title: &str, body: &str) -> ServiceResult<TodoView> {
        let todo = Todo::new(title, body).map_err(ServiceError::Validation)?;
        self.repo.insert_todo(&todo)?;
        Ok(TodoView::from_model(&todo, Some(Vec::new())))
    }

    /// Applies the provided fields to an existing todo.
    ///
    /// Returns `None` when the todo is absent or was removed concurrently;
    /// validation failures leave no partial mutation behind.
    pub fn patch_todo(
        &mut self,
        id: TodoId,
        title: Option<&str>,
        body: Option<&str>,
    ) -> ServiceResult<Option<TodoView>> {
        let Some(mut todo) = self.repo.get_todo(id)? else {
            return Ok(None);
        };

        if let Some(title) = title {
            todo.set_title(title).map_err(ServiceError::Validation)?;
        }
        if let Some(body) = body {
            todo.set_body(body).map_err(ServiceError::Validation)?;
        }

        match self.repo.update_todo(&todo) {
            Ok(()) => {
                let comments = self.comment_views(id)?;
                Ok(Some(TodoView::from_model(&todo, Some(comments))))
            }
            Err(RepoError::NotFound(_)) | Err(RepoError::Conflict(_)) => Ok(None),
            Err(other) => Err(other.into()),
        }
    }

    /// Deletes one todo, cascading to its comments. `false` when no such
    /// todo existed or the delete was not applied.
    pub fn delete_todo(&mut self, id: TodoId) -> ServiceResult<bool> {
        match self.repo.delete_todo(id) {
            Ok(existed) => Ok(existed),
            Err(RepoError::Conflict(_)) => Ok(false),
            Err(other) => Err(other.into()),
        }
    }

    /// Returns the comments of one todo, or `None` when the todo is absent.
    pub fn comments_of_todo(&self, todo_id: TodoId) -> ServiceResult<Option<Vec<CommentView>>> {
        if self.repo.get_todo(todo_id)?.is_none() {
            return Ok(None);
        }
        Ok(Some(self.comment_views(todo_id)?))
    }

    /// Appends a comment to one todo.
    ///
    /// The existence check runs before body validation, matching the route
    /// contract (unknown todo is 404 even with an invalid body). Returns
    /// `None` when the todo is absent; no orphan row is left on any failure
    /// path.
    pub fn add_comment(
        &mut self,
        todo_id: TodoId,
        body: &str,
    ) -> ServiceResult<Option<CommentView>> {
        let Some(todo) = self.repo.get_todo(todo_id)? else {
            return Ok(None);
        };

        let comment = todo.add_comment(body).map_err(ServiceError::Validation)?;
        match self.repo.insert_comment(&comment) {
            Ok(()) => Ok(Some(CommentView::from_model(&comment))),
            Err(RepoError::NotFound(_)) | Err(RepoError::Conflict(_)) => Ok(None),
            Err(other) => Err(other.into()),
        }
    }

    /// Removes one comment scoped to its parent todo. `false` when the todo
    /// or the comment-under-that-todo is absent.
    pub fn remove_comment(
        &mut self,
        todo_id: TodoId,
        comment_id: CommentId,
    ) -> ServiceResult<bool> {
        match self.repo.delete_comment_of_todo(todo_id, comment_id) {
            Ok(existed) => Ok(existed),
            Err(RepoError::Conflict(_)) => Ok(false),
            Err(other) => Err(other.into()),
        }
    }

    fn comment_views(&self, todo_id: TodoId) -> ServiceResult<Vec<CommentView>> {
        let comments = self.repo.list_comments(todo_id)?;
        Ok(comments.iter().map(CommentView::from_model).collect())
    }
}
