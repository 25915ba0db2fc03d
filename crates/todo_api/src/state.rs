//! Shared application state.
//!
//! The database connection is the only shared resource; it is acquired and
//! released per call, on every exit path. SQLite work runs on the blocking
//! thread pool so request tasks never block on the busy timeout.

use crate::error::ApiError;
use rusqlite::Connection;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Connection>>,
}

impl AppState {
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
        }
    }

    /// Runs one unit of database work with exclusive access to the
    /// connection.
    pub async fn with_db<T, F>(&self, work: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut Connection) -> Result<T, ApiError> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            // A poisoned lock only means another request panicked mid-call;
            // the connection itself is still usable.
            let mut conn = db.lock().unwrap_or_else(PoisonError::into_inner);
            work(&mut conn)
        })
        .await
        .map_err(|err| ApiError::Internal(format!("database task failed: {err}")))?
    }
}
