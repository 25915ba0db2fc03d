//! Route handlers.
//!
//! Handlers bind arguments, run one service call through the shared state,
//! and translate the outcome; nothing else.

use axum::Json;
use serde_json::{json, Value};

pub mod comment;
pub mod todo;

/// Liveness probe reporting the core crate version.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": todo_core::core_version() }))
}
