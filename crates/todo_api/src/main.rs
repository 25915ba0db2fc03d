//! Server entry point.
//!
//! Configuration comes from environment variables with local-dev defaults:
//! `TODO_API_ADDR`, `TODO_API_DB` (`:memory:` supported),
//! `TODO_API_LOG_LEVEL`, `TODO_API_LOG_DIR` (absolute path; stderr when
//! unset).

use log::info;
use todo_core::{default_log_level, init_logging, open_db, open_db_in_memory};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let level = std::env::var("TODO_API_LOG_LEVEL")
        .unwrap_or_else(|_| default_log_level().to_string());
    let log_dir = std::env::var("TODO_API_LOG_DIR").ok();
    if let Err(err) = init_logging(&level, log_dir.as_deref()) {
        eprintln!("logging setup failed: {err}");
    }

    let db_path = std::env::var("TODO_API_DB").unwrap_or_else(|_| "todo-api.db".to_string());
    let conn = if db_path == ":memory:" {
        open_db_in_memory()?
    } else {
        open_db(&db_path)?
    };

    let addr = std::env::var("TODO_API_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    let listener = TcpListener::bind(&addr).await?;
    info!("event=serve module=api status=start addr={addr} db={db_path}");

    axum::serve(listener, todo_api::app(conn)).await?;
    Ok(())
}
