//! In-memory stand-in for the postgres examples API.
//!
//! Rows keep insertion order so list responses are stable across calls.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

pub const TODOS_PATH: &str = "/api/v1/examples/postgres";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub text: String,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub text: String,
}

pub type Db = Arc<RwLock<Vec<Todo>>>;

pub fn app() -> Router {
    app_with(Vec::new())
}

/// Build the router over a pre-seeded table.
pub fn app_with(rows: Vec<Todo>) -> Router {
    let db: Db = Arc::new(RwLock::new(rows));
    Router::new()
        .route(TODOS_PATH, get(list_todos).post(create_todo))
        .route(&format!("{TODOS_PATH}/{{id}}"), delete(delete_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    Json(db.read().await.clone())
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<CreateTodo>,
) -> (StatusCode, Json<Todo>) {
    let todo = Todo {
        id: Uuid::new_v4().to_string(),
        text: input.text,
    };
    db.write().await.push(todo.clone());
    info!(event = "mock.todo.created", id = %todo.id);
    (StatusCode::CREATED, Json(todo))
}

async fn delete_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, StatusCode> {
    let mut todos = db.write().await;
    let index = todos
        .iter()
        .position(|t| t.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    let removed = todos.remove(index);
    info!(event = "mock.todo.deleted", id = %removed.id);
    Ok(Json(removed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_serializes_to_json() {
        let todo = Todo {
            id: "1".to_string(),
            text: "a".to_string(),
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json, serde_json::json!({ "id": "1", "text": "a" }));
    }

    #[test]
    fn create_todo_rejects_missing_text() {
        let result: Result<CreateTodo, _> = serde_json::from_str(r#"{"title":"a"}"#);
        assert!(result.is_err());
    }
}
