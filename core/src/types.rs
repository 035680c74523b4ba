//! Domain DTOs for the postgres todos API.
//!
//! The server owns `id`; the client never edits a todo in place, it only
//! replaces the whole list after a refetch.

use serde::{Deserialize, Serialize};

/// A single todo as returned by the list and create endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: String,
    pub text: String,
}

/// Request payload for creating a todo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateTodo {
    pub text: String,
}

impl CreateTodo {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
