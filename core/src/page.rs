//! The todos page: list, input, create and delete wired to the API.
//!
//! # Design
//! The list is an `AsyncMemo` keyed on the page's `TickerToken`. `effect()`
//! plays the role of the render effect: it starts a fetch whenever the token
//! changed since the last one. Create and remove go straight to the API and,
//! on success only, bump the ticker and re-run the effect. A failed mutation
//! leaves the list untouched and is reported back to the caller.
//!
//! Fetches are spawned; `flush()` awaits the ones still outstanding.

use std::fmt::Write as _;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::client::TodoApi;
use crate::error::ApiError;
use crate::memo::{AsyncMemo, MemoState};
use crate::ticker::{Ticker, TickerToken};
use crate::transport::Transport;
use crate::types::{CreateTodo, Todo};

pub const HEADING: &str = "Postgres example (todos):";
pub const DELETE_CONTROL: &str = "❌";
pub const CREATE_LABEL: &str = "Create";

/// One rendered todo with its delete control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: String,
    pub label: String,
}

/// Everything the page shows, as data.
///
/// `list_error` and `action_error` are exposed for hosts that want to show
/// them; `render_text` does not print either.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub heading: &'static str,
    pub rows: Vec<Row>,
    pub input: String,
    pub loading: bool,
    pub list_error: Option<ApiError>,
    pub action_error: Option<ApiError>,
}

impl View {
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.heading);
        for (i, row) in self.rows.iter().enumerate() {
            let _ = writeln!(out, "{:>3} {} {DELETE_CONTROL}", i + 1, row.label);
        }
        let _ = writeln!(out, "[{}] [{CREATE_LABEL}]", self.input);
        out
    }
}

pub struct TodoPage<Tr> {
    api: TodoApi,
    transport: Arc<Tr>,
    ticker: Ticker,
    todos: AsyncMemo<TickerToken, Vec<Todo>, ApiError>,
    text: String,
    action_error: Option<ApiError>,
    pending: Vec<JoinHandle<bool>>,
}

impl<Tr: Transport> TodoPage<Tr> {
    pub fn new(api: TodoApi, transport: Tr) -> Self {
        Self {
            api,
            transport: Arc::new(transport),
            ticker: Ticker::new(),
            todos: AsyncMemo::new(),
            text: String::new(),
            action_error: None,
            pending: Vec::new(),
        }
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn transport(&self) -> &Tr {
        &self.transport
    }

    /// Start a list fetch if the ticker moved since the last one. The first
    /// call is the mount fetch. Returns whether a fetch was started.
    pub fn effect(&mut self) -> bool {
        let api = self.api.clone();
        let transport = Arc::clone(&self.transport);
        let handle = self.todos.run(self.ticker.token(), move || async move {
            let response = transport
                .execute(api.build_list())
                .await
                .map_err(ApiError::from)?;
            api.parse_list(response)
        });

        match handle {
            Some(handle) => {
                self.pending.push(handle);
                true
            }
            None => false,
        }
    }

    /// Wait for every outstanding list fetch to settle.
    pub async fn flush(&mut self) {
        for handle in std::mem::take(&mut self.pending) {
            if let Err(e) = handle.await {
                warn!(event = "page.fetch.join_failed", error = %e);
            }
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn todos(&self) -> MemoState<Vec<Todo>, ApiError> {
        self.todos.snapshot()
    }

    pub fn action_error(&self) -> Option<&ApiError> {
        self.action_error.as_ref()
    }

    /// POST the current input. The input is left as typed.
    pub async fn create(&mut self) -> Result<Todo, ApiError> {
        let input = CreateTodo::new(self.text.clone());
        match self.send_create(&input).await {
            Ok(todo) => {
                info!(event = "page.create.completed", id = %todo.id);
                self.action_error = None;
                self.invalidate();
                Ok(todo)
            }
            Err(e) => {
                warn!(event = "page.create.failed", error = %e);
                self.action_error = Some(e.clone());
                Err(e)
            }
        }
    }

    pub async fn remove(&mut self, id: &str) -> Result<(), ApiError> {
        match self.send_remove(id).await {
            Ok(()) => {
                info!(event = "page.remove.completed", id = id);
                self.action_error = None;
                self.invalidate();
                Ok(())
            }
            Err(e) => {
                warn!(event = "page.remove.failed", id = id, error = %e);
                self.action_error = Some(e.clone());
                Err(e)
            }
        }
    }

    pub fn view(&self) -> View {
        let state = self.todos.snapshot();
        let rows = state
            .value
            .unwrap_or_default()
            .into_iter()
            .map(|todo| Row {
                label: format!("· {}", todo.text),
                id: todo.id,
            })
            .collect();

        View {
            heading: HEADING,
            rows,
            input: self.text.clone(),
            loading: state.loading,
            list_error: state.error,
            action_error: self.action_error.clone(),
        }
    }

    fn invalidate(&mut self) {
        self.ticker.update();
        self.effect();
    }

    async fn send_create(&self, input: &CreateTodo) -> Result<Todo, ApiError> {
        let request = self.api.build_create(input)?;
        let response = self.transport.execute(request).await?;
        self.api.parse_create(response)
    }

    async fn send_remove(&self, id: &str) -> Result<(), ApiError> {
        let response = self.transport.execute(self.api.build_remove(id)).await?;
        self.api.parse_remove(response)
    }
}
