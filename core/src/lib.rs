//! Todo list page backed by the postgres example API.
//!
//! # Overview
//! A headless page that lists, creates and deletes todos. The list is an
//! async-memoized fetch keyed on a `Ticker`; mutations bump the ticker to
//! force a refetch.
//!
//! # Design
//! - `TodoApi` builds `HttpRequest` values and parses `HttpResponse` values
//!   without touching the network; a `Transport` executes them.
//! - `AsyncMemo` drops results from superseded fetches, so the list always
//!   reflects the latest invalidation.
//! - The base URL is an explicit `ClientConfig`, never read implicitly.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod memo;
pub mod page;
pub mod ticker;
pub mod transport;
pub mod types;

pub use client::TodoApi;
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use memo::{AsyncMemo, Generation, MemoState};
pub use page::{Row, TodoPage, View};
pub use ticker::{Ticker, TickerToken};
pub use transport::{Transport, TransportFuture, UreqTransport};
pub use types::{CreateTodo, Todo};
