//! Async client core for the items service.
//!
//! # Overview
//! Three layers, leaves first:
//! - [`HttpClient`] builds `HttpRequest` values, executes them through a
//!   [`Transport`], and normalizes the response into a body or an
//!   [`ApiError`].
//! - [`ItemsApi`] lists and creates items, validating names locally and
//!   accepting both bare-array and `{ "data": [...] }` list responses.
//! - [`ItemsController`] owns the [`ItemsState`] a view renders from and
//!   exposes `fetch_items`, `create_new_item` and `clear_error`.
//!
//! # Design
//! - Building and parsing are pure; only the transport does I/O, so tests can
//!   script responses without a server.
//! - The base URL is passed in through [`ClientConfig`]; the library never
//!   reads the environment by itself.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod config;
pub mod controller;
pub mod error;
pub mod hook;
pub mod http;
pub mod items;
pub mod state;
pub mod transport;
pub mod types;

pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use controller::ItemsController;
pub use error::ApiError;
pub use hook::{LifecycleHook, NoopHook, TracingHook};
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, ResponseBody};
pub use items::{validate_name, ItemsApi, ITEMS_ENDPOINT, MAX_NAME_LEN};
pub use state::ItemsState;
pub use transport::{Transport, TransportError, UreqTransport};
pub use types::{CreateItem, Item, ItemsPayload};
