//! toggleboard is a feature toggle registry served over HTTP.
//!
//! Toggles are grouped by *package*, a free-form namespace chosen by the
//! caller. Each toggle carries a name, a description, and an activation
//! window; whether it is active is derived from the current time.
//!
//! # Architecture
//!
//! - [`cli`] -- Command-line argument parsing with clap derive macros.
//! - [`cmd`] -- Subcommand dispatch and execution (run, health).
//! - [`error`] -- Unified [`ToggleError`](error::ToggleError) and its HTTP mapping.
//! - [`toggle`] -- The record model, input validation, and the
//!   [`ToggleService`](toggle::service::ToggleService) operations.
//! - [`store`] -- The package-scoped [`ToggleStore`](store::ToggleStore)
//!   trait with in-memory and `MongoDB` backends.
//! - [`api`] -- Axum handlers for the `/feature-toggle(s)` routes.
//! - [`health`] -- `GET /health` endpoint handler returning runtime diagnostics.
//! - [`logging`] -- Structured tracing setup with JSON and pretty-print output.
//! - [`middleware`] -- Correlation ids and request outcome counters.
//! - [`server`] -- Axum server setup, shared application state, and
//!   graceful shutdown.
//!
//! # Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `mongodb` | `MongoDB` store, one collection per package |

// Binary crate — public functions are internal, not consumed by external users.
#![allow(clippy::missing_errors_doc)]

pub mod api;
pub mod cli;
pub mod cmd;
pub mod error;
pub mod health;
pub mod logging;
pub mod middleware;
pub mod server;
pub mod store;
pub mod toggle;
