//! Webserver library for the pizza lunch order service
//!
//! HTTP intake for per-date orders and the dashboard that reports running
//! totals and how many pizzas to buy. Persistence sits behind the
//! `OrderStore` trait with in-memory and JSON-file backends.

pub mod config;
pub mod error;
pub mod services;
pub mod state;
pub mod traits;
pub mod types;
pub mod webserver_impl;

// Re-export main types
pub use config::{Args, ServerConfig, StoreBackend};
pub use error::{WebServerError, WebServerResult};
pub use state::WebServerState;
pub use types::*;
pub use webserver_impl::WebServer;

// Re-export trait definitions
pub use traits::{MockOrderStore, OrderStore};

// Re-export service implementations
pub use services::{InMemoryOrderStore, JsonFileOrderStore};
