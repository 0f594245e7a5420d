//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that drives the application layer.

mod extract;
mod guard;
mod handlers;
mod server;

pub use extract::ValidatedQuery;
pub use guard::{GuardChain, PairGate, RequestGuard};
pub use handlers::{ApiError, AppState};
pub use server::HttpServer;
