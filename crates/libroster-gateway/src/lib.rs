//! # LibRoster Gateway
//!
//! Axum HTTP API over the roster service and digest dispatch. OAuth itself
//! happens at a trusted reverse proxy; this gateway reads the authenticated
//! principal from forwarded headers and enforces manager authorization.

pub mod identity;
pub mod routes;
pub mod server;

pub use identity::Identity;
pub use server::{build_router, start, AppState};
