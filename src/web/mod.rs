//! HTTP API module for filedepot.
//!
//! This module exposes registration, session tokens and the file API over
//! axum, plus status endpoints and an OpenAPI document.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;
mod state;

pub use error::ApiError;
pub use router::{create_router, ApiDoc};
pub use server::WebServer;
pub use state::AppState;
