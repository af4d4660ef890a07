//! Public HTTP API for profile self-service.

pub mod cors;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
