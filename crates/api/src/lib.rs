//! HTTP API layer for the One Big Future site backend.
//!
//! - **Endpoints**: public reads for the static site and editing endpoints
//! - **Extractors**: signed-in actor and client details
//! - **Middleware**: bearer token authentication and shared state
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod form;
pub mod middleware;
pub mod response;

pub use endpoints::router;
pub use middleware::{AppState, auth_middleware};
