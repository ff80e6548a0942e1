//! API layer - HTTP handlers, extractors and route definitions.
//!
//! The only layer that knows about status codes and JSON shapes.

pub mod extractors;
pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
