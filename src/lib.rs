//! Notes API - users and their notes over REST
//!
//! Users register and log in with an email and password; each note belongs
//! to exactly one user. Deleting a user removes the notes it owns in the
//! same transaction.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Users, notes and password hashing
//! - **services**: User and note use cases
//! - **infra**: Database, migrations, repositories and unit of work
//! - **api**: HTTP handlers, extractors and routes
//! - **types**: Response envelopes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Note, User, UserRole, UserStatus};
pub use errors::{AppError, AppResult};
