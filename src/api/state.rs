//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::infra::Database;
use crate::services::{NoteService, ServiceContainer, Services, UserService};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Note service
    pub note_service: Arc<dyn NoteService>,
    /// Database connection, used by the health check
    pub database: Arc<Database>,
}

impl AppState {
    /// Build the production state: SeaORM-backed services with Argon2 hashing.
    pub fn from_database(database: Arc<Database>) -> Self {
        let container = Services::from_connection(database.get_connection());
        Self::from_container(&container, database)
    }

    /// Build state from any service container.
    pub fn from_container(container: &impl ServiceContainer, database: Arc<Database>) -> Self {
        Self {
            user_service: container.users(),
            note_service: container.notes(),
            database,
        }
    }
}
