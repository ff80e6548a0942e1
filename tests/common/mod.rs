//! Shared setup for the integration tests: a migrated in-memory SQLite
//! database and the real services wired over it.

#![allow(dead_code)]

use std::sync::Arc;

use notes_api::api::{create_router, AppState};
use notes_api::domain::Argon2Hasher;
use notes_api::infra::Database;
use notes_api::services::{NoteService, ServiceContainer, Services, UserService};

/// Fully wired application over a fresh database
pub struct TestApp {
    pub database: Arc<Database>,
    pub users: Arc<dyn UserService>,
    pub notes: Arc<dyn NoteService>,
    pub state: AppState,
}

impl TestApp {
    pub async fn spawn() -> Self {
        // One connection: every pooled connection would get its own in-memory db
        Self::spawn_on("sqlite::memory:", 1).await
    }

    /// Wire the app over an arbitrary database URL and pool size
    pub async fn spawn_on(database_url: &str, max_connections: u32) -> Self {
        let database = Database::open(database_url, max_connections)
            .await
            .expect("open database");
        database.run_migrations().await.expect("run migrations");
        let database = Arc::new(database);

        // Cheap parameters keep hashing out of the test runtime
        let hasher = Argon2Hasher::with_params(256, 1, 1).expect("argon2 params");
        let container = Services::with_hasher(database.get_connection(), Arc::new(hasher));
        let state = AppState::from_container(&container, database.clone());

        Self {
            users: container.users(),
            notes: container.notes(),
            database,
            state,
        }
    }

    pub fn router(&self) -> axum::Router {
        create_router(self.state.clone())
    }

    /// Register a user and return its id
    pub async fn register(&self, username: &str, email: &str, password: &str) -> i32 {
        self.users
            .register(username.to_string(), email.to_string(), password.to_string())
            .await
            .expect("register user")
            .id
    }
}
