//! Service Container - wires the Unit of Work, credential hasher and
//! services together behind their traits.

use std::sync::Arc;

use super::{NoteManager, NoteService, UserManager, UserService};
use crate::domain::{Argon2Hasher, CredentialHasher};
use crate::infra::Persistence;

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get note service
    fn notes(&self) -> Arc<dyn NoteService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    user_service: Arc<dyn UserService>,
    note_service: Arc<dyn NoteService>,
}

impl Services {
    /// Create service container from a database connection using Argon2 hashing
    pub fn from_connection(db: sea_orm::DatabaseConnection) -> Self {
        Self::with_hasher(db, Arc::new(Argon2Hasher::default()))
    }

    /// Create service container from a database connection and a specific hasher
    pub fn with_hasher(db: sea_orm::DatabaseConnection, hasher: Arc<dyn CredentialHasher>) -> Self {
        let uow = Arc::new(Persistence::new(db));
        let user_service: Arc<dyn UserService> = Arc::new(UserManager::new(uow.clone(), hasher));
        let note_service = Arc::new(NoteManager::new(uow, user_service.clone()));

        Self {
            user_service,
            note_service,
        }
    }
}

impl ServiceContainer for Services {
    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn notes(&self) -> Arc<dyn NoteService> {
        self.note_service.clone()
    }
}
