//! User service - account uniqueness, lifecycle and authentication.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{CredentialHasher, Listing, NewUser, User, UserChanges, DUMMY_DIGEST};
use crate::errors::{AppError, AppResult, AuthFailure, ConflictKind, OptionExt};
use crate::infra::UnitOfWork;
use crate::with_transaction;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User service trait for dependency injection.
///
/// Every user returned from this trait has its password digest cleared.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// List all users
    async fn list_users(&self) -> AppResult<Listing<User>>;

    /// Get user by ID
    async fn get_user(&self, id: i32) -> AppResult<User>;

    /// Register a new account with role `user` and status `activo`
    async fn register(&self, username: String, email: String, password: String)
        -> AppResult<User>;

    /// Apply a sparse update, re-checking uniqueness of changed identifiers
    async fn update_user(&self, id: i32, changes: UserChanges) -> AppResult<User>;

    /// Delete a user together with all of its notes
    async fn delete_user(&self, id: i32) -> AppResult<()>;

    /// Resolve an account from its credentials
    async fn authenticate(&self, email: String, password: String) -> AppResult<User>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
    hasher: Arc<dyn CredentialHasher>,
}

impl<U: UnitOfWork> UserManager<U> {
    /// Create new user service instance with Unit of Work
    pub fn new(uow: Arc<U>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { uow, hasher }
    }

    async fn ensure_email_free(&self, email: &str, current: Option<i32>) -> AppResult<()> {
        match self.uow.users().find_by_email(email).await? {
            Some(existing) if Some(existing.id) != current => {
                Err(AppError::Conflict(ConflictKind::EmailTaken))
            }
            _ => Ok(()),
        }
    }

    async fn ensure_username_free(&self, username: &str, current: Option<i32>) -> AppResult<()> {
        match self.uow.users().find_by_username(username).await? {
            Some(existing) if Some(existing.id) != current => {
                Err(AppError::Conflict(ConflictKind::UsernameTaken))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn list_users(&self) -> AppResult<Listing<User>> {
        let users = self.uow.users().list().await?;
        Ok(users
            .into_iter()
            .map(User::without_password)
            .collect::<Vec<_>>()
            .into())
    }

    async fn get_user(&self, id: i32) -> AppResult<User> {
        self.uow
            .users()
            .find_by_id(id)
            .await?
            .map(User::without_password)
            .ok_or_not_found("User")
    }

    async fn register(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> AppResult<User> {
        self.ensure_email_free(&email, None).await?;
        self.ensure_username_free(&username, None).await?;

        let password_hash = self.hasher.hash(&password)?;
        let user = self
            .uow
            .users()
            .create(NewUser {
                username,
                email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = user.id, "User registered");
        Ok(user.without_password())
    }

    async fn update_user(&self, id: i32, changes: UserChanges) -> AppResult<User> {
        let current = self
            .uow
            .users()
            .find_by_id(id)
            .await?
            .ok_or_not_found("User")?;

        if let Some(email) = changes.email.as_deref() {
            if email != current.email {
                self.ensure_email_free(email, Some(id)).await?;
            }
        }
        if let Some(username) = changes.username.as_deref() {
            if username != current.username {
                self.ensure_username_free(username, Some(id)).await?;
            }
        }

        if changes.is_empty() {
            return Ok(current.without_password());
        }

        let user = self.uow.users().update(id, changes).await?;
        Ok(user.without_password())
    }

    async fn delete_user(&self, id: i32) -> AppResult<()> {
        // First statement must be a write so racing deletes queue on the lock
        let removed = with_transaction!(self.uow, |tx| {
            let removed = tx.notes().delete_by_owner(id).await?;
            tx.users().delete(id).await?;
            Ok::<_, AppError>(removed)
        })?;

        tracing::info!(user_id = id, notes_removed = removed, "User deleted");
        Ok(())
    }

    async fn authenticate(&self, email: String, password: String) -> AppResult<User> {
        let Some(user) = self.uow.users().find_by_email(&email).await? else {
            // Keep the unknown-email path as expensive as a real mismatch
            let _ = self.hasher.verify(&password, DUMMY_DIGEST);
            return Err(AppError::Unauthorized(AuthFailure::InvalidCredentials));
        };

        if !user.is_active() {
            return Err(AppError::Unauthorized(AuthFailure::InactiveAccount));
        }

        if !self.hasher.verify(&password, &user.password_hash) {
            return Err(AppError::Unauthorized(AuthFailure::InvalidCredentials));
        }

        Ok(user.without_password())
    }
}
