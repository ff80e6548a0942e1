//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and runs multi-step writes (such as removing
//! a user together with its notes) inside a single database transaction.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    AccessMode, ColumnTrait, ConnectionTrait, DatabaseBackend, DatabaseConnection,
    DatabaseTransaction, EntityTrait, IsolationLevel, QueryFilter, TransactionTrait,
};

use super::repositories::entities::note::{self, Entity as NoteEntity};
use super::repositories::entities::user::Entity as UserEntity;
use super::repositories::{NoteRepository, NoteStore, UserRepository, UserStore};
use crate::errors::{AppError, AppResult};

/// Boxed future returned by a transactional closure
pub type TxFuture<'a, T> = Pin<Box<dyn Future<Output = AppResult<T>> + Send + 'a>>;

/// Unit of Work trait for dependency injection.
///
/// Not mockable directly because `transaction` is generic; tests provide a
/// small hand-written implementation over the repository mocks instead.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get note repository
    fn notes(&self) -> Arc<dyn NoteRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is committed when the closure succeeds and rolled back
    /// when it returns an error.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
///
/// Everything done through this context belongs to the same transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Get user repository for this transaction
    pub fn users(&self) -> TxUserRepository<'_> {
        TxUserRepository { txn: self.txn }
    }

    /// Get note repository for this transaction
    pub fn notes(&self) -> TxNoteRepository<'_> {
        TxNoteRepository { txn: self.txn }
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    note_repo: Arc<NoteStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        let user_repo = Arc::new(UserStore::new(db.clone()));
        let note_repo = Arc::new(NoteStore::new(db.clone()));
        Self {
            db,
            user_repo,
            note_repo,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn notes(&self) -> Arc<dyn NoteRepository> {
        self.note_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        // SQLite has no per-transaction isolation settings
        let (isolation, access) = match self.db.get_database_backend() {
            DatabaseBackend::Sqlite => (None, None),
            _ => (
                Some(IsolationLevel::ReadCommitted),
                Some(AccessMode::ReadWrite),
            ),
        };

        let txn = self
            .db
            .begin_with_config(isolation, access)
            .await
            .map_err(AppError::from)?;

        match f(TransactionContext::new(&txn)).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Transaction-aware user repository.
pub struct TxUserRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxUserRepository<'a> {
    /// Delete user by ID. Fails with `NotFound` when no row was removed.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id)
            .exec(self.txn)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("User"));
        }

        Ok(())
    }
}

/// Transaction-aware note repository.
pub struct TxNoteRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxNoteRepository<'a> {
    /// Delete every note owned by `user_id`, returning how many were removed.
    pub async fn delete_by_owner(&self, user_id: i32) -> AppResult<u64> {
        let result = NoteEntity::delete_many()
            .filter(note::Column::UserId.eq(user_id))
            .exec(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }
}

/// Simpler API for executing transactional operations.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
