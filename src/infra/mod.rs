//! Infrastructure layer - Persistence integration
//!
//! Database connection and migrations, SeaORM-backed repositories and the
//! Unit of Work that scopes multi-step writes to one transaction.

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{NoteRepository, NoteStore, UserRepository, UserStore};
pub use unit_of_work::{
    Persistence, TransactionContext, TxFuture, TxNoteRepository, TxUserRepository, UnitOfWork,
};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockNoteRepository, MockUserRepository};
