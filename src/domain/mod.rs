//! Domain layer - Core business entities and logic
//!
//! Users, notes, the typed change sets applied to them and the credential
//! hashing capability. No persistence or HTTP concerns live here.

pub mod note;
pub mod password;
pub mod user;

pub use note::{NewNote, Note, NoteChanges, NoteResponse};
pub use password::{Argon2Hasher, CredentialHasher, DUMMY_DIGEST};
pub use user::{NewUser, User, UserChanges, UserResponse, UserRole, UserStatus};

#[cfg(any(test, feature = "test-utils"))]
pub use password::MockCredentialHasher;

/// A full listing together with its size
#[derive(Debug, Clone)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> From<Vec<T>> for Listing<T> {
    fn from(items: Vec<T>) -> Self {
        let total = items.len() as u64;
        Self { items, total }
    }
}
