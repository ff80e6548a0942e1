//! Application services layer - Use cases and business logic.
//!
//! Services hold no state of their own beyond shared handles; every
//! operation re-reads the store through the Unit of Work.

pub mod container;
mod note_service;
mod user_service;

pub use container::{ServiceContainer, Services};
pub use note_service::{NoteManager, NoteService};
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use note_service::MockNoteService;
#[cfg(any(test, feature = "test-utils"))]
pub use user_service::MockUserService;
