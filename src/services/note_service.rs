//! Note service - note CRUD with owner integrity.
//!
//! Owner existence is checked through [`UserService`] whenever a note is
//! created or re-pointed. Every note returned here is re-read from the store
//! with its owner resolved.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::UserService;
use crate::domain::{Listing, NewNote, Note, NoteChanges, User};
use crate::errors::{AppError, AppResult, OptionExt, ValidationFailure};
use crate::infra::UnitOfWork;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait NoteService: Send + Sync {
    /// List all notes with owners
    async fn list_notes(&self) -> AppResult<Listing<Note>>;

    /// Get note by ID with owner
    async fn get_note(&self, id: i32) -> AppResult<Note>;

    /// Create a note for an existing owner
    async fn create_note(&self, note: NewNote) -> AppResult<Note>;

    /// Apply a typed sparse update
    async fn update_note(&self, id: i32, changes: NoteChanges) -> AppResult<Note>;

    /// Apply a raw field map, limited to `title`, `content` and `user_id`
    async fn patch_note(&self, id: i32, fields: Map<String, Value>) -> AppResult<Note>;

    /// Delete note by ID
    async fn delete_note(&self, id: i32) -> AppResult<()>;

    /// Resolve the owner and list its notes
    async fn list_notes_by_owner(&self, owner_id: i32) -> AppResult<(User, Listing<Note>)>;
}

/// Concrete implementation of NoteService using Unit of Work.
pub struct NoteManager<U: UnitOfWork> {
    uow: Arc<U>,
    users: Arc<dyn UserService>,
}

impl<U: UnitOfWork> NoteManager<U> {
    pub fn new(uow: Arc<U>, users: Arc<dyn UserService>) -> Self {
        Self { uow, users }
    }

    /// Fail with `UnknownOwner` unless `owner_id` names an existing user.
    async fn ensure_owner(&self, owner_id: i32) -> AppResult<()> {
        match self.users.get_user(owner_id).await {
            Ok(_) => Ok(()),
            Err(AppError::NotFound(_)) => Err(AppError::Validation(ValidationFailure::UnknownOwner)),
            Err(e) => Err(e),
        }
    }

    async fn reload(&self, id: i32) -> AppResult<Note> {
        self.uow
            .notes()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Note")
    }

    async fn write(&self, current: Note, changes: NoteChanges) -> AppResult<Note> {
        if changes.is_empty() {
            return Ok(current);
        }

        let updated = self.uow.notes().update(current.id, changes).await?;
        self.reload(updated.id).await
    }
}

#[async_trait]
impl<U: UnitOfWork> NoteService for NoteManager<U> {
    async fn list_notes(&self) -> AppResult<Listing<Note>> {
        Ok(self.uow.notes().list().await?.into())
    }

    async fn get_note(&self, id: i32) -> AppResult<Note> {
        self.reload(id).await
    }

    async fn create_note(&self, note: NewNote) -> AppResult<Note> {
        self.ensure_owner(note.user_id).await?;

        let created = self.uow.notes().create(note).await?;
        tracing::debug!(note_id = created.id, user_id = created.user_id, "Note created");

        self.reload(created.id).await
    }

    async fn update_note(&self, id: i32, changes: NoteChanges) -> AppResult<Note> {
        let current = self.reload(id).await?;

        if let Some(owner_id) = changes.user_id {
            if owner_id != current.user_id {
                self.ensure_owner(owner_id).await?;
            }
        }

        self.write(current, changes).await
    }

    async fn patch_note(&self, id: i32, fields: Map<String, Value>) -> AppResult<Note> {
        let current = self.reload(id).await?;
        let changes = NoteChanges::try_from(fields)?;

        // A patch naming the owner is always re-validated, even if unchanged
        if let Some(owner_id) = changes.user_id {
            self.ensure_owner(owner_id).await?;
        }

        self.write(current, changes).await
    }

    async fn delete_note(&self, id: i32) -> AppResult<()> {
        self.uow.notes().delete(id).await
    }

    async fn list_notes_by_owner(&self, owner_id: i32) -> AppResult<(User, Listing<Note>)> {
        let owner = self.users.get_user(owner_id).await?;
        let notes = self.uow.notes().list_by_owner(owner_id).await?;
        Ok((owner, notes.into()))
    }
}
