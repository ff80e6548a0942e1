//! Note repository implementation. Reads always eager-load the owning user.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::note::{self, ActiveModel, Entity as NoteEntity};
use super::entities::user::Entity as UserEntity;
use crate::domain::{NewNote, Note, NoteChanges};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Note repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Find note by ID with its owner resolved
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Note>>;

    /// List all notes with owners resolved
    async fn list(&self) -> AppResult<Vec<Note>>;

    /// List the notes owned by `user_id` with the owner resolved
    async fn list_by_owner(&self, user_id: i32) -> AppResult<Vec<Note>>;

    /// Insert a note. The returned note does not carry its owner.
    async fn create(&self, note: NewNote) -> AppResult<Note>;

    /// Apply the supplied fields to an existing note. The returned note does
    /// not carry its owner.
    async fn update(&self, id: i32, changes: NoteChanges) -> AppResult<Note>;

    /// Delete note by ID
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of NoteRepository
pub struct NoteStore {
    db: DatabaseConnection,
}

impl NoteStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NoteRepository for NoteStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Note>> {
        let result = NoteEntity::find_by_id(id)
            .find_also_related(UserEntity)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(|(model, owner)| model.into_note(owner)))
    }

    async fn list(&self) -> AppResult<Vec<Note>> {
        let rows = NoteEntity::find()
            .find_also_related(UserEntity)
            .order_by_asc(note::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows
            .into_iter()
            .map(|(model, owner)| model.into_note(owner))
            .collect())
    }

    async fn list_by_owner(&self, user_id: i32) -> AppResult<Vec<Note>> {
        let rows = NoteEntity::find()
            .filter(note::Column::UserId.eq(user_id))
            .find_also_related(UserEntity)
            .order_by_asc(note::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows
            .into_iter()
            .map(|(model, owner)| model.into_note(owner))
            .collect())
    }

    async fn create(&self, note: NewNote) -> AppResult<Note> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            title: Set(note.title),
            content: Set(note.content),
            user_id: Set(note.user_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(AppError::from_note_write)?;
        Ok(Note::from(model))
    }

    async fn update(&self, id: i32, changes: NoteChanges) -> AppResult<Note> {
        let note = NoteEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound("Note"))?;

        let mut active: ActiveModel = note.into();

        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(content) = changes.content {
            active.content = Set(content);
        }
        if let Some(user_id) = changes.user_id {
            active.user_id = Set(user_id);
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active
            .update(&self.db)
            .await
            .map_err(AppError::from_note_write)?;
        Ok(Note::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = NoteEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Note"));
        }

        Ok(())
    }
}
