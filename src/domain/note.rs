//! Note domain entity and the typed change sets applied to it.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use super::user::{User, UserResponse};
use crate::config::{MAX_TITLE_LENGTH, MIN_TITLE_LENGTH};
use crate::errors::{AppError, ValidationFailure};

/// Note domain entity
#[derive(Debug, Clone)]
pub struct Note {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub user_id: i32,
    /// Owning user, populated when the note was read together with its owner
    pub owner: Option<User>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data required to persist a new note
#[derive(Debug, Clone, PartialEq)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub user_id: i32,
}

/// Sparse note update. `None` leaves the attribute untouched, while
/// `Some(String::new())` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub user_id: Option<i32>,
}

impl NoteChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.user_id.is_none()
    }
}

/// Builds a change set from a raw JSON object. Only `title`, `content` and
/// `user_id` are accepted; any other key or a value of the wrong type fails.
impl TryFrom<Map<String, Value>> for NoteChanges {
    type Error = AppError;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let mut changes = NoteChanges::default();

        for (key, value) in fields {
            match key.as_str() {
                "title" => {
                    let title = expect_string(&key, value)?;
                    let len = title.chars().count() as u64;
                    if !(MIN_TITLE_LENGTH..=MAX_TITLE_LENGTH).contains(&len) {
                        return Err(AppError::invalid_field(
                            &key,
                            format!(
                                "must be between {} and {} characters",
                                MIN_TITLE_LENGTH, MAX_TITLE_LENGTH
                            ),
                        ));
                    }
                    changes.title = Some(title);
                }
                "content" => changes.content = Some(expect_string(&key, value)?),
                "user_id" => {
                    let user_id = value
                        .as_i64()
                        .and_then(|id| i32::try_from(id).ok())
                        .ok_or_else(|| AppError::invalid_field(&key, "must be a user identifier"))?;
                    changes.user_id = Some(user_id);
                }
                _ => {
                    return Err(AppError::Validation(ValidationFailure::UnknownField(key.clone())));
                }
            }
        }

        Ok(changes)
    }
}

fn expect_string(field: &str, value: Value) -> Result<String, AppError> {
    match value {
        Value::String(s) => Ok(s),
        _ => Err(AppError::invalid_field(field, "must be a string")),
    }
}

/// Note response (owner rendered without credentials)
#[derive(Debug, Clone, Serialize)]
pub struct NoteResponse {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub user_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            content: note.content,
            user_id: note.user_id,
            user: note.owner.map(UserResponse::from),
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_patch_with_content_only() {
        let changes = NoteChanges::try_from(fields(json!({ "content": "new" }))).unwrap();

        assert_eq!(
            changes,
            NoteChanges {
                content: Some("new".to_string()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_patch_can_clear_content() {
        let changes = NoteChanges::try_from(fields(json!({ "content": "" }))).unwrap();
        assert_eq!(changes.content.as_deref(), Some(""));
    }

    #[test]
    fn test_patch_rejects_fields_outside_allow_list() {
        for key in ["id", "created_at", "updated_at", "owner"] {
            let err = NoteChanges::try_from(fields(json!({ key: "x" }))).unwrap_err();
            assert!(
                matches!(err, AppError::Validation(ValidationFailure::UnknownField(ref f)) if f == key),
                "{key} should be rejected"
            );
        }
    }

    #[test]
    fn test_patch_rejects_wrong_types() {
        let err = NoteChanges::try_from(fields(json!({ "user_id": "two" }))).unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationFailure::InvalidField { .. })
        ));

        let err = NoteChanges::try_from(fields(json!({ "title": 5 }))).unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationFailure::InvalidField { .. })
        ));
    }

    #[test]
    fn test_patch_rejects_empty_title() {
        let err = NoteChanges::try_from(fields(json!({ "title": "" }))).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_empty_patch_is_empty() {
        let changes = NoteChanges::try_from(Map::new()).unwrap();
        assert!(changes.is_empty());
    }
}
