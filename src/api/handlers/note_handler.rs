//! Note handlers.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::api::extractors::{PathParam, ValidatedJson};
use crate::api::AppState;
use crate::config::DEFAULT_NOTE_OWNER_ID;
use crate::domain::{NewNote, NoteChanges, NoteResponse, UserResponse};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created};

/// Note creation request. `user_id` falls back to the default owner.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateNoteRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
    pub user_id: Option<i32>,
}

impl From<CreateNoteRequest> for NewNote {
    fn from(req: CreateNoteRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
            user_id: req.user_id.unwrap_or(DEFAULT_NOTE_OWNER_ID),
        }
    }
}

/// Sparse note update. Omitted fields are left untouched; content may be
/// cleared by sending an empty string.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateNoteRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,
    pub content: Option<String>,
    pub user_id: Option<i32>,
}

impl From<UpdateNoteRequest> for NoteChanges {
    fn from(req: UpdateNoteRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
            user_id: req.user_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NotesListResponse {
    pub success: bool,
    pub message: String,
    pub notes: Vec<NoteResponse>,
    pub total: u64,
}

#[derive(Debug, Serialize)]
pub struct UserNotesResponse {
    pub success: bool,
    pub message: String,
    pub user: UserResponse,
    pub notes: Vec<NoteResponse>,
    pub total: u64,
}

/// Create note routes
pub fn note_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_notes).post(create_note))
        .route(
            "/:id",
            get(get_note)
                .put(update_note)
                .patch(patch_note)
                .delete(delete_note),
        )
}

pub async fn list_notes(State(state): State<AppState>) -> AppResult<Json<NotesListResponse>> {
    let listing = state.note_service.list_notes().await?;

    Ok(Json(NotesListResponse {
        success: true,
        message: "Notes retrieved successfully".to_string(),
        notes: listing.items.into_iter().map(NoteResponse::from).collect(),
        total: listing.total,
    }))
}

pub async fn create_note(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateNoteRequest>,
) -> AppResult<Created<NoteResponse>> {
    let note = state.note_service.create_note(payload.into()).await?;
    Ok(Created(ApiResponse::with_message(
        NoteResponse::from(note),
        "Note created successfully",
    )))
}

pub async fn get_note(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> AppResult<Json<ApiResponse<NoteResponse>>> {
    let note = state.note_service.get_note(id).await?;
    Ok(Json(ApiResponse::success(NoteResponse::from(note))))
}

pub async fn update_note(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateNoteRequest>,
) -> AppResult<Json<ApiResponse<NoteResponse>>> {
    let note = state.note_service.update_note(id, payload.into()).await?;
    Ok(Json(ApiResponse::with_message(
        NoteResponse::from(note),
        "Note updated successfully",
    )))
}

/// Partial update from a raw JSON object; unknown keys are rejected
pub async fn patch_note(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> AppResult<Json<ApiResponse<NoteResponse>>> {
    let Json(fields) = payload?;
    let note = state.note_service.patch_note(id, fields).await?;
    Ok(Json(ApiResponse::with_message(
        NoteResponse::from(note),
        "Note updated successfully",
    )))
}

pub async fn delete_note(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.note_service.delete_note(id).await?;
    Ok(Json(ApiResponse::message("Note deleted successfully")))
}

/// List the notes of one user, failing with 404 when the user is unknown
pub async fn list_notes_by_owner(
    State(state): State<AppState>,
    PathParam(user_id): PathParam<i32>,
) -> AppResult<Json<UserNotesResponse>> {
    let (owner, listing) = state.note_service.list_notes_by_owner(user_id).await?;

    Ok(Json(UserNotesResponse {
        success: true,
        message: "User notes retrieved successfully".to_string(),
        user: UserResponse::from(owner),
        notes: listing.items.into_iter().map(NoteResponse::from).collect(),
        total: listing.total,
    }))
}
