//! User handlers.

use axum::{
    extract::State,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::extractors::{PathParam, ValidatedJson};
use crate::api::AppState;
use crate::domain::{UserChanges, UserResponse, UserRole, UserStatus};
use crate::errors::AppResult;
use crate::types::ApiResponse;

/// Sparse user update. Omitted fields are left untouched.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
}

impl From<UpdateUserRequest> for UserChanges {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            username: req.username,
            email: req.email,
            role: req.role,
            status: req.status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UsersListResponse {
    pub success: bool,
    pub message: String,
    pub users: Vec<UserResponse>,
    pub total: u64,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<UsersListResponse>> {
    let listing = state.user_service.list_users().await?;

    Ok(Json(UsersListResponse {
        success: true,
        message: "Users retrieved successfully".to_string(),
        users: listing.items.into_iter().map(UserResponse::from).collect(),
        total: listing.total,
    }))
}

pub async fn get_user(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = state.user_service.get_user(id).await?;
    Ok(Json(ApiResponse::success(UserResponse::from(user))))
}

pub async fn update_user(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = state.user_service.update_user(id, payload.into()).await?;
    Ok(Json(ApiResponse::with_message(
        UserResponse::from(user),
        "User updated successfully",
    )))
}

/// Delete a user and every note it owns
pub async fn delete_user(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.user_service.delete_user(id).await?;
    Ok(Json(ApiResponse::message("User deleted successfully")))
}
