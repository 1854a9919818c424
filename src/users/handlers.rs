use axum::{
    extract::State,
    routing::{delete, get},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::instrument;
use uuid::Uuid;

use super::{
    dto::{ProfileResponse, UpdateProfileRequest, UserListResponse},
    services::{self, ProfileUpdate},
};
use crate::{
    auth::extractors::AuthUser,
    error::AppError,
    extract::{ApiJson, ApiPath},
    state::AppState,
};

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/api/admin/users", get(list_users))
        .route("/api/admin/users/:id", delete(delete_user))
}

pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/api/user/profile", get(get_profile).put(update_profile))
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<UserListResponse>, AppError> {
    let users = services::list_users(state.users.as_ref(), &caller).await?;
    Ok(Json(UserListResponse { users }))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Value>, AppError> {
    services::delete_user(state.users.as_ref(), &caller, id).await?;
    Ok(Json(json!({ "message": "User deleted", "id": id })))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let user = services::get_profile(state.users.as_ref(), caller.id).await?;
    Ok(Json(ProfileResponse {
        user,
        message: None,
    }))
}

#[instrument(skip(state, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiJson(payload): ApiJson<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    let res = services::update_profile(
        state.users.as_ref(),
        caller.id,
        payload.name.as_deref().unwrap_or_default(),
    )
    .await?;
    let message = match res {
        ProfileUpdate::Updated(_) => "Profile updated",
        ProfileUpdate::Unchanged(_) => "Profile unchanged",
    };
    Ok(Json(ProfileResponse {
        user: res.into_user(),
        message: Some(message),
    }))
}
