use axum::{
    extract::{FromRef, State},
    http::header,
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{info, instrument};

use crate::{
    auth::{
        cookie::SessionCookie,
        dto::{Identity, LoginRequest, RegisterRequest, SessionResponse},
        extractors::AuthUser,
        jwt::JwtKeys,
        services,
    },
    error::AppError,
    extract::ApiJson,
    state::AppState,
};

type SetCookie = [(header::HeaderName, String); 1];

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/session", post(reissue))
}

/// Signs a token for `identity` and pairs it with the matching cookie.
fn start_session(
    state: &AppState,
    identity: Identity,
) -> Result<(SetCookie, Json<SessionResponse>), AppError> {
    let keys = JwtKeys::from_ref(state);
    let cookie = SessionCookie::from_ref(state);
    let issued = keys.sign(identity.id, identity.role)?;
    Ok((
        [(header::SET_COOKIE, cookie.set(&issued.token))],
        Json(SessionResponse {
            token: issued.token,
            expires_at: issued.expires_at,
            user: identity,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<(SetCookie, Json<SessionResponse>), AppError> {
    let identity = services::authenticate(
        state.users.as_ref(),
        payload.email.as_deref().unwrap_or_default(),
        payload.password.as_deref().unwrap_or_default(),
    )
    .await?;
    info!(user_id = %identity.id, email = %identity.email, "user logged in");
    start_session(&state, identity)
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<(SetCookie, Json<SessionResponse>), AppError> {
    let identity = services::register(
        state.users.as_ref(),
        payload.email.as_deref().unwrap_or_default(),
        payload.password.as_deref().unwrap_or_default(),
        payload.name.as_deref(),
    )
    .await?;
    start_session(&state, identity)
}

#[instrument(skip(state))]
pub async fn logout(State(state): State<AppState>) -> (SetCookie, Json<Value>) {
    let cookie = SessionCookie::from_ref(&state);
    (
        [(header::SET_COOKIE, cookie.clear())],
        Json(json!({ "message": "Logged out" })),
    )
}

/// Fresh token for a still-valid session; expired sessions must log in again.
#[instrument(skip(state))]
pub async fn reissue(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<(SetCookie, Json<SessionResponse>), AppError> {
    let identity = services::current_identity(state.users.as_ref(), &caller).await?;
    start_session(&state, identity)
}
