//! Page endpoints behind the gate. They describe the view; rendering lives elsewhere.

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::{
    auth::extractors::{AdminUser, AuthUser},
    state::AppState,
};

pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(landing))
        .route("/login", get(login))
        .route("/auth/unauthorized", get(unauthorized))
        .route("/dashboard", get(dashboard))
        .route("/profile", get(profile))
        .route("/admin/dashboard", get(admin_dashboard))
}

async fn landing() -> Json<Value> {
    Json(json!({ "page": "landing" }))
}

async fn login() -> Json<Value> {
    Json(json!({ "page": "login" }))
}

async fn unauthorized() -> Json<Value> {
    Json(json!({
        "page": "unauthorized",
        "message": "You do not have access to this page",
    }))
}

async fn dashboard(user: AuthUser) -> Json<Value> {
    Json(json!({ "page": "dashboard", "user": user }))
}

async fn profile(user: AuthUser) -> Json<Value> {
    Json(json!({ "page": "profile", "user": user }))
}

async fn admin_dashboard(AdminUser(user): AdminUser) -> Json<Value> {
    Json(json!({ "page": "admin_dashboard", "user": user }))
}
