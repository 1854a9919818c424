//! Per-request path/role access control for the page routes.
//!
//! The decision itself is the pure [`decide`]; [`enforce`] is the axum
//! middleware that feeds it the request path and whatever role a valid
//! session token carries.

use axum::{
    extract::{FromRef, Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use super::{
    cookie::{session_token, SessionCookie},
    jwt::JwtKeys,
};
use crate::{state::AppState, users::repo_types::Role};

pub const LOGIN_PATH: &str = "/login";
pub const UNAUTHORIZED_PATH: &str = "/auth/unauthorized";
pub const ADMIN_HOME: &str = "/admin/dashboard";
pub const USER_HOME: &str = "/dashboard";

/// Prefixes reserved for ADMIN.
const ADMIN_PREFIXES: &[&str] = &["/admin"];
/// Prefixes open to any signed-in role.
const AUTHENTICATED_PREFIXES: &[&str] = &["/dashboard", "/profile"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    RedirectToLogin,
    RedirectUnauthorized,
    RedirectHome(Role),
}

pub fn home_for(role: Role) -> &'static str {
    match role {
        Role::Admin => ADMIN_HOME,
        Role::User => USER_HOME,
    }
}

/// `/admin` and `/admin/...` are under `/admin`; `/administrator` is not.
fn under(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// Maps `(path, role)` to an access decision. `role` is `None` when the
/// request has no valid token.
pub fn decide(path: &str, role: Option<Role>) -> GateDecision {
    if path == "/" {
        return match role {
            Some(role) => GateDecision::RedirectHome(role),
            None => GateDecision::Allow,
        };
    }

    let admin_only = ADMIN_PREFIXES.iter().any(|p| under(path, p));
    let signed_in = AUTHENTICATED_PREFIXES.iter().any(|p| under(path, p));

    // admin check first: a known non-admin never falls through to "needs login"
    match role {
        None if admin_only || signed_in => GateDecision::RedirectToLogin,
        Some(role) if admin_only && !role.is_admin() => GateDecision::RedirectUnauthorized,
        _ => GateDecision::Allow,
    }
}

/// Middleware wrapping the whole router. Invalid or expired tokens count as absent.
pub async fn enforce(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let keys = JwtKeys::from_ref(&state);
    let cookie = SessionCookie::from_ref(&state);

    let role = session_token(req.headers(), &cookie)
        .and_then(|t| keys.verify(t).ok())
        .map(|c| c.role);

    let path = req.uri().path();
    let decision = decide(path, role);
    if decision != GateDecision::Allow {
        debug!(%path, ?role, ?decision, "gate redirect");
    }

    match decision {
        GateDecision::Allow => next.run(req).await,
        GateDecision::RedirectToLogin => Redirect::temporary(LOGIN_PATH).into_response(),
        GateDecision::RedirectUnauthorized => {
            Redirect::temporary(UNAUTHORIZED_PATH).into_response()
        }
        GateDecision::RedirectHome(role) => Redirect::temporary(home_for(role)).into_response(),
    }
}
