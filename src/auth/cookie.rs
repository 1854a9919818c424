use axum::{
    extract::FromRef,
    http::{header, HeaderMap},
};

use crate::state::AppState;

/// Attributes of the session cookie that transports the token to browsers.
#[derive(Debug, Clone)]
pub struct SessionCookie {
    pub name: String,
    pub secure: bool,
    pub max_age_secs: i64,
}

impl FromRef<AppState> for SessionCookie {
    fn from_ref(state: &AppState) -> Self {
        Self {
            name: state.config.cookie.name.clone(),
            secure: state.config.cookie.secure,
            max_age_secs: state.config.jwt.ttl_secs(),
        }
    }
}

impl SessionCookie {
    pub fn set(&self, token: &str) -> String {
        self.render(token, self.max_age_secs)
    }

    pub fn clear(&self) -> String {
        self.render("", 0)
    }

    fn render(&self, value: &str, max_age: i64) -> String {
        let mut cookie = format!(
            "{}={}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}",
            self.name, value, max_age
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }

    /// Finds the cookie value among all `Cookie` headers.
    pub fn read<'a>(&self, headers: &'a HeaderMap) -> Option<&'a str> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(k, v)| *k == self.name && !v.is_empty())
            .map(|(_, v)| v)
    }
}

/// Bearer header first, then the session cookie.
pub fn session_token<'a>(headers: &'a HeaderMap, cookie: &SessionCookie) -> Option<&'a str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer ").or_else(|| h.strip_prefix("bearer ")))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .or_else(|| cookie.read(headers))
}
