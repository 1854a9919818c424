use serde::Deserialize;

/// Upper bound on the session window: 30 days.
pub const MAX_SESSION_TTL_MINUTES: i64 = 60 * 24 * 30;
const DEFAULT_SESSION_TTL_MINUTES: i64 = 60 * 24;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

impl JwtConfig {
    /// Session window in seconds, kept within `1..=MAX_SESSION_TTL_MINUTES` minutes.
    pub fn ttl_secs(&self) -> i64 {
        self.ttl_minutes.clamp(1, MAX_SESSION_TTL_MINUTES) * 60
    }
}

/// Parses `SESSION_TTL_MINUTES`; unset, unparsable or non-positive values fall
/// back to 24h, anything above the cap is clamped to it.
pub fn parse_ttl_minutes(raw: Option<&str>) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|v| *v > 0)
        .map(|v| v.min(MAX_SESSION_TTL_MINUTES))
        .unwrap_or(DEFAULT_SESSION_TTL_MINUTES)
}

#[derive(Debug, Clone, Deserialize)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub cookie: CookieConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "dashgate".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "dashgate-users".into()),
            // expiry forces a fresh login
            ttl_minutes: parse_ttl_minutes(std::env::var("SESSION_TTL_MINUTES").ok().as_deref()),
        };
        let cookie = CookieConfig {
            name: std::env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| "session".into()),
            secure: std::env::var("SESSION_COOKIE_SECURE")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        };
        Ok(Self {
            database_url,
            jwt,
            cookie,
        })
    }
}
