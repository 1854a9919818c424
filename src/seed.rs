use anyhow::Context;
use tracing::info;

use crate::{
    auth::password::hash_password,
    users::{
        repo_types::{normalize_email, NewUser, Role, User},
        store::{StoreError, UserStore},
    },
};

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const DEFAULT_ADMIN_NAME: &str = "Administrator";

/// What the seed binary needs from the environment. JWT and cookie settings
/// are not read, so seeding works before the server is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSettings {
    pub database_url: String,
    pub email: String,
    pub password: String,
}

impl SeedSettings {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        Ok(Self {
            database_url: lookup("DATABASE_URL").context("DATABASE_URL is not set")?,
            email: lookup("SEED_ADMIN_EMAIL").unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.into()),
            password: lookup("SEED_ADMIN_PASSWORD")
                .unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.into()),
        })
    }
}

#[derive(Debug)]
pub enum SeedOutcome {
    Created(User),
    AlreadyExists,
}

/// Creates the ADMIN account unless the email is already taken. Safe to re-run.
pub async fn ensure_admin(
    users: &dyn UserStore,
    email: &str,
    password: &str,
    name: &str,
) -> anyhow::Result<SeedOutcome> {
    let email = normalize_email(email);
    if users.find_by_email(&email).await?.is_some() {
        info!(%email, "admin user already exists");
        return Ok(SeedOutcome::AlreadyExists);
    }

    let new = NewUser {
        email: email.clone(),
        name: Some(name.to_string()),
        password_hash: hash_password(password)?,
        role: Role::Admin,
    };
    match users.create(new).await {
        Ok(user) => {
            info!(%email, user_id = %user.id, "admin user created");
            Ok(SeedOutcome::Created(user))
        }
        // lost a race with a concurrent seed
        Err(StoreError::DuplicateEmail) => Ok(SeedOutcome::AlreadyExists),
        Err(e) => Err(e).context("create admin user"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{auth::services::authenticate, users::memory::MemoryUserStore};

    #[test]
    fn settings_need_only_the_database_url() {
        let settings = SeedSettings::from_lookup(|key| {
            (key == "DATABASE_URL").then(|| "postgres://localhost/dashgate".to_string())
        })
        .unwrap();
        assert_eq!(settings.database_url, "postgres://localhost/dashgate");
        assert_eq!(settings.email, DEFAULT_ADMIN_EMAIL);
        assert_eq!(settings.password, DEFAULT_ADMIN_PASSWORD);

        let err = SeedSettings::from_lookup(|_| None).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn settings_take_admin_overrides() {
        let settings = SeedSettings::from_lookup(|key| match key {
            "DATABASE_URL" => Some("postgres://db".into()),
            "SEED_ADMIN_EMAIL" => Some("root@corp.io".into()),
            "SEED_ADMIN_PASSWORD" => Some("s3cret-pass".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(settings.email, "root@corp.io");
        assert_eq!(settings.password, "s3cret-pass");
    }

    #[tokio::test]
    async fn seeding_twice_is_idempotent() {
        let store = MemoryUserStore::new();

        let first = ensure_admin(&store, DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_NAME)
            .await
            .unwrap();
        let SeedOutcome::Created(admin) = first else {
            panic!("first run should create the admin");
        };
        assert_eq!(admin.role, Role::Admin);

        let second = ensure_admin(&store, DEFAULT_ADMIN_EMAIL, "other-password", DEFAULT_ADMIN_NAME)
            .await
            .unwrap();
        assert!(matches!(second, SeedOutcome::AlreadyExists));

        let all = store.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].email, DEFAULT_ADMIN_EMAIL);
    }

    #[tokio::test]
    async fn seeded_admin_can_log_in() {
        let store = MemoryUserStore::new();
        ensure_admin(&store, "Admin@Example.com", DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_NAME)
            .await
            .unwrap();
        let id = authenticate(&store, DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD)
            .await
            .unwrap();
        assert_eq!(id.role, Role::Admin);
        assert_eq!(id.name.as_deref(), Some(DEFAULT_ADMIN_NAME));
    }
}
