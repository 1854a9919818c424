use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};

use super::{
    dto::Identity,
    extractors::AuthUser,
    password::{hash_password, verify_decoy, verify_password},
};
use crate::{
    error::AppError,
    users::{
        repo_types::{normalize_email, NewUser, Role},
        store::UserStore,
    },
};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Checks `(email, password)` against the store.
///
/// Unknown email and wrong password both surface as
/// [`AppError::InvalidCredentials`], so callers cannot tell which was wrong.
pub async fn authenticate(
    users: &dyn UserStore,
    email: &str,
    password: &str,
) -> Result<Identity, AppError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(AppError::Validation(
            "Email and password are required".into(),
        ));
    }

    let email = normalize_email(email);
    let Some(user) = users.find_by_email(&email).await? else {
        verify_decoy(password);
        warn!(%email, "login unknown email");
        return Err(AppError::InvalidCredentials);
    };

    if !verify_password(password, &user.password_hash)? {
        warn!(%email, user_id = %user.id, "login invalid password");
        return Err(AppError::InvalidCredentials);
    }

    info!(user_id = %user.id, role = %user.role, "user authenticated");
    Ok(Identity::from(&user))
}

/// Creates a USER account.
pub async fn register(
    users: &dyn UserStore,
    email: &str,
    password: &str,
    name: Option<&str>,
) -> Result<Identity, AppError> {
    let email = normalize_email(email);
    if !is_valid_email(&email) {
        warn!(%email, "invalid email");
        return Err(AppError::Validation("Invalid email".into()));
    }
    if password.len() < 8 {
        return Err(AppError::Validation(
            "Password must be at least 8 characters".into(),
        ));
    }

    let name = name.map(str::trim).filter(|n| !n.is_empty()).map(String::from);
    let user = users
        .create(NewUser {
            email,
            name,
            password_hash: hash_password(password)?,
            role: Role::User,
        })
        .await?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(Identity::from(&user))
}

/// Reloads the caller so a re-issued token reflects the stored role.
pub async fn current_identity(
    users: &dyn UserStore,
    caller: &AuthUser,
) -> Result<Identity, AppError> {
    let user = users
        .find_by_id(caller.id)
        .await?
        .ok_or(AppError::Unauthenticated)?;
    if user.role != caller.role {
        info!(user_id = %user.id, from = %caller.role, to = %user.role, "role changed since issue");
    }
    Ok(Identity::from(&user))
}
