use tracing::{info, warn};
use uuid::Uuid;

use super::{repo_types::User, store::UserStore};
use crate::{auth::extractors::AuthUser, error::AppError};

/// Result of a profile update; `Unchanged` means no write happened.
#[derive(Debug)]
pub enum ProfileUpdate {
    Updated(User),
    Unchanged(User),
}

impl ProfileUpdate {
    pub fn into_user(self) -> User {
        match self {
            ProfileUpdate::Updated(u) | ProfileUpdate::Unchanged(u) => u,
        }
    }
}

fn require_admin(caller: &AuthUser) -> Result<(), AppError> {
    if caller.role.is_admin() {
        Ok(())
    } else {
        warn!(user_id = %caller.id, role = %caller.role, "admin operation denied");
        Err(AppError::Forbidden)
    }
}

pub async fn list_users(users: &dyn UserStore, caller: &AuthUser) -> Result<Vec<User>, AppError> {
    require_admin(caller)?;
    Ok(users.list().await?)
}

/// Admin-only single-row delete. An admin can never delete its own account here.
pub async fn delete_user(
    users: &dyn UserStore,
    caller: &AuthUser,
    target: Uuid,
) -> Result<(), AppError> {
    require_admin(caller)?;
    if target == caller.id {
        warn!(user_id = %caller.id, "self deletion rejected");
        return Err(AppError::SelfDeletion);
    }
    if !users.delete(target).await? {
        return Err(AppError::NotFound("User"));
    }
    info!(admin_id = %caller.id, deleted = %target, "user deleted");
    Ok(())
}

pub async fn get_profile(users: &dyn UserStore, caller_id: Uuid) -> Result<User, AppError> {
    users
        .find_by_id(caller_id)
        .await?
        .ok_or(AppError::NotFound("User"))
}

/// Sets the caller's display name. The trimmed name must be at least 2
/// characters; an unchanged name reports success without writing.
pub async fn update_profile(
    users: &dyn UserStore,
    caller_id: Uuid,
    name: &str,
) -> Result<ProfileUpdate, AppError> {
    let name = name.trim();
    if name.chars().count() < 2 {
        return Err(AppError::Validation(
            "Name must be at least 2 characters".into(),
        ));
    }

    let current = get_profile(users, caller_id).await?;
    if current.name.as_deref() == Some(name) {
        return Ok(ProfileUpdate::Unchanged(current));
    }

    let updated = users
        .update_name(caller_id, name)
        .await?
        .ok_or(AppError::NotFound("User"))?;
    info!(user_id = %caller_id, "profile updated");
    Ok(ProfileUpdate::Updated(updated))
}
