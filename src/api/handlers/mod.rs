use mongodb::bson::oid::ObjectId;

use crate::api::state::AppState;
use crate::domain::user::model::User;
use crate::utils::{errors::ApiError, security::AuthUser};

pub mod admin_handlers;
pub mod ai_handlers;
pub mod booking_handlers;
pub mod message_handlers;
pub mod pet_handlers;
pub mod user_handlers;

#[cfg(test)]
pub(crate) mod test_support;

pub(crate) fn parse_object_id(raw: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(raw.trim())
        .map_err(|_| ApiError::BadRequest(format!("'{}' is not a valid id", raw)))
}

/// The caller's stored account, which must be active. Status is read from the
/// database, not the token, so blocking or approving takes effect at once.
pub(crate) async fn active_account(state: &AppState, caller: &AuthUser) -> Result<User, ApiError> {
    let user = state.users
        .get_user_by_handle(caller.handle())
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Account no longer exists".to_string()))?;

    user.require_active()?;
    Ok(user)
}
