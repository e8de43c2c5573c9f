use actix_web::{web, HttpResponse};

use crate::api::state::AppState;
use crate::domain::user::model::{normalize_handle, AccountStatus, StatusUpdate, User, UserProfile, UserRole};
use crate::utils::{errors::ApiError, security::AuthUser};

fn profiles(users: &[User]) -> Vec<UserProfile> {
    users.iter().map(User::to_profile).collect()
}

pub async fn list_pending(
    state: web::Data<AppState>,
    caller: AuthUser
) -> Result<HttpResponse, ApiError> {
    caller.require_role(UserRole::Admin)?;

    let pending = state.users
        .find_by_role_and_status(UserRole::Caregiver, AccountStatus::Pending)
        .await?;

    Ok(HttpResponse::Ok().json(profiles(&pending)))
}

pub async fn list_users(
    state: web::Data<AppState>,
    caller: AuthUser
) -> Result<HttpResponse, ApiError> {
    caller.require_role(UserRole::Admin)?;

    let users = state.users.get_all_users().await?;
    Ok(HttpResponse::Ok().json(profiles(&users)))
}

pub async fn approve_user(
    state: web::Data<AppState>,
    caller: AuthUser,
    handle: web::Path<String>
) -> Result<HttpResponse, ApiError> {
    caller.require_role(UserRole::Admin)?;

    state.users.set_status(&handle, AccountStatus::Active).await?;
    log::info!("'{}' approved '{}'", caller.handle(), handle);

    Ok(HttpResponse::NoContent().finish())
}

pub async fn set_user_status(
    state: web::Data<AppState>,
    caller: AuthUser,
    handle: web::Path<String>,
    update: web::Json<StatusUpdate>
) -> Result<HttpResponse, ApiError> {
    caller.require_role(UserRole::Admin)?;

    state.users.set_status(&handle, update.status).await?;
    log::info!("'{}' set '{}' to {:?}", caller.handle(), handle, update.status);

    Ok(HttpResponse::NoContent().finish())
}

pub async fn delete_user(
    state: web::Data<AppState>,
    caller: AuthUser,
    handle: web::Path<String>
) -> Result<HttpResponse, ApiError> {
    caller.require_role(UserRole::Admin)?;

    if normalize_handle(&handle) == caller.handle() {
        return Err(ApiError::Conflict("Admins cannot delete their own account".to_string()));
    }

    state.users.delete_user(&handle).await?;
    log::info!("'{}' deleted '{}'", caller.handle(), handle);

    Ok(HttpResponse::NoContent().finish())
}
