use actix_web::{web, HttpResponse, Responder, ResponseError};

use crate::api::state::AppState;
use crate::domain::user::model::{
    AccountStatus, CaregiverQuery, LoginResponse, ProfileUpdate, User, UserLoginReceive, UserProfile,
    UserRegisterReceive, UserRole,
};
use crate::utils::{errors::ApiError, security::{AuthUser, AuthUtils}};

pub async fn create_user(
    state: web::Data<AppState>,
    user: web::Json<UserRegisterReceive>
) -> impl Responder {
    let user = user.into_inner();

    if user.role == UserRole::Admin {
        return ApiError::Forbidden("Admin accounts cannot be self-registered".to_string()).error_response();
    }
    if user.handle.trim().is_empty() || user.password.is_empty() {
        return ApiError::InvalidData("Handle and password are required".to_string()).error_response();
    }
    if user.name.trim().is_empty() {
        return ApiError::InvalidData("Name is required".to_string()).error_response();
    }

    let password_hash = match AuthUtils::hash_password(&user.password) {
        Ok(hash) => hash,
        Err(e) => return ApiError::InternalServerError(format!("Password hashing failed: {}", e)).error_response(),
    };

    let user = User::new(user, password_hash);
    let profile = user.to_profile();

    match state.users.create_user(user).await {
        Ok(_) => {
            log::info!("Registered {:?} account '{}'", profile.role, profile.handle);
            HttpResponse::Created().json(profile)
        },
        Err(e) => e.error_response()
    }
}

pub async fn login_user(
    state: web::Data<AppState>,
    credentials: web::Json<UserLoginReceive>
) -> impl Responder {
    let user = match state.users.authenticate(credentials.into_inner()).await {
        Ok(Some(user)) => user,
        Ok(None) => return ApiError::Unauthorized("Invalid handle or password".to_string()).error_response(),
        Err(e) => return e.error_response(),
    };

    if user.status == AccountStatus::Blocked {
        log::info!("Blocked account '{}' tried to log in", user.handle);
        return ApiError::Forbidden("Account is blocked".to_string()).error_response();
    }

    match AuthUtils::generate_access_token(&state.secret_key, &user.handle, user.role, user.status) {
        Ok(access_token) => HttpResponse::Ok().json(LoginResponse {
            access_token,
            user: user.to_profile(),
        }),
        Err(e) => e.error_response()
    }
}

async fn load_user(state: &AppState, handle: &str) -> Result<User, ApiError> {
    state.users
        .get_user_by_handle(handle)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User '{}' not found", handle)))
}

pub async fn get_me(
    state: web::Data<AppState>,
    caller: AuthUser
) -> Result<HttpResponse, ApiError> {
    let user = load_user(&state, caller.handle()).await?;
    Ok(HttpResponse::Ok().json(user.to_profile()))
}

pub async fn update_me(
    state: web::Data<AppState>,
    caller: AuthUser,
    update: web::Json<ProfileUpdate>
) -> Result<HttpResponse, ApiError> {
    let mut user = load_user(&state, caller.handle()).await?;

    if matches!(&update.name, Some(name) if name.trim().is_empty()) {
        return Err(ApiError::InvalidData("Name cannot be empty".to_string()));
    }

    user.apply_update(update.into_inner());
    state.users.update_user(user.clone()).await?;

    Ok(HttpResponse::Ok().json(user.to_profile()))
}

pub async fn list_caregivers(
    state: web::Data<AppState>,
    query: web::Query<CaregiverQuery>
) -> Result<HttpResponse, ApiError> {
    let caregivers = state.users
        .find_by_role_and_status(UserRole::Caregiver, AccountStatus::Active)
        .await?;

    let species = query.species.as_deref().map(str::trim).filter(|s| !s.is_empty());

    let profiles: Vec<UserProfile> = caregivers
        .iter()
        .filter(|caregiver| species.map_or(true, |wanted| caregiver.accepts_species(wanted)))
        .map(User::to_profile)
        .collect();

    Ok(HttpResponse::Ok().json(profiles))
}
