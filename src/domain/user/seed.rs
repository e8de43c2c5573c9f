use crate::domain::user::model::{User, UserRegisterReceive, UserRole};
use crate::domain::user::repository::UserRepository;
use crate::utils::{errors::ApiError, security::AuthUtils};

/// Creates the admin account on first start. Returns `false` when the handle
/// already exists; an existing account is never touched.
pub async fn ensure_admin(users: &dyn UserRepository, handle: &str, password: &str) -> Result<bool, ApiError> {
    if users.get_user_by_handle(handle).await?.is_some() {
        return Ok(false);
    }

    let password_hash = AuthUtils::hash_password(password)
        .map_err(|e| ApiError::InternalServerError(format!("Password hashing failed: {}", e)))?;

    let admin = User::new(UserRegisterReceive {
        name: "Administrador".to_string(),
        handle: handle.to_string(),
        password: password.to_string(),
        address: String::new(),
        role: UserRole::Admin,
        day_rate: None,
        bio: None,
        species: None,
        sizes: None,
    }, password_hash);

    users.create_user(admin).await?;
    Ok(true)
}
