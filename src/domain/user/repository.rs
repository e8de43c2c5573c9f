use async_trait::async_trait;
use crate::{domain::user::model::{AccountStatus, User, UserLoginReceive, UserRole}, utils::errors::ApiError};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: User) -> Result<(), ApiError>;
    /// Credential gate: the stored user when handle and password match, `None` otherwise.
    async fn authenticate(&self, credentials: UserLoginReceive) -> Result<Option<User>, ApiError>;
    async fn get_all_users(&self) -> Result<Vec<User>, ApiError>;
    async fn get_user_by_handle(&self, handle: &str) -> Result<Option<User>, ApiError>;
    async fn find_by_role_and_status(&self, role: UserRole, status: AccountStatus) -> Result<Vec<User>, ApiError>;
    async fn update_user(&self, user: User) -> Result<(), ApiError>;
    async fn set_status(&self, handle: &str, status: AccountStatus) -> Result<(), ApiError>;
    async fn delete_user(&self, handle: &str) -> Result<(), ApiError>;
}
