use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{self, doc};

use crate::domain::user::model::{normalize_handle, AccountStatus, User, UserLoginReceive, UserRole};
use crate::domain::user::repository::UserRepository;
use crate::infrastructure::database::mongo_context::{MongoContext, USERS_COLLECTION};
use crate::utils::errors::ApiError;

pub struct MongoUserRepository {
    users: mongodb::Collection<User>
}

impl MongoUserRepository {
    pub fn new(context: &MongoContext) -> Self {
        Self {
            users: context.collection(USERS_COLLECTION)
        }
    }
}

fn enum_bson<T: serde::Serialize>(value: &T) -> Result<bson::Bson, ApiError> {
    Ok(bson::to_bson(value)?)
}

#[async_trait]
impl UserRepository for MongoUserRepository {

    async fn create_user(&self, user: User) -> Result<(), ApiError> {
        if user.handle.is_empty() {
            return Err(ApiError::InvalidData("Handle cannot be empty".to_string()));
        }

        if self.get_user_by_handle(&user.handle).await?.is_some() {
            return Err(ApiError::Conflict(format!("Handle '{}' is already taken", user.handle)));
        }
        self.users.insert_one(&user).await?;
        Ok(())
    }

    async fn authenticate(&self, credentials: UserLoginReceive) -> Result<Option<User>, ApiError> {
        let user = self.get_user_by_handle(&credentials.handle).await?;
        Ok(user.filter(|user| user.check_password(&credentials.password)))
    }

    async fn get_all_users(&self) -> Result<Vec<User>, ApiError> {
        let cursor = self.users.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn get_user_by_handle(&self, handle: &str) -> Result<Option<User>, ApiError> {
        Ok(self.users.find_one(doc! { "usuario": normalize_handle(handle) }).await?)
    }

    async fn find_by_role_and_status(&self, role: UserRole, status: AccountStatus) -> Result<Vec<User>, ApiError> {
        let filter = doc! { "tipo": enum_bson(&role)?, "status": enum_bson(&status)? };
        let cursor = self.users.find(filter).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn update_user(&self, user: User) -> Result<(), ApiError> {
        let filter = doc! { "usuario": &user.handle };
        let result = self.users.replace_one(filter, &user).await?;

        if result.matched_count == 0 {
            return Err(ApiError::NotFound(format!("User '{}' not found", user.handle)));
        }
        Ok(())
    }

    async fn set_status(&self, handle: &str, status: AccountStatus) -> Result<(), ApiError> {
        let filter = doc! { "usuario": normalize_handle(handle) };
        let update = doc! { "$set": { "status": enum_bson(&status)? } };
        let result = self.users.update_one(filter, update).await?;

        if result.matched_count == 0 {
            return Err(ApiError::NotFound(format!("User '{}' not found", handle)));
        }
        Ok(())
    }

    async fn delete_user(&self, handle: &str) -> Result<(), ApiError> {
        let result = self.users.delete_one(doc! { "usuario": normalize_handle(handle) }).await?;

        if result.deleted_count == 0 {
            return Err(ApiError::NotFound(format!("User '{}' not found", handle)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::model::UserRegisterReceive;
    use crate::utils::security::auth::AuthUtils;

    async fn local_repository() -> Option<MongoUserRepository> {
        match MongoContext::init("mongodb://localhost:27017", None, "pets_hub_test").await {
            Ok(context) => Some(MongoUserRepository::new(&context)),
            Err(_) => {
                println!("MongoDB not available, skipping test");
                None
            }
        }
    }

    fn caregiver(handle: &str, password: &str) -> User {
        let hash = AuthUtils::hash_password(password).unwrap();
        User::new(UserRegisterReceive {
            name: "Bia Lima".to_string(),
            handle: handle.to_string(),
            password: password.to_string(),
            address: "Rua C, 5".to_string(),
            role: UserRole::Caregiver,
            day_rate: Some(90.0),
            bio: None,
            species: None,
            sizes: None,
        }, hash)
    }

    #[tokio::test]
    async fn test_credential_gate_against_local_server() {
        let Some(repo) = local_repository().await else { return };
        let handle = format!("gate_{}", bson::oid::ObjectId::new().to_hex());

        repo.create_user(caregiver(&handle, "s3nha")).await.unwrap();

        let found = repo.authenticate(UserLoginReceive { handle: handle.clone(), password: "s3nha".to_string() }).await.unwrap();
        assert_eq!(found.map(|user| user.handle), Some(handle.clone()));

        let denied = repo.authenticate(UserLoginReceive { handle: handle.clone(), password: "errada".to_string() }).await.unwrap();
        assert!(denied.is_none());

        let duplicate = repo.create_user(caregiver(&handle, "x")).await;
        assert!(matches!(duplicate, Err(ApiError::Conflict(_))));

        repo.set_status(&handle, AccountStatus::Active).await.unwrap();
        let active = repo.find_by_role_and_status(UserRole::Caregiver, AccountStatus::Active).await.unwrap();
        assert!(active.iter().any(|user| user.handle == handle));

        repo.delete_user(&handle).await.unwrap();
        assert!(repo.get_user_by_handle(&handle).await.unwrap().is_none());
    }
}
