use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use crate::{domain::pet::model::Pet, utils::errors::ApiError};

#[async_trait]
pub trait PetRepository: Send + Sync {
    async fn create_pet(&self, pet: Pet) -> Result<ObjectId, ApiError>;
    async fn get_pet(&self, id: ObjectId) -> Result<Option<Pet>, ApiError>;
    async fn get_pets_by_owner(&self, owner: &str) -> Result<Vec<Pet>, ApiError>;
    async fn update_pet(&self, pet: Pet) -> Result<(), ApiError>;
    async fn delete_pet(&self, id: ObjectId) -> Result<(), ApiError>;
}
