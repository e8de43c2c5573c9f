use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};

use crate::domain::pet::{model::Pet, repository::PetRepository};
use crate::infrastructure::database::mongo_context::{MongoContext, PETS_COLLECTION};
use crate::utils::errors::ApiError;

pub struct MongoPetRepository {
    pets: mongodb::Collection<Pet>
}

impl MongoPetRepository {
    pub fn new(context: &MongoContext) -> Self {
        Self {
            pets: context.collection(PETS_COLLECTION)
        }
    }
}

#[async_trait]
impl PetRepository for MongoPetRepository {

    async fn create_pet(&self, pet: Pet) -> Result<ObjectId, ApiError> {
        let result = self.pets.insert_one(&pet).await?;
        result.inserted_id
            .as_object_id()
            .ok_or_else(|| ApiError::InternalServerError("Inserted pet has no ObjectId".to_string()))
    }

    async fn get_pet(&self, id: ObjectId) -> Result<Option<Pet>, ApiError> {
        Ok(self.pets.find_one(doc! { "_id": id }).await?)
    }

    async fn get_pets_by_owner(&self, owner: &str) -> Result<Vec<Pet>, ApiError> {
        let cursor = self.pets.find(doc! { "dono": owner }).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn update_pet(&self, pet: Pet) -> Result<(), ApiError> {
        let id = pet.id.ok_or_else(|| ApiError::InvalidData("Pet has no id".to_string()))?;
        let result = self.pets.replace_one(doc! { "_id": id }, &pet).await?;

        if result.matched_count == 0 {
            return Err(ApiError::NotFound(format!("Pet {} not found", id)));
        }
        Ok(())
    }

    async fn delete_pet(&self, id: ObjectId) -> Result<(), ApiError> {
        let result = self.pets.delete_one(doc! { "_id": id }).await?;

        if result.deleted_count == 0 {
            return Err(ApiError::NotFound(format!("Pet {} not found", id)));
        }
        Ok(())
    }
}
