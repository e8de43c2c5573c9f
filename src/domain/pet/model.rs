use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use mongodb::bson::oid::ObjectId;

use crate::utils::errors::ApiError;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Pet {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(rename = "dono")]
    pub owner: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "especie")]
    pub species: String,
    #[serde(rename = "raca", default, skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    #[serde(rename = "nascimento", default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(rename = "dt", with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PetReceive {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "especie")]
    pub species: String,
    #[serde(rename = "raca", default)]
    pub breed: Option<String>,
    #[serde(rename = "nascimento", default)]
    pub birth_date: Option<String>,
}

impl PetReceive {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::InvalidData("Pet name cannot be empty".to_string()));
        }
        if self.species.trim().is_empty() {
            return Err(ApiError::InvalidData("Pet species cannot be empty".to_string()));
        }
        Ok(())
    }
}

impl Pet {
    pub fn new(owner: &str, receive: PetReceive) -> Self {
        Pet {
            id: None,
            owner: owner.to_string(),
            name: receive.name.trim().to_string(),
            species: receive.species.trim().to_string(),
            breed: receive.breed,
            birth_date: receive.birth_date,
            created_at: Utc::now(),
        }
    }

    pub fn apply(&mut self, receive: PetReceive) {
        self.name = receive.name.trim().to_string();
        self.species = receive.species.trim().to_string();
        self.breed = receive.breed;
        self.birth_date = receive.birth_date;
    }
}
