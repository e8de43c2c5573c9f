use actix_web::{web, HttpResponse};
use mongodb::bson::oid::ObjectId;

use crate::api::handlers::parse_object_id;
use crate::api::state::AppState;
use crate::domain::pet::model::{Pet, PetReceive};
use crate::utils::{errors::ApiError, security::AuthUser};

/// Someone else's pet looks exactly like a missing one.
async fn owned_pet(state: &AppState, caller: &AuthUser, id: ObjectId) -> Result<Pet, ApiError> {
    state.pets
        .get_pet(id)
        .await?
        .filter(|pet| pet.owner == caller.handle())
        .ok_or_else(|| ApiError::NotFound(format!("Pet {} not found", id)))
}

pub async fn create_pet(
    state: web::Data<AppState>,
    caller: AuthUser,
    pet: web::Json<PetReceive>
) -> Result<HttpResponse, ApiError> {
    pet.validate()?;

    let mut pet = Pet::new(caller.handle(), pet.into_inner());
    pet.id = Some(state.pets.create_pet(pet.clone()).await?);

    Ok(HttpResponse::Created().json(pet))
}

pub async fn list_pets(
    state: web::Data<AppState>,
    caller: AuthUser
) -> Result<HttpResponse, ApiError> {
    let pets = state.pets.get_pets_by_owner(caller.handle()).await?;
    Ok(HttpResponse::Ok().json(pets))
}

pub async fn update_pet(
    state: web::Data<AppState>,
    caller: AuthUser,
    id: web::Path<String>,
    update: web::Json<PetReceive>
) -> Result<HttpResponse, ApiError> {
    update.validate()?;

    let mut pet = owned_pet(&state, &caller, parse_object_id(&id)?).await?;
    pet.apply(update.into_inner());
    state.pets.update_pet(pet.clone()).await?;

    Ok(HttpResponse::Ok().json(pet))
}

pub async fn delete_pet(
    state: web::Data<AppState>,
    caller: AuthUser,
    id: web::Path<String>
) -> Result<HttpResponse, ApiError> {
    let pet = owned_pet(&state, &caller, parse_object_id(&id)?).await?;

    if let Some(id) = pet.id {
        state.pets.delete_pet(id).await?;
    }

    Ok(HttpResponse::NoContent().finish())
}
