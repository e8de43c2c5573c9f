use actix_web::{web, HttpResponse};

use crate::api::state::AppState;
use crate::domain::ai::{
    model::{parse_clinic_listings, AiAnswer, ClinicQuery, ClinicSearchResult},
    photo::prepare_photo,
    prompts,
};
use crate::utils::{errors::ApiError, security::AuthUser};

pub async fn daily_tips(
    state: web::Data<AppState>,
    _caller: AuthUser
) -> HttpResponse {
    let texto = state.ai.ask(prompts::DAILY_TIPS, None).await;
    HttpResponse::Ok().json(AiAnswer { texto })
}

/// Body is the raw photo, as sent by a phone camera.
pub async fn body_scan(
    state: web::Data<AppState>,
    _caller: AuthUser,
    body: web::Bytes
) -> Result<HttpResponse, ApiError> {
    let photo = web::block(move || prepare_photo(&body))
        .await
        .map_err(|e| ApiError::InternalServerError(format!("Image worker failed: {}", e)))??;

    let texto = state.ai.ask(prompts::BODY_SCAN, Some(&photo)).await;
    Ok(HttpResponse::Ok().json(AiAnswer { texto }))
}

pub async fn find_clinics(
    state: web::Data<AppState>,
    caller: AuthUser,
    query: web::Query<ClinicQuery>
) -> Result<HttpResponse, ApiError> {
    let search = query.busca.trim();
    if search.is_empty() {
        return Err(ApiError::BadRequest("Query parameter 'busca' is required".to_string()));
    }

    let user = state.users
        .get_user_by_handle(caller.handle())
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User '{}' not found", caller.handle())))?;

    if user.address.trim().is_empty() {
        return Err(ApiError::BadRequest("Add an address to your profile to search nearby".to_string()));
    }

    let texto = state.ai.ask(&prompts::clinic_search(search, &user.address), None).await;
    let locais = parse_clinic_listings(&texto);

    Ok(HttpResponse::Ok().json(ClinicSearchResult { locais, texto }))
}
