use actix_web::{web, HttpResponse};

use crate::api::handlers::active_account;
use crate::api::state::AppState;
use crate::domain::message::model::{Message, MessageReceive};
use crate::utils::{errors::ApiError, security::AuthUser};

pub async fn send_message(
    state: web::Data<AppState>,
    caller: AuthUser,
    message: web::Json<MessageReceive>
) -> Result<HttpResponse, ApiError> {
    active_account(&state, &caller).await?;

    let message = Message::new(caller.handle(), message.into_inner())?;

    if state.users.get_user_by_handle(&message.receiver_id).await?.is_none() {
        return Err(ApiError::NotFound(format!("User '{}' not found", message.receiver_id)));
    }

    state.messages.send_message(message.clone()).await?;
    log::debug!("Message from '{}' to '{}'", message.sender_id, message.receiver_id);

    Ok(HttpResponse::Created().json(message))
}

pub async fn inbox(
    state: web::Data<AppState>,
    caller: AuthUser
) -> Result<HttpResponse, ApiError> {
    let messages = state.messages.get_received(caller.handle()).await?;
    Ok(HttpResponse::Ok().json(messages))
}

pub async fn sent(
    state: web::Data<AppState>,
    caller: AuthUser
) -> Result<HttpResponse, ApiError> {
    let messages = state.messages.get_sent(caller.handle()).await?;
    Ok(HttpResponse::Ok().json(messages))
}
