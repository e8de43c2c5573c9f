use std::sync::Arc;

use crate::domain::ai::service::AiDispatcher;
use crate::domain::booking::repository::BookingRepository;
use crate::domain::message::repository::MessageRepository;
use crate::domain::pet::repository::PetRepository;
use crate::domain::user::repository::UserRepository;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub pets: Arc<dyn PetRepository>,
    pub messages: Arc<dyn MessageRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub ai: Arc<AiDispatcher>,
    pub secret_key: Arc<String>,
}
