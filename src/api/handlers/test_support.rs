//! In-memory repositories and a wired test app for handler tests.

use std::sync::{Arc, Mutex};

use actix_web::{body::MessageBody, dev::{ServiceFactory, ServiceRequest, ServiceResponse}, test, web, App, Error};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::api::state::AppState;
use crate::domain::ai::service::{tests::ScriptedClient, AiDispatcher};
use crate::domain::booking::{model::{Booking, BookingStatus}, repository::BookingRepository};
use crate::domain::message::{model::Message, repository::MessageRepository};
use crate::domain::pet::{model::Pet, repository::PetRepository};
use crate::domain::user::model::{normalize_handle, AccountStatus, User, UserLoginReceive, UserRegisterReceive, UserRole};
use crate::domain::user::repository::UserRepository;
use crate::routes::{private_routes, public_routes};
use crate::utils::errors::ApiError;
use crate::utils::security::auth::AuthUtils;

pub const TEST_SECRET: &str = "handler_test_secret";

#[derive(Default)]
pub struct MemoryUsers(pub Mutex<Vec<User>>);

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn create_user(&self, user: User) -> Result<(), ApiError> {
        let mut users = self.0.lock().unwrap();
        if users.iter().any(|existing| existing.handle == user.handle) {
            return Err(ApiError::Conflict(format!("Handle '{}' is already taken", user.handle)));
        }
        users.push(User { id: Some(ObjectId::new()), ..user });
        Ok(())
    }

    async fn authenticate(&self, credentials: UserLoginReceive) -> Result<Option<User>, ApiError> {
        let user = self.get_user_by_handle(&credentials.handle).await?;
        Ok(user.filter(|user| user.check_password(&credentials.password)))
    }

    async fn get_all_users(&self) -> Result<Vec<User>, ApiError> {
        Ok(self.0.lock().unwrap().clone())
    }

    async fn get_user_by_handle(&self, handle: &str) -> Result<Option<User>, ApiError> {
        let handle = normalize_handle(handle);
        Ok(self.0.lock().unwrap().iter().find(|user| user.handle == handle).cloned())
    }

    async fn find_by_role_and_status(&self, role: UserRole, status: AccountStatus) -> Result<Vec<User>, ApiError> {
        Ok(self.0.lock().unwrap().iter().filter(|u| u.role == role && u.status == status).cloned().collect())
    }

    async fn update_user(&self, user: User) -> Result<(), ApiError> {
        let mut users = self.0.lock().unwrap();
        let slot = users.iter_mut().find(|u| u.handle == user.handle)
            .ok_or_else(|| ApiError::NotFound(format!("User '{}' not found", user.handle)))?;
        *slot = user;
        Ok(())
    }

    async fn set_status(&self, handle: &str, status: AccountStatus) -> Result<(), ApiError> {
        let handle = normalize_handle(handle);
        let mut users = self.0.lock().unwrap();
        let slot = users.iter_mut().find(|u| u.handle == handle)
            .ok_or_else(|| ApiError::NotFound(format!("User '{}' not found", handle)))?;
        slot.status = status;
        Ok(())
    }

    async fn delete_user(&self, handle: &str) -> Result<(), ApiError> {
        let handle = normalize_handle(handle);
        let mut users = self.0.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.handle != handle);
        if users.len() == before {
            return Err(ApiError::NotFound(format!("User '{}' not found", handle)));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryPets(pub Mutex<Vec<Pet>>);

#[async_trait]
impl PetRepository for MemoryPets {
    async fn create_pet(&self, pet: Pet) -> Result<ObjectId, ApiError> {
        let id = ObjectId::new();
        self.0.lock().unwrap().push(Pet { id: Some(id), ..pet });
        Ok(id)
    }

    async fn get_pet(&self, id: ObjectId) -> Result<Option<Pet>, ApiError> {
        Ok(self.0.lock().unwrap().iter().find(|p| p.id == Some(id)).cloned())
    }

    async fn get_pets_by_owner(&self, owner: &str) -> Result<Vec<Pet>, ApiError> {
        Ok(self.0.lock().unwrap().iter().filter(|p| p.owner == owner).cloned().collect())
    }

    async fn update_pet(&self, pet: Pet) -> Result<(), ApiError> {
        let mut pets = self.0.lock().unwrap();
        let slot = pets.iter_mut().find(|p| p.id == pet.id)
            .ok_or_else(|| ApiError::NotFound("Pet not found".to_string()))?;
        *slot = pet;
        Ok(())
    }

    async fn delete_pet(&self, id: ObjectId) -> Result<(), ApiError> {
        self.0.lock().unwrap().retain(|p| p.id != Some(id));
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryMessages(pub Mutex<Vec<Message>>);

#[async_trait]
impl MessageRepository for MemoryMessages {
    async fn send_message(&self, message: Message) -> Result<(), ApiError> {
        self.0.lock().unwrap().push(Message { id: Some(ObjectId::new()), ..message });
        Ok(())
    }

    async fn get_received(&self, receiver: &str) -> Result<Vec<Message>, ApiError> {
        let mut found: Vec<Message> = self.0.lock().unwrap().iter().filter(|m| m.receiver_id == receiver).cloned().collect();
        found.sort_by(|a, b| b.sent_at.cmp(&a.sent_at));
        Ok(found)
    }

    async fn get_sent(&self, sender: &str) -> Result<Vec<Message>, ApiError> {
        let mut found: Vec<Message> = self.0.lock().unwrap().iter().filter(|m| m.sender_id == sender).cloned().collect();
        found.sort_by(|a, b| b.sent_at.cmp(&a.sent_at));
        Ok(found)
    }
}

#[derive(Default)]
pub struct MemoryBookings(pub Mutex<Vec<Booking>>);

#[async_trait]
impl BookingRepository for MemoryBookings {
    async fn create_booking(&self, booking: Booking) -> Result<ObjectId, ApiError> {
        let id = ObjectId::new();
        self.0.lock().unwrap().push(Booking { id: Some(id), ..booking });
        Ok(id)
    }

    async fn get_booking(&self, id: ObjectId) -> Result<Option<Booking>, ApiError> {
        Ok(self.0.lock().unwrap().iter().find(|b| b.id == Some(id)).cloned())
    }

    async fn get_by_tutor(&self, tutor: &str) -> Result<Vec<Booking>, ApiError> {
        Ok(self.0.lock().unwrap().iter().rev().filter(|b| b.tutor == tutor).cloned().collect())
    }

    async fn get_by_caregiver(&self, caregiver: &str) -> Result<Vec<Booking>, ApiError> {
        Ok(self.0.lock().unwrap().iter().rev().filter(|b| b.caregiver == caregiver).cloned().collect())
    }

    async fn set_status(&self, id: ObjectId, from: BookingStatus, to: BookingStatus) -> Result<(), ApiError> {
        let mut bookings = self.0.lock().unwrap();
        let slot = bookings.iter_mut().find(|b| b.id == Some(id) && b.status == from)
            .ok_or_else(|| ApiError::Conflict(format!("Booking {} is no longer {:?}", id, from)))?;
        slot.status = to;
        Ok(())
    }
}

pub struct TestWorld {
    pub users: Arc<MemoryUsers>,
    pub pets: Arc<MemoryPets>,
    pub messages: Arc<MemoryMessages>,
    pub bookings: Arc<MemoryBookings>,
    pub ai_client: Arc<ScriptedClient>,
    pub state: AppState,
}

impl TestWorld {
    /// Every model answers with `ai_answer`, or fails when it is `None`.
    pub fn new(ai_answer: Option<&str>) -> Self {
        let ai_client = Arc::new(ScriptedClient::answering(vec![
            ("models/primary", ai_answer.ok_or(503)),
        ]));
        Self::with_client(ai_client, vec!["test-key".to_string()])
    }

    pub fn with_client(ai_client: Arc<ScriptedClient>, keys: Vec<String>) -> Self {
        let users = Arc::new(MemoryUsers::default());
        let pets = Arc::new(MemoryPets::default());
        let messages = Arc::new(MemoryMessages::default());
        let bookings = Arc::new(MemoryBookings::default());

        let ai = AiDispatcher::new(ai_client.clone(), keys, vec!["models/primary".to_string()]);

        let state = AppState {
            users: users.clone(),
            pets: pets.clone(),
            messages: messages.clone(),
            bookings: bookings.clone(),
            ai: Arc::new(ai),
            secret_key: Arc::new(TEST_SECRET.to_string()),
        };

        TestWorld { users, pets, messages, bookings, ai_client, state }
    }

    pub fn app(&self) -> App<impl ServiceFactory<ServiceRequest, Config = (), Response = ServiceResponse<impl MessageBody>, Error = Error, InitError = ()>> {
        let secret_key = self.state.secret_key.clone();
        App::new()
            .app_data(web::Data::new(self.state.clone()))
            .app_data(web::PayloadConfig::new(crate::domain::ai::photo::MAX_UPLOAD_BYTES))
            .configure(public_routes)
            .configure(move |cfg| private_routes(cfg, secret_key))
    }

    /// Stores a user directly, bypassing registration rules.
    pub fn seed(&self, handle: &str, password: &str, role: UserRole, status: AccountStatus) {
        let mut user = User::new(UserRegisterReceive {
            name: format!("{} name", handle),
            handle: handle.to_string(),
            password: password.to_string(),
            address: "Av. Paulista, 1000".to_string(),
            role,
            day_rate: None,
            bio: None,
            species: Some(vec!["Cão".to_string()]),
            sizes: None,
        }, AuthUtils::hash_password(password).unwrap());
        user.status = status;
        user.id = Some(ObjectId::new());
        self.users.0.lock().unwrap().push(user);
    }

    pub fn token(&self, handle: &str, role: UserRole, status: AccountStatus) -> String {
        AuthUtils::generate_access_token(TEST_SECRET, handle, role, status).unwrap()
    }

    pub fn bearer(&self, handle: &str, role: UserRole, status: AccountStatus) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", self.token(handle, role, status)))
    }
}

pub async fn json_body(resp: ServiceResponse<impl MessageBody>) -> serde_json::Value {
    let bytes = test::read_body(resp).await;
    serde_json::from_slice(&bytes).expect("Failed to parse JSON response")
}
