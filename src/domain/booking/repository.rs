use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use crate::{domain::booking::model::{Booking, BookingStatus}, utils::errors::ApiError};

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create_booking(&self, booking: Booking) -> Result<ObjectId, ApiError>;
    async fn get_booking(&self, id: ObjectId) -> Result<Option<Booking>, ApiError>;
    async fn get_by_tutor(&self, tutor: &str) -> Result<Vec<Booking>, ApiError>;
    async fn get_by_caregiver(&self, caregiver: &str) -> Result<Vec<Booking>, ApiError>;
    /// Moves `id` from `from` to `to`; `Conflict` when the stored status is no longer `from`.
    async fn set_status(&self, id: ObjectId, from: BookingStatus, to: BookingStatus) -> Result<(), ApiError>;
}
