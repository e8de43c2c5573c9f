use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{self, doc, oid::ObjectId};

use crate::domain::booking::{model::{Booking, BookingStatus}, repository::BookingRepository};
use crate::infrastructure::database::mongo_context::{MongoContext, BOOKINGS_COLLECTION};
use crate::utils::errors::ApiError;

pub struct MongoBookingRepository {
    bookings: mongodb::Collection<Booking>
}

impl MongoBookingRepository {
    pub fn new(context: &MongoContext) -> Self {
        Self {
            bookings: context.collection(BOOKINGS_COLLECTION)
        }
    }
}

#[async_trait]
impl BookingRepository for MongoBookingRepository {

    async fn create_booking(&self, booking: Booking) -> Result<ObjectId, ApiError> {
        let result = self.bookings.insert_one(&booking).await?;
        result.inserted_id
            .as_object_id()
            .ok_or_else(|| ApiError::InternalServerError("Inserted booking has no ObjectId".to_string()))
    }

    async fn get_booking(&self, id: ObjectId) -> Result<Option<Booking>, ApiError> {
        Ok(self.bookings.find_one(doc! { "_id": id }).await?)
    }

    async fn get_by_tutor(&self, tutor: &str) -> Result<Vec<Booking>, ApiError> {
        let cursor = self.bookings.find(doc! { "tutor": tutor }).sort(doc! { "dt": -1 }).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn get_by_caregiver(&self, caregiver: &str) -> Result<Vec<Booking>, ApiError> {
        let cursor = self.bookings.find(doc! { "cuidador": caregiver }).sort(doc! { "dt": -1 }).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn set_status(&self, id: ObjectId, from: BookingStatus, to: BookingStatus) -> Result<(), ApiError> {
        let filter = doc! { "_id": id, "status": bson::to_bson(&from)? };
        let update = doc! { "$set": { "status": bson::to_bson(&to)? } };
        let result = self.bookings.update_one(filter, update).await?;

        if result.matched_count == 0 {
            return Err(ApiError::Conflict(format!("Booking {} is no longer {:?}", id, from)));
        }
        Ok(())
    }
}
