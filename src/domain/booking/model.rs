use chrono::{DateTime, NaiveDate, Utc};
use serde::{Serialize, Deserialize};
use mongodb::bson::oid::ObjectId;

use crate::domain::user::model::normalize_handle;
use crate::domain::UserRole;
use crate::utils::errors::ApiError;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BookingStatus {
    #[serde(rename = "Pendente")]
    Pending,
    #[serde(rename = "Aceito")]
    Accepted,
    #[serde(rename = "Recusado")]
    Declined,
    #[serde(rename = "Cancelado")]
    Cancelled
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Booking {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub tutor: String,
    #[serde(rename = "cuidador")]
    pub caregiver: String,
    /// Calendar day as `YYYY-MM-DD`.
    #[serde(rename = "data")]
    pub date: String,
    pub status: BookingStatus,
    #[serde(rename = "dt", with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct BookingReceive {
    #[serde(rename = "cuidador")]
    pub caregiver: String,
    #[serde(rename = "data")]
    pub date: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct BookingStatusUpdate {
    pub status: BookingStatus,
}

pub const DATE_FORMAT: &str = "%Y-%m-%d";

impl Booking {
    pub fn new(tutor: &str, receive: BookingReceive) -> Result<Self, ApiError> {
        let date = NaiveDate::parse_from_str(receive.date.trim(), DATE_FORMAT)
            .map_err(|_| ApiError::InvalidData(format!("Invalid booking date '{}', expected YYYY-MM-DD", receive.date)))?;

        Ok(Booking {
            id: None,
            tutor: tutor.to_string(),
            caregiver: normalize_handle(&receive.caregiver),
            date: date.format(DATE_FORMAT).to_string(),
            status: BookingStatus::Pending,
            created_at: Utc::now(),
        })
    }

    /// Caregivers answer pending requests; tutors cancel pending or accepted ones.
    pub fn transition(&self, role: UserRole, next: BookingStatus) -> Result<BookingStatus, ApiError> {
        use BookingStatus::*;

        let allowed = match (role, self.status, next) {
            (UserRole::Caregiver, Pending, Accepted) | (UserRole::Caregiver, Pending, Declined) => true,
            (UserRole::Tutor, Pending, Cancelled) | (UserRole::Tutor, Accepted, Cancelled) => true,
            _ => false,
        };

        if allowed {
            Ok(next)
        } else {
            Err(ApiError::Conflict(format!(
                "Booking cannot go from {:?} to {:?} as {:?}",
                self.status, next, role
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking() -> Booking {
        Booking::new("ana", BookingReceive { caregiver: "Bia".to_string(), date: "2025-03-07".to_string() }).unwrap()
    }

    #[test]
    fn test_new_booking_is_pending() {
        let booking = booking();
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.caregiver, "bia");
        assert_eq!(booking.date, "2025-03-07");
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        for date in ["07/03/2025", "2025-02-30", ""] {
            let result = Booking::new("ana", BookingReceive { caregiver: "bia".to_string(), date: date.to_string() });
            assert!(matches!(result, Err(ApiError::InvalidData(_))), "accepted {}", date);
        }
    }

    #[test]
    fn test_caregiver_answers_pending() {
        let booking = booking();
        assert_eq!(booking.transition(UserRole::Caregiver, BookingStatus::Accepted).unwrap(), BookingStatus::Accepted);
        assert_eq!(booking.transition(UserRole::Caregiver, BookingStatus::Declined).unwrap(), BookingStatus::Declined);
        assert!(booking.transition(UserRole::Caregiver, BookingStatus::Cancelled).is_err());
    }

    #[test]
    fn test_tutor_cancels_until_declined() {
        let mut booking = booking();
        assert!(booking.transition(UserRole::Tutor, BookingStatus::Cancelled).is_ok());
        assert!(booking.transition(UserRole::Tutor, BookingStatus::Accepted).is_err());

        booking.status = BookingStatus::Accepted;
        assert!(booking.transition(UserRole::Tutor, BookingStatus::Cancelled).is_ok());

        booking.status = BookingStatus::Declined;
        assert!(matches!(
            booking.transition(UserRole::Tutor, BookingStatus::Cancelled),
            Err(ApiError::Conflict(_))
        ));
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(serde_json::to_value(BookingStatus::Accepted).unwrap(), "Aceito");
        assert_eq!(serde_json::to_value(BookingStatus::Cancelled).unwrap(), "Cancelado");
    }
}
