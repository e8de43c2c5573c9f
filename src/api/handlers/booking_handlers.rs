use actix_web::{web, HttpResponse};

use crate::api::handlers::{active_account, parse_object_id};
use crate::api::state::AppState;
use crate::domain::booking::model::{Booking, BookingReceive, BookingStatusUpdate};
use crate::domain::user::model::UserRole;
use crate::utils::{errors::ApiError, security::AuthUser};

pub async fn create_booking(
    state: web::Data<AppState>,
    caller: AuthUser,
    booking: web::Json<BookingReceive>
) -> Result<HttpResponse, ApiError> {
    caller.require_role(UserRole::Tutor)?;
    active_account(&state, &caller).await?;

    let mut booking = Booking::new(caller.handle(), booking.into_inner())?;

    let caregiver = state.users
        .get_user_by_handle(&booking.caregiver)
        .await?
        .filter(|user| user.role == UserRole::Caregiver)
        .ok_or_else(|| ApiError::NotFound(format!("Caregiver '{}' not found", booking.caregiver)))?;

    if !caregiver.is_active() {
        return Err(ApiError::Conflict(format!("Caregiver '{}' is not accepting bookings", caregiver.handle)));
    }

    booking.id = Some(state.bookings.create_booking(booking.clone()).await?);
    log::info!("'{}' booked '{}' for {}", booking.tutor, booking.caregiver, booking.date);

    Ok(HttpResponse::Created().json(booking))
}

pub async fn list_bookings(
    state: web::Data<AppState>,
    caller: AuthUser
) -> Result<HttpResponse, ApiError> {
    let bookings = match caller.role() {
        UserRole::Tutor => state.bookings.get_by_tutor(caller.handle()).await?,
        UserRole::Caregiver => state.bookings.get_by_caregiver(caller.handle()).await?,
        UserRole::Admin => return Err(ApiError::Forbidden("Admins have no bookings".to_string())),
    };

    Ok(HttpResponse::Ok().json(bookings))
}

pub async fn update_booking_status(
    state: web::Data<AppState>,
    caller: AuthUser,
    id: web::Path<String>,
    update: web::Json<BookingStatusUpdate>
) -> Result<HttpResponse, ApiError> {
    let id = parse_object_id(&id)?;
    let not_found = || ApiError::NotFound(format!("Booking {} not found", id));

    let mut booking = state.bookings.get_booking(id).await?.ok_or_else(not_found)?;

    let is_party = match caller.role() {
        UserRole::Tutor => booking.tutor == caller.handle(),
        UserRole::Caregiver => booking.caregiver == caller.handle(),
        UserRole::Admin => false,
    };
    if !is_party {
        return Err(not_found());
    }
    active_account(&state, &caller).await?;

    let next = booking.transition(caller.role(), update.status)?;
    state.bookings.set_status(id, booking.status, next).await?;
    booking.status = next;

    Ok(HttpResponse::Ok().json(booking))
}
