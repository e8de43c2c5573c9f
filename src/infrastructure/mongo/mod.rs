pub mod booking_repository;
pub mod message_repository;
pub mod pet_repository;
pub mod user_repository;
