pub mod ai;
pub mod booking;
pub mod message;
pub mod pet;
pub mod user;

pub use user::model::{AccountStatus, UserRole};
