pub mod auth;
pub mod jwt;

pub use auth::AuthUtils;
pub use jwt::{AccessData, AuthUser, Claims, JwtMiddleware};
