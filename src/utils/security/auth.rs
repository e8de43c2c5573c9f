use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::Error as JwtError, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use bcrypt::{hash as crypt_hash, DEFAULT_COST};

use crate::domain::{AccountStatus, UserRole};
use crate::utils::errors::ApiError;
use crate::utils::security::jwt::{AccessData, Claims};

/// Lifetime of a login session.
pub const ACCESS_TOKEN_HOURS: i64 = 12;

pub struct AuthUtils;

impl AuthUtils {

    pub fn hash_password(input: &str) -> Result<String, bcrypt::BcryptError> {
        crypt_hash(input, DEFAULT_COST)
    }

    pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
        bcrypt::verify(password, hash)
    }

    pub fn generate_access_token(
        secret_key: &str,
        handle: &str,
        role: UserRole,
        status: AccountStatus,
    ) -> Result<String, ApiError> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(Duration::hours(ACCESS_TOKEN_HOURS))
            .ok_or_else(|| ApiError::InternalServerError("Token expiry out of range".to_string()))?
            .timestamp() as u64;

        let claims = Claims {
            sub: handle.to_owned(),
            exp: expiration,
            iat: now.timestamp() as u64,
            data: AccessData {
                handle: handle.to_string(),
                role,
                status,
            },
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret_key.as_ref()),
        ).map_err(|e| ApiError::InternalServerError(format!("Failed to sign access token: {}", e)))
    }

    /// HS256 only, expiry enforced.
    pub fn verify_token(secret_key: &str, token: &str) -> Result<Claims<AccessData>, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        decode::<Claims<AccessData>>(
            token,
            &DecodingKey::from_secret(secret_key.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
    }
}

// ---------------------------------------- TESTS ----------------------------------------------
