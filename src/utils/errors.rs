use std::error::Error;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use mongodb::{bson, error::Error as MongoError};
use thiserror::Error;
use bson::ser::Error as BsonError;
use bson::de::Error as BsonDeError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    MongoError(#[from] MongoError),

    #[error("Serialization error")]
    SerializationError(#[from] BsonError),

    #[error("Deserialization error")]
    DeserializationError(#[from] BsonDeError)
}

fn message_body(message: &str, status: StatusCode) -> serde_json::Value {
    serde_json::json!({
        "error": message,
        "code": status.as_u16()
    })
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::BadRequest(_) | ApiError::InvalidData(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_) | ApiError::MongoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::SerializationError(_) | ApiError::DeserializationError(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = match self {
            ApiError::Conflict(message)
            | ApiError::BadRequest(message)
            | ApiError::Unauthorized(message)
            | ApiError::Forbidden(message)
            | ApiError::InternalServerError(message)
            | ApiError::InvalidData(message)
            | ApiError::NotFound(message) => message_body(message, status),
            ApiError::MongoError(error) => {
                log::error!("Database error: {}", error);
                serde_json::json!({
                    "error": format!("Database error: {}", error),
                    "code": status.as_u16(),
                    "details": error.source().map(|src| src.to_string())
                })
            },
            ApiError::SerializationError(error) => serde_json::json!({
                "error": "Invalid data format",
                "code": status.as_u16(),
                "details": error.source().map(|src| src.to_string())
            }),
            ApiError::DeserializationError(error) => serde_json::json!({
                "error": "Invalid data format",
                "code": status.as_u16(),
                "details": error.source().map(|src| src.to_string())
            }),
        };

        HttpResponse::build(status).json(body)
    }
}

// ----------------------------- TESTS --------------------------------
