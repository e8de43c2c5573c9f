use actix_web::{dev::{Payload, ServiceRequest, ServiceResponse}, FromRequest, HttpMessage, HttpRequest};
use std::{rc::Rc, sync::Arc, task::{Context, Poll}};
use actix_web::Error;
use actix_service::{Service, Transform};
use futures::future::{ok, ready, LocalBoxFuture, Ready};
use serde::{Deserialize, Serialize};
use jsonwebtoken::errors::ErrorKind;

use crate::domain::{AccountStatus, UserRole};
use crate::utils::errors::ApiError;
use crate::utils::security::auth::AuthUtils;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims<T> {
    pub sub: String,
    pub exp: u64,
    pub iat: u64,
    pub data: T
}

/// Identity taken at login. Handlers that need an active account read the
/// stored status instead of `status`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessData {
    pub handle: String,
    pub role: UserRole,
    pub status: AccountStatus,
}

pub struct JwtMiddleware {
    pub secret_key: Arc<String>
}

impl<S, B> Transform<S, ServiceRequest> for JwtMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = JwtMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(JwtMiddlewareService {
            service: Rc::new(service),
            secret_key: Arc::clone(&self.secret_key)
        })
    }
}

pub struct JwtMiddlewareService<S> {
    service: Rc<S>,
    secret_key: Arc<String>
}

fn reject<R: 'static>(message: &'static str) -> LocalBoxFuture<'static, Result<R, Error>> {
    Box::pin(async move {
        Err(ApiError::Unauthorized(message.to_string()).into())
    })
}

impl<S, B> Service<ServiceRequest> for JwtMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        let auth_str = match req.headers().get("Authorization") {
            Some(header) => match header.to_str() {
                Ok(value) => value,
                Err(_) => return reject("Invalid Authorization header encoding"),
            },
            None => return reject("Authorization header missing"),
        };

        let token = match auth_str.strip_prefix("Bearer ") {
            Some(token) => token,
            None => return reject("Authorization header must start with 'Bearer '"),
        };

        if token.is_empty() {
            return reject("Empty token");
        }

        match AuthUtils::verify_token(&self.secret_key, token) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                Box::pin(service.call(req))
            },
            Err(err) => {
                let error_msg = match err.kind() {
                    ErrorKind::ExpiredSignature => "Token expired",
                    ErrorKind::InvalidSignature => "Invalid token signature",
                    ErrorKind::InvalidAlgorithm => "Invalid algorithm",
                    ErrorKind::ImmatureSignature => "Token not yet valid",
                    _ => "Invalid token",
                };
                log::debug!("Rejected bearer token: {}", err);
                reject(error_msg)
            }
        }
    }
}

/// The logged-in caller, as stored by [`JwtMiddleware`].
#[derive(Debug, Clone, PartialEq)]
pub struct AuthUser(pub AccessData);

impl AuthUser {
    pub fn handle(&self) -> &str {
        &self.0.handle
    }

    pub fn role(&self) -> UserRole {
        self.0.role
    }

    pub fn require_role(&self, role: UserRole) -> Result<(), ApiError> {
        if self.0.role == role {
            Ok(())
        } else {
            Err(ApiError::Forbidden(format!("Only {:?} accounts can do this", role)))
        }
    }
}

impl FromRequest for AuthUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user = req
            .extensions()
            .get::<Claims<AccessData>>()
            .map(|claims| AuthUser(claims.data.clone()))
            .ok_or_else(|| ApiError::Unauthorized("Login required".to_string()));
        ready(user)
    }
}

// TESTING
