//! Authentication extractors.

use std::future::{Future, Ready, ready};
use std::pin::Pin;

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use uuid::Uuid;

use postboard_core::domain::{Actor, Principal};
use postboard_core::ports::{AuthError, TokenClaims};
use postboard_shared::ErrorResponse;

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Authenticated user identity extractor.
///
/// Rejects the request with 401 when no valid bearer token is present:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, {}!", identity.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub username: String,
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.username,
        }
    }
}

impl From<Identity> for Actor {
    fn from(identity: Identity) -> Self {
        Self {
            user_id: identity.user_id,
            username: identity.username,
        }
    }
}

/// Error type for authentication failures.
#[derive(Debug)]
pub struct AuthenticationError(pub AuthError);

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl actix_web::ResponseError for AuthenticationError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match &self.0 {
            AuthError::HashingError(_) | AuthError::LifetimeOutOfRange(_) => {
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => actix_web::http::StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        let error = match &self.0 {
            AuthError::TokenExpired => ErrorResponse::new(401, "Token Expired")
                .with_detail("Your authentication token has expired. Please login again."),
            AuthError::InvalidToken(msg) => {
                ErrorResponse::new(401, "Invalid Token").with_detail(msg.clone())
            }
            AuthError::MissingAuth => ErrorResponse::new(401, "Authentication Required")
                .with_detail("Please provide a valid Bearer token in the Authorization header."),
            AuthError::InvalidCredentials => ErrorResponse::unauthorized(),
            AuthError::HashingError(_) | AuthError::LifetimeOutOfRange(_) => {
                ErrorResponse::internal_error()
            }
        };

        actix_web::HttpResponse::build(self.status_code()).json(error)
    }
}

fn authenticate(req: &HttpRequest) -> Result<Identity, AuthError> {
    let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
        tracing::error!("AppState not found in app data");
        AuthError::InvalidToken("Server configuration error".to_string())
    })?;

    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?;

    let token = auth_header
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))?;

    state.tokens.validate_token(token).map(Identity::from)
}

impl FromRequest for Identity {
    type Error = AuthenticationError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).map_err(AuthenticationError))
    }
}

/// Optional identity extractor - never fails for credential problems.
///
/// A missing or invalid token, or one whose user is no longer stored, yields
/// an anonymous principal. The stored username wins over the token's.
pub struct OptionalIdentity(pub Option<Identity>);

impl OptionalIdentity {
    pub fn into_principal(self) -> Principal {
        Principal::from(self.0.map(Actor::from))
    }
}

impl FromRequest for OptionalIdentity {
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claimed = match authenticate(req) {
            Ok(identity) => Some(identity),
            Err(AuthError::MissingAuth) => None,
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring unusable credentials");
                None
            }
        };
        let state = req.app_data::<web::Data<AppState>>().cloned();

        Box::pin(async move {
            let (Some(claimed), Some(state)) = (claimed, state) else {
                return Ok(OptionalIdentity(None));
            };

            let stored = state
                .users
                .find_by_id(claimed.user_id)
                .await
                .map_err(AppError::from)?;

            match stored {
                Some(user) => Ok(OptionalIdentity(Some(Identity {
                    user_id: user.id,
                    username: user.username,
                }))),
                None => {
                    tracing::debug!(user_id = %claimed.user_id, "Token subject no longer exists");
                    Ok(OptionalIdentity(None))
                }
            }
        })
    }
}
