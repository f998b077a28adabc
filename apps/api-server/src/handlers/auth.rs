//! Authentication handlers.

use actix_web::{HttpResponse, web};

use postboard_core::domain::User;
use postboard_core::error::RepoError;
use postboard_core::ports::AuthError;
use postboard_shared::dto::{AuthResponse, LoginRequest, RegisterUserRequest, UserResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn token_response(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let issue_failed = |e: AuthError| AppError::Internal(e.to_string());
    let access_token = state
        .tokens
        .generate_token(user.id, &user.username)
        .map_err(issue_failed)?;
    let expires_in = state.tokens.expiration_seconds().map_err(issue_failed)?;

    Ok(AuthResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: u64::try_from(expires_in).unwrap_or_default(),
    })
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let username = req.username.trim().to_string();

    User::validate_registration(&username, &req.password)?;

    if state.users.find_by_username(&username).await?.is_some() {
        return Err(AppError::Conflict("Username already registered".to_string()));
    }

    let password_hash = state.passwords.hash(&req.password)?;

    let user = state
        .users
        .insert(User::new(username, password_hash))
        .await
        .map_err(|e| match e {
            // lost a race with a concurrent registration
            RepoError::Constraint(_) => {
                AppError::Conflict("Username already registered".to_string())
            }
            other => other.into(),
        })?;

    tracing::info!(user_id = %user.id, username = %user.username, "User registered");

    Ok(HttpResponse::Created().json(token_response(&state, &user)?))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .users
        .find_by_username(req.username.trim())
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if !state.passwords.verify(&req.password, &user.password_hash)? {
        tracing::debug!(username = %user.username, "Rejected login with wrong password");
        return Err(AuthError::InvalidCredentials.into());
    }

    Ok(HttpResponse::Ok().json(token_response(&state, &user)?))
}

/// GET /api/auth/me - Protected route
pub async fn me(identity: Identity) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(UserResponse {
        id: identity.user_id.to_string(),
        username: identity.username,
    }))
}
