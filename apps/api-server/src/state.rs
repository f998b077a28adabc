//! Application state - shared across all handlers.

use std::sync::Arc;

use postboard_core::ports::{PasswordService, PostRepository, TokenService, UserRepository};
use postboard_infra::{
    Argon2PasswordService, InMemoryPostRepository, InMemoryUserRepository, JwtTokenService,
};

use crate::config::AppConfig;

#[cfg(feature = "postgres")]
use postboard_infra::{PostgresPostRepository, PostgresUserRepository, database};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub users: Arc<dyn UserRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
    /// Which storage backend the repositories use, reported by the health check.
    pub storage: &'static str,
}

impl AppState {
    /// Build the application state, connecting to the database when one is configured.
    pub async fn new(config: &AppConfig) -> Self {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));

        #[cfg(feature = "postgres")]
        if let Some(db_config) = &config.database {
            match database::connect(db_config).await {
                Ok(conn) => {
                    tracing::info!("Application state initialized (postgres)");
                    return Self {
                        posts: Arc::new(PostgresPostRepository::new(conn.clone())),
                        users: Arc::new(PostgresUserRepository::new(conn)),
                        tokens,
                        passwords: Arc::new(Argon2PasswordService::new()),
                        storage: "postgres",
                    };
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                }
            }
        } else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        }

        #[cfg(not(feature = "postgres"))]
        if config.database.is_some() {
            tracing::warn!("Built without postgres feature - ignoring DATABASE_URL");
        }

        tracing::info!("Application state initialized (in-memory)");
        Self::in_memory(tokens)
    }

    /// State backed by in-memory repositories.
    pub fn in_memory(tokens: Arc<dyn TokenService>) -> Self {
        Self {
            posts: Arc::new(InMemoryPostRepository::new()),
            users: Arc::new(InMemoryUserRepository::new()),
            tokens,
            passwords: Arc::new(Argon2PasswordService::new()),
            storage: "memory",
        }
    }
}
