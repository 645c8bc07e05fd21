//! Application state - shared across all handlers.

use std::sync::Arc;

use scribe_core::ports::{PasswordService, TokenService, UserRepository};
use scribe_core::services::{AuthService, PostService};
use scribe_infra::auth::{Argon2PasswordService, JwtTokenService};
use scribe_infra::database::{DatabaseConnections, PostgresPostRepository, PostgresUserRepository};

use crate::config::AppConfig;

/// Shared application state: constructed services plus the pieces the
/// extractors need directly.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub posts: Arc<PostService>,
    pub users: Arc<dyn UserRepository>,
    pub tokens: Arc<dyn TokenService>,
}

impl AppState {
    /// Connect to the database and wire up services.
    pub async fn new(config: &AppConfig) -> Result<Self, String> {
        let connections = DatabaseConnections::init(&config.database)
            .await
            .map_err(|e| format!("failed to connect to database: {e}"))?;

        let users: Arc<dyn UserRepository> =
            Arc::new(PostgresUserRepository::new(connections.main.clone()));
        let post_repo = Arc::new(PostgresPostRepository::new(connections.main.clone()));

        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::from_env());
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

        let auth = Arc::new(AuthService::new(users.clone(), passwords, tokens.clone()));
        let posts = Arc::new(PostService::new(post_repo));

        tracing::info!("Application state initialized");

        Ok(Self {
            auth,
            posts,
            users,
            tokens,
        })
    }
}
