//! Registration, login, and profile management.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{NewUser, ProfilePatch, User};
use crate::error::DomainError;
use crate::ports::{AuthError, PasswordService, TokenClaims, TokenService, UserRepository};

/// A successfully authenticated user together with their access token.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

/// Orchestrates user registration, login, and profile updates.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    /// Register a new user. Fails with `Duplicate` if the email is taken.
    pub async fn register(&self, input: NewUser) -> Result<AuthSession, DomainError> {
        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(DomainError::Duplicate(
                "User with this email already exists".to_string(),
            ));
        }

        let password_hash = self
            .passwords
            .hash(&input.password)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let user = User::new(input.first_name, input.last_name, input.email, password_hash);
        let user = self.users.insert(user).await?;

        tracing::info!(user_id = %user.id, "user registered");

        let token = self.issue_token(&user)?;
        Ok(AuthSession { user, token })
    }

    /// Authenticate by email and password. Unknown email and wrong password
    /// are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, DomainError> {
        let user = self
            .users
            .find_active_by_email(email)
            .await?
            .ok_or(DomainError::InvalidCredentials)?;

        let valid = self
            .passwords
            .verify(password, &user.password_hash)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        if !valid {
            return Err(DomainError::InvalidCredentials);
        }

        let token = self.issue_token(&user)?;
        Ok(AuthSession { user, token })
    }

    pub async fn get_profile(&self, user_id: Uuid) -> Result<User, DomainError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::NotFound { entity: "user" })
    }

    /// Apply whitelisted profile fields. A supplied password is re-hashed;
    /// email and role are not changeable through this path.
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        patch: ProfilePatch,
    ) -> Result<User, DomainError> {
        let mut user = self.get_profile(user_id).await?;

        if let Some(first_name) = patch.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            user.last_name = last_name;
        }
        if let Some(bio) = patch.bio {
            user.bio = Some(bio);
        }
        if let Some(profile_image) = patch.profile_image {
            user.profile_image = Some(profile_image);
        }
        if let Some(password) = patch.password {
            user.password_hash = self
                .passwords
                .hash(&password)
                .map_err(|e| DomainError::Internal(e.to_string()))?;
        }
        user.updated_at = Utc::now();

        Ok(self.users.update(user).await?)
    }

    /// Validate a token and return its claims.
    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        self.tokens.validate_token(token)
    }

    fn issue_token(&self, user: &User) -> Result<String, DomainError> {
        self.tokens
            .generate_token(user.id, &user.email, user.role)
            .map_err(|e| DomainError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;
    use crate::error::RepoError;
    use crate::ports::BaseRepository;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory user store backing the service tests.
    #[derive(Default)]
    struct MemoryUsers {
        rows: Mutex<HashMap<Uuid, User>>,
    }

    #[async_trait]
    impl BaseRepository<User, Uuid> for MemoryUsers {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
            Ok(self.rows.lock().unwrap().get(&id).cloned())
        }

        async fn insert(&self, user: User) -> Result<User, RepoError> {
            let mut rows = self.rows.lock().unwrap();
            if rows.values().any(|u| u.email == user.email) {
                return Err(RepoError::Constraint("unique email".to_string()));
            }
            rows.insert(user.id, user.clone());
            Ok(user)
        }

        async fn update(&self, user: User) -> Result<User, RepoError> {
            let mut rows = self.rows.lock().unwrap();
            if !rows.contains_key(&user.id) {
                return Err(RepoError::NotFound);
            }
            rows.insert(user.id, user.clone());
            Ok(user)
        }

        async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
            self.rows
                .lock()
                .unwrap()
                .remove(&id)
                .map(|_| ())
                .ok_or(RepoError::NotFound)
        }
    }

    #[async_trait]
    impl UserRepository for MemoryUsers {
        async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .find(|u| u.email == email)
                .cloned())
        }

        async fn find_active_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .find(|u| u.email == email && u.is_active)
                .cloned())
        }
    }

    /// Reversible stand-in for the one-way hash.
    struct PlainHasher;

    impl PasswordService for PlainHasher {
        fn hash(&self, password: &str) -> Result<String, AuthError> {
            Ok(format!("hashed:{password}"))
        }

        fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
            Ok(hash == format!("hashed:{password}"))
        }
    }

    struct StaticTokens;

    impl TokenService for StaticTokens {
        fn generate_token(
            &self,
            user_id: Uuid,
            email: &str,
            _role: UserRole,
        ) -> Result<String, AuthError> {
            Ok(format!("token:{user_id}:{email}"))
        }

        fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
            let mut parts = token.splitn(3, ':');
            if parts.next() != Some("token") {
                return Err(AuthError::InvalidToken("bad prefix".to_string()));
            }
            let user_id = parts
                .next()
                .and_then(|s| Uuid::parse_str(s).ok())
                .ok_or_else(|| AuthError::InvalidToken("bad id".to_string()))?;
            Ok(TokenClaims {
                user_id,
                email: parts.next().unwrap_or_default().to_string(),
                role: UserRole::User,
                exp: 0,
            })
        }

        fn expiration_seconds(&self) -> i64 {
            3600
        }
    }

    fn service() -> AuthService {
        AuthService::new(
            Arc::new(MemoryUsers::default()),
            Arc::new(PlainHasher),
            Arc::new(StaticTokens),
        )
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: email.to_string(),
            password: "Sup3rSecret".to_string(),
        }
    }

    #[tokio::test]
    async fn register_then_login_roundtrip() {
        let svc = service();
        let session = svc.register(new_user("ada@example.com")).await.unwrap();
        assert_eq!(session.user.role, UserRole::User);
        assert!(session.user.is_active);
        assert_eq!(session.user.password_hash, "hashed:Sup3rSecret");

        let login = svc.login("ada@example.com", "Sup3rSecret").await.unwrap();
        assert_eq!(login.user.id, session.user.id);
        assert!(!login.token.is_empty());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let svc = service();
        svc.register(new_user("ada@example.com")).await.unwrap();

        let err = svc.register(new_user("ada@example.com")).await.unwrap_err();
        assert!(matches!(err, DomainError::Duplicate(_)));
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() {
        let svc = service();
        svc.register(new_user("ada@example.com")).await.unwrap();

        let wrong_password = svc
            .login("ada@example.com", "not-the-password")
            .await
            .unwrap_err();
        let unknown_email = svc
            .login("nobody@example.com", "Sup3rSecret")
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, DomainError::InvalidCredentials));
        assert!(matches!(unknown_email, DomainError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn inactive_user_cannot_login() {
        let users = Arc::new(MemoryUsers::default());
        let svc = AuthService::new(users.clone(), Arc::new(PlainHasher), Arc::new(StaticTokens));

        let session = svc.register(new_user("ada@example.com")).await.unwrap();
        let mut user = session.user;
        user.is_active = false;
        users.update(user).await.unwrap();

        let err = svc.login("ada@example.com", "Sup3rSecret").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn update_profile_applies_whitelist_and_rehashes_password() {
        let svc = service();
        let session = svc.register(new_user("ada@example.com")).await.unwrap();

        let patch = ProfilePatch {
            bio: Some("Analyst and programmer".to_string()),
            password: Some("NewPassw0rd".to_string()),
            ..Default::default()
        };
        let updated = svc.update_profile(session.user.id, patch).await.unwrap();

        assert_eq!(updated.bio.as_deref(), Some("Analyst and programmer"));
        assert_eq!(updated.email, "ada@example.com");
        assert_eq!(updated.password_hash, "hashed:NewPassw0rd");

        svc.login("ada@example.com", "NewPassw0rd").await.unwrap();
    }

    #[tokio::test]
    async fn profile_of_unknown_user_is_not_found() {
        let svc = service();
        let err = svc.get_profile(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "user" }));
    }
}
