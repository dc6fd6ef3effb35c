use std::sync::Arc;
use tracing::{info, warn};

use crate::auth::token::TokenService;
use crate::db::{PublicUser, Store, User};
use crate::error::{AppError, AuthError, DatabaseError};
use crate::Result;

pub struct AuthService {
    store: Arc<dyn Store>,
    tokens: TokenService,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(store: Arc<dyn Store>, tokens: TokenService, bcrypt_cost: u32) -> Self {
        Self {
            store,
            tokens,
            bcrypt_cost,
        }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Creates a user with a bcrypt-hashed password.
    ///
    /// Blank fields and already registered emails are validation errors.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<PublicUser> {
        if [name, email, password].iter().any(|f| f.trim().is_empty()) {
            return Err(AppError::ValidationError("name, email and password are required".into()));
        }

        if self.store.get_user_by_email(email).await?.is_some() {
            return Err(AppError::ValidationError("Email already registered".into()));
        }

        let password_hash = hash_password(password.to_owned(), self.bcrypt_cost).await?;
        let user = User::new(name.to_owned(), email.to_owned(), password_hash);

        // A concurrent registration can still win the race on the unique index
        let user = match self.store.create_user(&user).await {
            Ok(user) => user,
            Err(AppError::DatabaseError(DatabaseError::Duplicate)) => {
                return Err(AppError::ValidationError("Email already registered".into()));
            }
            Err(e) => return Err(e),
        };

        info!(user_id = %user.id, "User registered");
        Ok(user.into())
    }

    /// Checks credentials and returns a freshly signed session token.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<String> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AppError::ValidationError("email and password are required".into()));
        }

        let user = self
            .store
            .get_user_by_email(email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !verify_password(password.to_owned(), user.password.clone()).await? {
            warn!(user_id = %user.id, "Password mismatch");
            return Err(AuthError::InvalidCredentials.into());
        }

        self.tokens.issue(&user)
    }
}

// Hashing runs on the blocking pool
async fn hash_password(password: String, cost: u32) -> Result<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await?
        .map_err(|e| AppError::InternalError(format!("password hashing failed: {}", e)))
}

async fn verify_password(password: String, hash: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await?
        .map_err(|e| AppError::InternalError(format!("password verification failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MemoryStore, MockStore};

    const COST: u32 = 4;

    fn service(store: Arc<dyn Store>) -> AuthService {
        AuthService::new(store, TokenService::new("test_secret", 24), COST)
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let store = Arc::new(MemoryStore::new());
        let auth = service(store.clone());

        let user = auth.register("Ana", "ana@example.com", "s3nh4").await.unwrap();
        assert_eq!(user.email, "ana@example.com");

        let stored = store.get_user_by_email("ana@example.com").await.unwrap().unwrap();
        assert_ne!(stored.password, "s3nh4");
        assert!(bcrypt::verify("s3nh4", &stored.password).unwrap());
    }

    #[tokio::test]
    async fn test_register_rejects_blank_fields() {
        let store = Arc::new(MemoryStore::new());
        let auth = service(store.clone());

        let err = auth.register("Ana", "", "s3nh4").await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert_eq!(store.user_count().await, 0);
    }

    #[tokio::test]
    async fn test_register_race_on_unique_index_is_a_validation_error() {
        let mut store = MockStore::new();
        store.expect_get_user_by_email().returning(|_| Ok(None));
        store
            .expect_create_user()
            .times(1)
            .returning(|_| Err(AppError::DatabaseError(DatabaseError::Duplicate)));

        let auth = service(Arc::new(store));
        let err = auth.register("Ana", "ana@example.com", "s3nh4").await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_authenticate_outcomes() {
        let store = Arc::new(MemoryStore::new());
        let auth = service(store);
        let user = auth.register("Ana", "ana@example.com", "s3nh4").await.unwrap();

        let token = auth.authenticate("ana@example.com", "s3nh4").await.unwrap();
        let claims = auth.tokens().verify(&token).unwrap();
        assert_eq!(claims.user_id().unwrap(), user.id);

        let err = auth.authenticate("ana@example.com", "errada").await.unwrap_err();
        assert!(matches!(err, AppError::AuthError(AuthError::InvalidCredentials)));

        let err = auth.authenticate("ninguem@example.com", "s3nh4").await.unwrap_err();
        assert!(matches!(err, AppError::AuthError(AuthError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut store = MockStore::new();
        store
            .expect_get_user_by_email()
            .returning(|_| Err(AppError::DatabaseError(DatabaseError::ConnectionError("down".into()))));

        let auth = service(Arc::new(store));
        let err = auth.authenticate("ana@example.com", "s3nh4").await.unwrap_err();
        assert!(matches!(err, AppError::DatabaseError(DatabaseError::ConnectionError(_))));
    }
}
