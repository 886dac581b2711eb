//! Authentication service: credential verification and JWT issuance

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::usuario::{UserClaims, Usuario},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Authenticate by username and password, returning a JWT token and
    /// the user. The same message is returned for unknown users and bad
    /// passwords.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<(String, Usuario)> {
        let usuario = self
            .repository
            .usuarios
            .get_by_username(username)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid username or password".to_string()))?;

        if !verify_password(&usuario.password, password) {
            return Err(AppError::Authentication("Invalid username or password".to_string()));
        }

        let token = self.create_token(&usuario)?;
        Ok((token, usuario))
    }

    /// Create a JWT token for the given user
    pub fn create_token(&self, usuario: &Usuario) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = UserClaims {
            sub: usuario.username.clone(),
            user_id: usuario.id,
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Fetch the user behind a set of claims
    pub async fn current_user(&self, claims: &UserClaims) -> AppResult<Usuario> {
        self.repository.usuarios.get_by_id(claims.user_id).await
    }

    /// Create an account if the username is free. Used at startup to
    /// provision the accounts configured under auth.bootstrap_users.
    pub async fn provision_user(&self, username: &str, password: &str) -> AppResult<Option<Usuario>> {
        if self.repository.usuarios.username_exists(username).await? {
            return Ok(None);
        }
        let hash = hash_password(password)?;
        let usuario = self.repository.usuarios.create(username, &hash).await?;
        Ok(Some(usuario))
    }
}

/// Hash a password with argon2 (used when provisioning accounts)
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Verify a password against a stored argon2 hash
pub fn verify_password(stored_hash: &str, password: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hash = hash_password("s3nha-forte").unwrap();
        assert!(verify_password(&hash, "s3nha-forte"));
        assert!(!verify_password(&hash, "senha-errada"));
    }

    #[test]
    fn malformed_hash_never_verifies() {
        assert!(!verify_password("not-a-phc-string", "qualquer"));
    }
}
