//! Users repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::usuario::Usuario,
};

#[derive(Clone)]
pub struct UsuariosRepository {
    pool: Pool<Postgres>,
}

impl UsuariosRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Usuario> {
        sqlx::query_as::<_, Usuario>(
            "SELECT id, username, password, created_at FROM usuarios WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Usuario with id {} not found", id)))
    }

    /// Get user by username (primary authentication lookup)
    pub async fn get_by_username(&self, username: &str) -> AppResult<Option<Usuario>> {
        let usuario = sqlx::query_as::<_, Usuario>(
            "SELECT id, username, password, created_at FROM usuarios \
             WHERE LOWER(username) = LOWER($1)",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(usuario)
    }

    /// Check if username already exists
    pub async fn username_exists(&self, username: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM usuarios WHERE LOWER(username) = LOWER($1))",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Create a new user with an already-hashed password
    pub async fn create(&self, username: &str, password_hash: &str) -> AppResult<Usuario> {
        let id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO usuarios (username, password, created_at) VALUES ($1, $2, NOW()) RETURNING id",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(id).await
    }
}
