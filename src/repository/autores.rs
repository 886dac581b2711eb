//! Authors repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::autor::{Autor, AutorPayload, AutorQuery},
};

#[derive(Clone)]
pub struct AutoresRepository {
    pool: Pool<Postgres>,
}

impl AutoresRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get author by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Autor> {
        sqlx::query_as::<_, Autor>(
            "SELECT id, nome, created_at, updated_at FROM autores WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Autor with id {} not found", id)))
    }

    /// Check whether an author exists
    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM autores WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// List authors with optional name filter and pagination
    pub async fn search(&self, query: &AutorQuery) -> AppResult<(Vec<Autor>, i64)> {
        let (page, per_page) = query.pagination();
        let offset = (page - 1) * per_page;

        let (total, autores) = if let Some(ref nome) = query.nome {
            let pattern = format!("%{}%", super::escape_like(nome));
            let total: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM autores WHERE nome ILIKE $1")
                    .bind(&pattern)
                    .fetch_one(&self.pool)
                    .await?;
            let autores = sqlx::query_as::<_, Autor>(
                "SELECT id, nome, created_at, updated_at FROM autores \
                 WHERE nome ILIKE $1 ORDER BY nome LIMIT $2 OFFSET $3",
            )
            .bind(&pattern)
            .bind(per_page)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
            (total, autores)
        } else {
            let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM autores")
                .fetch_one(&self.pool)
                .await?;
            let autores = sqlx::query_as::<_, Autor>(
                "SELECT id, nome, created_at, updated_at FROM autores \
                 ORDER BY nome LIMIT $1 OFFSET $2",
            )
            .bind(per_page)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
            (total, autores)
        };

        Ok((autores, total))
    }

    /// Create a new author
    pub async fn create(&self, payload: &AutorPayload) -> AppResult<Autor> {
        let now = Utc::now();
        let id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO autores (nome, created_at, updated_at) VALUES ($1, $2, $2) RETURNING id",
        )
        .bind(&payload.nome)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Update an existing author (full replacement)
    pub async fn update(&self, id: i32, payload: &AutorPayload) -> AppResult<Autor> {
        let result = sqlx::query("UPDATE autores SET nome = $1, updated_at = $2 WHERE id = $3")
            .bind(&payload.nome)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Autor with id {} not found", id)));
        }

        self.get_by_id(id).await
    }

    /// Delete an author. Refuses while books still reference it.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let referenced: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM livros WHERE autor_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        if referenced > 0 {
            return Err(AppError::Conflict(format!(
                "Autor with id {} is referenced by {} livro(s)",
                id, referenced
            )));
        }

        let result = sqlx::query("DELETE FROM autores WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Autor with id {} not found", id)));
        }

        Ok(())
    }
}
