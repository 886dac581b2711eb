//! Categories repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::categoria::{Categoria, CategoriaPayload, CategoriaQuery},
};

#[derive(Clone)]
pub struct CategoriasRepository {
    pool: Pool<Postgres>,
}

impl CategoriasRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get category by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Categoria> {
        sqlx::query_as::<_, Categoria>(
            "SELECT id, nome, created_at, updated_at FROM categorias WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Categoria with id {} not found", id)))
    }

    /// Check whether a category exists
    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categorias WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// List categories with optional name filter and pagination
    pub async fn search(&self, query: &CategoriaQuery) -> AppResult<(Vec<Categoria>, i64)> {
        let (page, per_page) = query.pagination();
        let offset = (page - 1) * per_page;

        let (total, categorias) = if let Some(ref nome) = query.nome {
            let pattern = format!("%{}%", super::escape_like(nome));
            let total: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM categorias WHERE nome ILIKE $1")
                    .bind(&pattern)
                    .fetch_one(&self.pool)
                    .await?;
            let categorias = sqlx::query_as::<_, Categoria>(
                "SELECT id, nome, created_at, updated_at FROM categorias \
                 WHERE nome ILIKE $1 ORDER BY nome LIMIT $2 OFFSET $3",
            )
            .bind(&pattern)
            .bind(per_page)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
            (total, categorias)
        } else {
            let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categorias")
                .fetch_one(&self.pool)
                .await?;
            let categorias = sqlx::query_as::<_, Categoria>(
                "SELECT id, nome, created_at, updated_at FROM categorias \
                 ORDER BY nome LIMIT $1 OFFSET $2",
            )
            .bind(per_page)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
            (total, categorias)
        };

        Ok((categorias, total))
    }

    /// Create a new category
    pub async fn create(&self, payload: &CategoriaPayload) -> AppResult<Categoria> {
        let now = Utc::now();
        let id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO categorias (nome, created_at, updated_at) VALUES ($1, $2, $2) RETURNING id",
        )
        .bind(&payload.nome)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Update an existing category (full replacement)
    pub async fn update(&self, id: i32, payload: &CategoriaPayload) -> AppResult<Categoria> {
        let result = sqlx::query("UPDATE categorias SET nome = $1, updated_at = $2 WHERE id = $3")
            .bind(&payload.nome)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Categoria with id {} not found", id)));
        }

        self.get_by_id(id).await
    }

    /// Delete a category. Refuses while books still reference it.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let referenced: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM livros WHERE categoria_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        if referenced > 0 {
            return Err(AppError::Conflict(format!(
                "Categoria with id {} is referenced by {} livro(s)",
                id, referenced
            )));
        }

        let result = sqlx::query("DELETE FROM categorias WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Categoria with id {} not found", id)));
        }

        Ok(())
    }
}
