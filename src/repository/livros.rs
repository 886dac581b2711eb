//! Books repository for database operations

use chrono::{NaiveDate, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::livro::{Livro, LivroOrdering, LivroQuery, LivroShort},
};

const LIVRO_COLUMNS: &str =
    "id, titulo, autor_id AS autor, categoria_id AS categoria, publicado_em, created_at, updated_at";

#[derive(Clone)]
pub struct LivrosRepository {
    pool: Pool<Postgres>,
}

impl LivrosRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Livro> {
        sqlx::query_as::<_, Livro>(&format!(
            "SELECT {} FROM livros WHERE id = $1",
            LIVRO_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Livro with id {} not found", id)))
    }

    /// Count how many of the given book ids exist
    pub async fn count_existing(&self, ids: &[i32]) -> AppResult<i64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM livros WHERE id = ANY($1)")
            .bind(ids)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Search books with filters, ordering and pagination
    pub async fn search(&self, query: &LivroQuery) -> AppResult<(Vec<LivroShort>, i64)> {
        let (page, per_page) = query.pagination();
        let offset = (page - 1) * per_page;

        let mut conditions = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(ref search) = query.search {
            params.push(format!("{}%", super::escape_like(search)));
            conditions.push(format!("l.titulo ILIKE ${}", params.len()));
        }

        // Integer filters are embedded directly: typed i32, no injection surface
        if let Some(autor) = query.autor {
            conditions.push(format!("l.autor_id = {}", autor));
        }
        if let Some(categoria) = query.categoria {
            conditions.push(format!("l.categoria_id = {}", categoria));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let order_clause = match query.ordering.as_deref().and_then(LivroOrdering::parse) {
            Some((ordering, desc)) => format!(
                "ORDER BY {} {}",
                ordering.as_sql(),
                if desc { "DESC" } else { "ASC" }
            ),
            // Unknown or missing ordering falls back to insertion order
            None => "ORDER BY l.id".to_string(),
        };

        let count_query = format!("SELECT COUNT(*) FROM livros l {}", where_clause);
        let mut count_builder = sqlx::query_scalar::<_, i64>(&count_query);
        for param in &params {
            count_builder = count_builder.bind(param);
        }
        let total = count_builder.fetch_one(&self.pool).await?;

        let select_query = format!(
            r#"
            SELECT l.id, l.titulo, l.autor_id AS autor, a.nome AS autor_nome,
                   l.categoria_id AS categoria, c.nome AS categoria_nome, l.publicado_em
            FROM livros l
            LEFT JOIN autores a ON l.autor_id = a.id
            LEFT JOIN categorias c ON l.categoria_id = c.id
            {} {}
            LIMIT {} OFFSET {}
            "#,
            where_clause, order_clause, per_page, offset
        );

        let mut select_builder = sqlx::query_as::<_, LivroShort>(&select_query);
        for param in &params {
            select_builder = select_builder.bind(param);
        }
        let livros = select_builder.fetch_all(&self.pool).await?;

        Ok((livros, total))
    }

    /// Create a new book
    pub async fn create(
        &self,
        titulo: &str,
        autor_id: i32,
        categoria_id: i32,
        publicado_em: NaiveDate,
    ) -> AppResult<Livro> {
        let now = Utc::now();
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO livros (titulo, autor_id, categoria_id, publicado_em, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING id
            "#,
        )
        .bind(titulo)
        .bind(autor_id)
        .bind(categoria_id)
        .bind(publicado_em)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Update an existing book (full replacement)
    pub async fn update(
        &self,
        id: i32,
        titulo: &str,
        autor_id: i32,
        categoria_id: i32,
        publicado_em: NaiveDate,
    ) -> AppResult<Livro> {
        let result = sqlx::query(
            r#"
            UPDATE livros
            SET titulo = $1, autor_id = $2, categoria_id = $3, publicado_em = $4, updated_at = $5
            WHERE id = $6
            "#,
        )
        .bind(titulo)
        .bind(autor_id)
        .bind(categoria_id)
        .bind(publicado_em)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Livro with id {} not found", id)));
        }

        self.get_by_id(id).await
    }

    /// Delete a book. Membership rows in colecao_livros cascade in the schema.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM livros WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Livro with id {} not found", id)));
        }

        Ok(())
    }
}
