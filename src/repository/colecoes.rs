//! Collections repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::colecao::{Colecao, ColecaoQuery, CreateColecao, UpdateColecao},
};

const COLECAO_COLUMNS: &str =
    "id, nome, descricao, colecionador_id AS colecionador, created_at, updated_at";

#[derive(Clone)]
pub struct ColecoesRepository {
    pool: Pool<Postgres>,
}

impl ColecoesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get collection by ID, including its member book ids
    pub async fn get_by_id(&self, id: i32) -> AppResult<Colecao> {
        let mut colecao = sqlx::query_as::<_, Colecao>(&format!(
            "SELECT {} FROM colecoes WHERE id = $1",
            COLECAO_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Colecao with id {} not found", id)))?;

        colecao.livros = self.livro_ids(id).await?;
        Ok(colecao)
    }

    async fn livro_ids(&self, colecao_id: i32) -> AppResult<Vec<i32>> {
        let ids = sqlx::query_scalar::<_, i32>(
            "SELECT livro_id FROM colecao_livros WHERE colecao_id = $1 ORDER BY livro_id",
        )
        .bind(colecao_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }

    /// List collections with optional filters and pagination
    pub async fn search(&self, query: &ColecaoQuery) -> AppResult<(Vec<Colecao>, i64)> {
        let (page, per_page) = query.pagination();
        let offset = (page - 1) * per_page;

        let mut conditions = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(ref nome) = query.nome {
            params.push(format!("%{}%", super::escape_like(nome)));
            conditions.push(format!("nome ILIKE ${}", params.len()));
        }
        if let Some(colecionador) = query.colecionador {
            conditions.push(format!("colecionador_id = {}", colecionador));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_query = format!("SELECT COUNT(*) FROM colecoes {}", where_clause);
        let mut count_builder = sqlx::query_scalar::<_, i64>(&count_query);
        for param in &params {
            count_builder = count_builder.bind(param);
        }
        let total = count_builder.fetch_one(&self.pool).await?;

        let select_query = format!(
            "SELECT {} FROM colecoes {} ORDER BY nome LIMIT {} OFFSET {}",
            COLECAO_COLUMNS, where_clause, per_page, offset
        );
        let mut select_builder = sqlx::query_as::<_, Colecao>(&select_query);
        for param in &params {
            select_builder = select_builder.bind(param);
        }
        let mut colecoes = select_builder.fetch_all(&self.pool).await?;

        for colecao in &mut colecoes {
            colecao.livros = self.livro_ids(colecao.id).await?;
        }

        Ok((colecoes, total))
    }

    /// Create a new collection owned by `colecionador_id`
    pub async fn create(&self, payload: &CreateColecao, colecionador_id: i32) -> AppResult<Colecao> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO colecoes (nome, descricao, colecionador_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING id
            "#,
        )
        .bind(&payload.nome)
        .bind(&payload.descricao)
        .bind(colecionador_id)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        for livro_id in &payload.livros {
            sqlx::query("INSERT INTO colecao_livros (colecao_id, livro_id) VALUES ($1, $2)")
                .bind(id)
                .bind(livro_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        self.get_by_id(id).await
    }

    /// Partially update a collection. Owner is never touched.
    pub async fn update(&self, id: i32, payload: &UpdateColecao) -> AppResult<Colecao> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let mut sets = vec!["updated_at = $1".to_string()];
        let mut param_idx = 2;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, param_idx));
                    param_idx += 1;
                }
            };
        }

        add_field!(payload.nome, "nome");
        add_field!(payload.descricao, "descricao");

        let query = format!(
            "UPDATE colecoes SET {} WHERE id = ${}",
            sets.join(", "),
            param_idx
        );

        let mut builder = sqlx::query(&query).bind(now);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(payload.nome);
        bind_field!(payload.descricao);

        let result = builder.bind(id).execute(&mut *tx).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Colecao with id {} not found", id)));
        }

        // Replace the membership set when one is provided
        if let Some(ref livros) = payload.livros {
            sqlx::query("DELETE FROM colecao_livros WHERE colecao_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            for livro_id in livros {
                sqlx::query("INSERT INTO colecao_livros (colecao_id, livro_id) VALUES ($1, $2)")
                    .bind(id)
                    .bind(livro_id)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;

        self.get_by_id(id).await
    }

    /// Delete a collection. Membership rows cascade in the schema.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM colecoes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Colecao with id {} not found", id)));
        }

        Ok(())
    }
}
