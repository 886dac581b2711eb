//! Collections service: ownership-scoped CRUD.
//!
//! Reads need authentication only; writes additionally require that the
//! caller is the collection's owner. Ownership is fixed at creation and
//! never transferred.

use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    error::{AppError, AppResult},
    models::{
        colecao::{Colecao, ColecaoQuery, CreateColecao, UpdateColecao},
        usuario::UserClaims,
    },
    repository::Repository,
};

/// Ownership check shared by every mutating operation
pub fn ensure_owner(claims: &UserClaims, colecao: &Colecao) -> AppResult<()> {
    if claims.user_id == colecao.colecionador {
        Ok(())
    } else {
        Err(AppError::Authorization(
            "Only the collection's owner may modify it".to_string(),
        ))
    }
}

#[derive(Clone)]
pub struct ColecoesService {
    repository: Repository,
}

impl ColecoesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List collections (any authenticated user)
    pub async fn search(&self, query: &ColecaoQuery) -> AppResult<(Vec<Colecao>, i64)> {
        self.repository.colecoes.search(query).await
    }

    /// Get collection by ID (any authenticated user)
    pub async fn get(&self, id: i32) -> AppResult<Colecao> {
        self.repository.colecoes.get_by_id(id).await
    }

    /// Create a collection owned by the caller
    pub async fn create(&self, claims: &UserClaims, payload: CreateColecao) -> AppResult<Colecao> {
        payload.validate()?;
        self.validate_livros(&payload.livros).await?;
        self.repository.colecoes.create(&payload, claims.user_id).await
    }

    /// Partially update a collection (owner only)
    pub async fn update(
        &self,
        claims: &UserClaims,
        id: i32,
        payload: UpdateColecao,
    ) -> AppResult<Colecao> {
        let colecao = self.repository.colecoes.get_by_id(id).await?;
        ensure_owner(claims, &colecao)?;

        payload.validate()?;
        if let Some(ref livros) = payload.livros {
            self.validate_livros(livros).await?;
        }

        self.repository.colecoes.update(id, &payload).await
    }

    /// Delete a collection (owner only)
    pub async fn delete(&self, claims: &UserClaims, id: i32) -> AppResult<()> {
        let colecao = self.repository.colecoes.get_by_id(id).await?;
        ensure_owner(claims, &colecao)?;

        self.repository.colecoes.delete(id).await
    }

    /// Every member book id must reference an existing livro
    async fn validate_livros(&self, ids: &[i32]) -> AppResult<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let existing = self.repository.livros.count_existing(ids).await?;
        if existing != ids.len() as i64 {
            let mut errors = ValidationErrors::new();
            let mut err = ValidationError::new("does_not_exist");
            err.message = Some("One or more livro ids do not exist".into());
            errors.add("livros", err);
            return Err(AppError::FieldValidation(errors));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn claims(user_id: i32) -> UserClaims {
        UserClaims {
            sub: format!("user{}", user_id),
            user_id,
            exp: Utc::now().timestamp() + 3600,
            iat: Utc::now().timestamp(),
        }
    }

    fn colecao(owner: i32) -> Colecao {
        Colecao {
            id: 1,
            nome: "Favoritos".to_string(),
            descricao: None,
            colecionador: owner,
            livros: vec![],
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn owner_may_mutate() {
        assert!(ensure_owner(&claims(7), &colecao(7)).is_ok());
    }

    #[test]
    fn non_owner_is_forbidden() {
        let err = ensure_owner(&claims(8), &colecao(7)).unwrap_err();
        assert!(matches!(err, AppError::Authorization(_)));
    }
}
