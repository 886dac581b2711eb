//! Collection model and request payloads.
//!
//! A `Colecao` is a user-owned named set of books. The owner
//! (`colecionador`) is fixed at creation: neither payload carries an
//! owner field, so ownership can never be reassigned through the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Collection record. `livros` is the set of member book ids, loaded
/// from the join table separately.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Colecao {
    pub id: i32,
    pub nome: String,
    pub descricao: Option<String>,
    /// Owning user id
    pub colecionador: i32,
    // Not a colecoes column; loaded from the join table afterwards
    #[sqlx(default)]
    #[serde(default)]
    pub livros: Vec<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create collection payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateColecao {
    #[validate(length(min = 1, message = "Nome must not be empty"))]
    pub nome: String,
    pub descricao: Option<String>,
    #[serde(default)]
    pub livros: Vec<i32>,
}

/// Partial update payload (PATCH semantics: absent fields keep their
/// current value)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateColecao {
    #[validate(length(min = 1, message = "Nome must not be empty"))]
    pub nome: Option<String>,
    pub descricao: Option<String>,
    pub livros: Option<Vec<i32>>,
}

/// Collection list query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ColecaoQuery {
    pub nome: Option<String>,
    /// Filter by owner id
    pub colecionador: Option<i32>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl ColecaoQuery {
    /// Effective (page, per_page) after clamping
    pub fn pagination(&self) -> (i64, i64) {
        super::clamp_pagination(self.page, self.per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_nome_is_rejected_on_create_and_update() {
        let create = CreateColecao {
            nome: String::new(),
            descricao: None,
            livros: vec![],
        };
        assert!(create.validate().is_err());

        let update = UpdateColecao {
            nome: Some(String::new()),
            descricao: None,
            livros: None,
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn absent_nome_is_fine_on_partial_update() {
        let update = UpdateColecao {
            nome: None,
            descricao: Some("favoritos de terror".to_string()),
            livros: None,
        };
        assert!(update.validate().is_ok());
    }
}
