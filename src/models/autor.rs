//! Author model and request payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Author record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Autor {
    pub id: i32,
    pub nome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create/update author payload. Updates replace all fields, so the
/// same payload serves both operations.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AutorPayload {
    #[validate(length(min = 1, message = "Nome must not be empty"))]
    pub nome: String,
}

/// Author list query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct AutorQuery {
    pub nome: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl AutorQuery {
    /// Effective (page, per_page) after clamping
    pub fn pagination(&self) -> (i64, i64) {
        super::clamp_pagination(self.page, self.per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_nome_is_rejected() {
        let payload = AutorPayload { nome: String::new() };
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("nome"));
    }

    #[test]
    fn non_empty_nome_is_accepted() {
        let payload = AutorPayload { nome: "Machado de Assis".to_string() };
        assert!(payload.validate().is_ok());
    }
}
