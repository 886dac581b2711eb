//! Category model and request payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Category record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Categoria {
    pub id: i32,
    pub nome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create/update category payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CategoriaPayload {
    #[validate(length(min = 1, message = "Nome must not be empty"))]
    pub nome: String,
}

/// Category list query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct CategoriaQuery {
    pub nome: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl CategoriaQuery {
    /// Effective (page, per_page) after clamping
    pub fn pagination(&self) -> (i64, i64) {
        super::clamp_pagination(self.page, self.per_page)
    }
}
