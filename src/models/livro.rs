//! Book model, request payloads and list ordering.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError, ValidationErrors};

/// Full book record. `autor` and `categoria` are the referenced ids
/// (columns `autor_id`/`categoria_id`, aliased in queries).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Livro {
    pub id: i32,
    pub titulo: String,
    pub autor: i32,
    pub categoria: i32,
    pub publicado_em: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Short book representation for lists, with referenced names joined in
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LivroShort {
    pub id: i32,
    pub titulo: String,
    pub autor: i32,
    pub autor_nome: Option<String>,
    pub categoria: i32,
    pub categoria_nome: Option<String>,
    pub publicado_em: NaiveDate,
}

/// Create/update book payload. Full replacement on update, so every
/// field is re-validated each time.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LivroPayload {
    #[validate(length(min = 1, message = "Titulo must not be empty"))]
    pub titulo: String,
    #[validate(required(message = "Autor is required"))]
    pub autor: Option<i32>,
    #[validate(required(message = "Categoria is required"))]
    pub categoria: Option<i32>,
    pub publicado_em: String,
}

impl LivroPayload {
    /// Shape validation: derive rules plus the calendar-date check on
    /// publicado_em, collected into one set of errors so a single 400
    /// names every invalid field.
    pub fn validate_fields(&self) -> ValidationErrors {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };
        if self.publicado_em_date().is_none() {
            let mut err = ValidationError::new("invalid_date");
            err.message = Some("Publicado_em must be a valid YYYY-MM-DD date".into());
            errors.add("publicado_em", err);
        }
        errors
    }

    /// Parse the publication date
    pub fn publicado_em_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.publicado_em, "%Y-%m-%d").ok()
    }
}

/// Book list query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct LivroQuery {
    /// Case-insensitive prefix search on titulo
    pub search: Option<String>,
    /// Filter by author id
    pub autor: Option<i32>,
    /// Filter by category id
    pub categoria: Option<i32>,
    /// Ordering field, optionally prefixed with `-` for descending
    pub ordering: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl LivroQuery {
    /// Effective (page, per_page) after clamping
    pub fn pagination(&self) -> (i64, i64) {
        super::clamp_pagination(self.page, self.per_page)
    }
}

/// Whitelisted ordering fields for book listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LivroOrdering {
    Titulo,
    Autor,
    Categoria,
    PublicadoEm,
}

impl LivroOrdering {
    /// Parse an ordering expression (`titulo`, `-publicado_em`, ...).
    /// Returns the field and whether the order is descending. Unknown
    /// fields yield `None` and are ignored by the caller.
    pub fn parse(expr: &str) -> Option<(Self, bool)> {
        let (desc, field) = match expr.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, expr),
        };
        let ordering = match field {
            "titulo" => LivroOrdering::Titulo,
            "autor" => LivroOrdering::Autor,
            "categoria" => LivroOrdering::Categoria,
            "publicado_em" => LivroOrdering::PublicadoEm,
            _ => return None,
        };
        Some((ordering, desc))
    }

    /// SQL expression for this ordering (author/category sort by name)
    pub fn as_sql(&self) -> &'static str {
        match self {
            LivroOrdering::Titulo => "l.titulo",
            LivroOrdering::Autor => "a.nome",
            LivroOrdering::Categoria => "c.nome",
            LivroOrdering::PublicadoEm => "l.publicado_em",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_payload() -> LivroPayload {
        LivroPayload {
            titulo: "Novo Livro".to_string(),
            autor: Some(1),
            categoria: Some(1),
            publicado_em: "2023-10-05".to_string(),
        }
    }

    #[test]
    fn valid_payload_passes() {
        assert!(valid_payload().validate_fields().is_empty());
    }

    #[test]
    fn invalid_payload_names_every_field() {
        let payload = LivroPayload {
            titulo: String::new(),
            autor: None,
            categoria: None,
            publicado_em: "data-invalida".to_string(),
        };
        let errors = payload.validate_fields();
        let fields = errors.field_errors();
        assert!(fields.contains_key("titulo"));
        assert!(fields.contains_key("autor"));
        assert!(fields.contains_key("categoria"));
        assert!(fields.contains_key("publicado_em"));
    }

    #[test]
    fn impossible_calendar_date_is_rejected() {
        let mut payload = valid_payload();
        payload.publicado_em = "2023-02-30".to_string();
        let errors = payload.validate_fields();
        assert!(errors.field_errors().contains_key("publicado_em"));
    }

    #[test]
    fn publicado_em_date_parses_after_validation() {
        let payload = valid_payload();
        assert_eq!(
            payload.publicado_em_date(),
            NaiveDate::from_ymd_opt(2023, 10, 5)
        );
    }

    #[test]
    fn ordering_parses_ascending_and_descending() {
        assert_eq!(LivroOrdering::parse("titulo"), Some((LivroOrdering::Titulo, false)));
        assert_eq!(
            LivroOrdering::parse("-publicado_em"),
            Some((LivroOrdering::PublicadoEm, true))
        );
        assert_eq!(LivroOrdering::parse("autor"), Some((LivroOrdering::Autor, false)));
        assert_eq!(LivroOrdering::parse("-categoria"), Some((LivroOrdering::Categoria, true)));
    }

    #[test]
    fn unknown_ordering_is_ignored() {
        assert_eq!(LivroOrdering::parse("id; DROP TABLE livros"), None);
        assert_eq!(LivroOrdering::parse(""), None);
    }
}
