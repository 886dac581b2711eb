//! Business logic services

pub mod auth;
pub mod catalog;
pub mod colecoes;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub catalog: catalog::CatalogService,
    pub colecoes: colecoes::ColecoesService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config),
            catalog: catalog::CatalogService::new(repository.clone()),
            colecoes: colecoes::ColecoesService::new(repository.clone()),
            repository,
        }
    }

    /// Check that the database accepts queries (readiness probe)
    pub async fn db_ready(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(&self.repository.pool)
            .await
            .is_ok()
    }
}
