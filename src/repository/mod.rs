//! Repository layer for database operations

pub mod autores;
pub mod categorias;
pub mod colecoes;
pub mod livros;
pub mod usuarios;

use sqlx::{Pool, Postgres};

/// Escape LIKE/ILIKE wildcards so user input matches literally.
/// Postgres treats backslash as the default escape character.
pub(crate) fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub autores: autores::AutoresRepository,
    pub categorias: categorias::CategoriasRepository,
    pub livros: livros::LivrosRepository,
    pub colecoes: colecoes::ColecoesRepository,
    pub usuarios: usuarios::UsuariosRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            autores: autores::AutoresRepository::new(pool.clone()),
            categorias: categorias::CategoriasRepository::new(pool.clone()),
            livros: livros::LivrosRepository::new(pool.clone()),
            colecoes: colecoes::ColecoesRepository::new(pool.clone()),
            usuarios: usuarios::UsuariosRepository::new(pool.clone()),
            pool,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn wildcards_are_escaped() {
        assert_eq!(escape_like("50%"), "50\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("c\\d"), "c\\\\d");
        assert_eq!(escape_like("plain"), "plain");
    }
}
