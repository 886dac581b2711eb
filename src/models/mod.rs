//! Data models for Biblioteca

pub mod autor;
pub mod categoria;
pub mod colecao;
pub mod livro;
pub mod usuario;

// Re-export commonly used types
pub use autor::Autor;
pub use categoria::Categoria;
pub use colecao::Colecao;
pub use livro::{Livro, LivroShort};
pub use usuario::Usuario;

/// Clamp raw pagination parameters to the bounds actually served, so
/// that repositories and response envelopes always agree.
pub fn clamp_pagination(page: Option<i64>, per_page: Option<i64>) -> (i64, i64) {
    let page = page.unwrap_or(1).max(1);
    let per_page = per_page.unwrap_or(20).clamp(1, 100);
    (page, per_page)
}

#[cfg(test)]
mod tests {
    use super::clamp_pagination;

    #[test]
    fn defaults_apply_when_unset() {
        assert_eq!(clamp_pagination(None, None), (1, 20));
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        assert_eq!(clamp_pagination(Some(0), Some(1000)), (1, 100));
        assert_eq!(clamp_pagination(Some(-5), Some(0)), (1, 1));
        assert_eq!(clamp_pagination(Some(3), Some(50)), (3, 50));
    }
}
