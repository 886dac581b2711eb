//! Catalog service: books, authors and categories.
//!
//! Payload validation happens here so that every handler surfaces the
//! same field-level error shape, including referential checks (a book
//! must point at an existing autor and categoria).

use validator::{Validate, ValidationError};

use crate::{
    error::{AppError, AppResult},
    models::{
        autor::{Autor, AutorPayload, AutorQuery},
        categoria::{Categoria, CategoriaPayload, CategoriaQuery},
        livro::{Livro, LivroPayload, LivroQuery, LivroShort},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    // =========================================================================
    // Livros
    // =========================================================================

    /// Search books with filters, ordering and pagination
    pub async fn search_livros(&self, query: &LivroQuery) -> AppResult<(Vec<LivroShort>, i64)> {
        self.repository.livros.search(query).await
    }

    /// Get book by ID
    pub async fn get_livro(&self, id: i32) -> AppResult<Livro> {
        self.repository.livros.get_by_id(id).await
    }

    /// Create a new book after full validation
    pub async fn create_livro(&self, payload: LivroPayload) -> AppResult<Livro> {
        let (autor, categoria, publicado_em) = self.validate_livro(&payload).await?;
        self.repository
            .livros
            .create(&payload.titulo, autor, categoria, publicado_em)
            .await
    }

    /// Replace an existing book, re-validating every field
    pub async fn update_livro(&self, id: i32, payload: LivroPayload) -> AppResult<Livro> {
        // Missing records surface as 404 before any validation error
        self.repository.livros.get_by_id(id).await?;
        let (autor, categoria, publicado_em) = self.validate_livro(&payload).await?;
        self.repository
            .livros
            .update(id, &payload.titulo, autor, categoria, publicado_em)
            .await
    }

    /// Delete a book
    pub async fn delete_livro(&self, id: i32) -> AppResult<()> {
        self.repository.livros.delete(id).await
    }

    /// Validate the payload shape plus autor/categoria references.
    /// Referential failures are reported under the offending field name
    /// alongside any shape errors, in a single response.
    async fn validate_livro(
        &self,
        payload: &LivroPayload,
    ) -> AppResult<(i32, i32, chrono::NaiveDate)> {
        let mut errors = payload.validate_fields();

        if let Some(autor) = payload.autor {
            if !self.repository.autores.exists(autor).await? {
                let mut err = ValidationError::new("does_not_exist");
                err.message = Some(format!("Autor with id {} does not exist", autor).into());
                errors.add("autor", err);
            }
        }
        if let Some(categoria) = payload.categoria {
            if !self.repository.categorias.exists(categoria).await? {
                let mut err = ValidationError::new("does_not_exist");
                err.message = Some(format!("Categoria with id {} does not exist", categoria).into());
                errors.add("categoria", err);
            }
        }

        if !errors.is_empty() {
            return Err(AppError::FieldValidation(errors));
        }

        // All three are guaranteed present and parseable at this point
        let autor = payload.autor.ok_or_else(|| AppError::Internal("autor missing".into()))?;
        let categoria = payload
            .categoria
            .ok_or_else(|| AppError::Internal("categoria missing".into()))?;
        let publicado_em = payload
            .publicado_em_date()
            .ok_or_else(|| AppError::Internal("publicado_em unparseable".into()))?;

        Ok((autor, categoria, publicado_em))
    }

    // =========================================================================
    // Autores
    // =========================================================================

    pub async fn search_autores(&self, query: &AutorQuery) -> AppResult<(Vec<Autor>, i64)> {
        self.repository.autores.search(query).await
    }

    pub async fn get_autor(&self, id: i32) -> AppResult<Autor> {
        self.repository.autores.get_by_id(id).await
    }

    pub async fn create_autor(&self, payload: AutorPayload) -> AppResult<Autor> {
        payload.validate()?;
        self.repository.autores.create(&payload).await
    }

    pub async fn update_autor(&self, id: i32, payload: AutorPayload) -> AppResult<Autor> {
        payload.validate()?;
        self.repository.autores.update(id, &payload).await
    }

    pub async fn delete_autor(&self, id: i32) -> AppResult<()> {
        self.repository.autores.delete(id).await
    }

    // =========================================================================
    // Categorias
    // =========================================================================

    pub async fn search_categorias(
        &self,
        query: &CategoriaQuery,
    ) -> AppResult<(Vec<Categoria>, i64)> {
        self.repository.categorias.search(query).await
    }

    pub async fn get_categoria(&self, id: i32) -> AppResult<Categoria> {
        self.repository.categorias.get_by_id(id).await
    }

    pub async fn create_categoria(&self, payload: CategoriaPayload) -> AppResult<Categoria> {
        payload.validate()?;
        self.repository.categorias.create(&payload).await
    }

    pub async fn update_categoria(&self, id: i32, payload: CategoriaPayload) -> AppResult<Categoria> {
        payload.validate()?;
        self.repository.categorias.update(id, &payload).await
    }

    pub async fn delete_categoria(&self, id: i32) -> AppResult<()> {
        self.repository.categorias.delete(id).await
    }
}
