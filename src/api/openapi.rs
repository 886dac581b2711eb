//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, autores, categorias, colecoes, health, livros};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Biblioteca API",
        version = "1.0.0",
        description = "Library Catalog REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::me,
        // Livros
        livros::list_livros,
        livros::get_livro,
        livros::create_livro,
        livros::update_livro,
        livros::delete_livro,
        // Autores
        autores::list_autores,
        autores::get_autor,
        autores::create_autor,
        autores::update_autor,
        autores::delete_autor,
        // Categorias
        categorias::list_categorias,
        categorias::get_categoria,
        categorias::create_categoria,
        categorias::update_categoria,
        categorias::delete_categoria,
        // Colecoes
        colecoes::list_colecoes,
        colecoes::get_colecao,
        colecoes::create_colecao,
        colecoes::update_colecao,
        colecoes::delete_colecao,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            // Livros
            crate::models::livro::Livro,
            crate::models::livro::LivroShort,
            crate::models::livro::LivroPayload,
            crate::models::livro::LivroQuery,
            // Autores
            crate::models::autor::Autor,
            crate::models::autor::AutorPayload,
            crate::models::autor::AutorQuery,
            // Categorias
            crate::models::categoria::Categoria,
            crate::models::categoria::CategoriaPayload,
            crate::models::categoria::CategoriaQuery,
            // Colecoes
            crate::models::colecao::Colecao,
            crate::models::colecao::CreateColecao,
            crate::models::colecao::UpdateColecao,
            crate::models::colecao::ColecaoQuery,
            // Usuarios
            crate::models::usuario::Usuario,
            // Pagination envelopes
            crate::api::PaginatedAutores,
            crate::api::PaginatedCategorias,
            crate::api::PaginatedColecoes,
            crate::api::PaginatedLivros,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "livros", description = "Book catalog management"),
        (name = "autores", description = "Author management"),
        (name = "categorias", description = "Category management"),
        (name = "colecoes", description = "User-owned book collections")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
