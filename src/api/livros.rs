//! Book (catalog) endpoints. Open access: no token required.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::livro::{Livro, LivroPayload, LivroQuery, LivroShort},
};

use super::{PaginatedLivros, PaginatedResponse};

/// List books with search, filters, ordering and pagination
#[utoipa::path(
    get,
    path = "/livros/",
    tag = "livros",
    params(
        ("search" = Option<String>, Query, description = "Prefix search on titulo"),
        ("autor" = Option<i32>, Query, description = "Filter by author id"),
        ("categoria" = Option<i32>, Query, description = "Filter by category id"),
        ("ordering" = Option<String>, Query, description = "titulo, autor, categoria or publicado_em; prefix with - for descending"),
        ("page" = Option<i64>, Query, description = "Page number (default: 1)"),
        ("per_page" = Option<i64>, Query, description = "Records per page (default: 20)")
    ),
    responses(
        (status = 200, description = "List of books", body = PaginatedLivros)
    )
)]
pub async fn list_livros(
    State(state): State<crate::AppState>,
    Query(query): Query<LivroQuery>,
) -> AppResult<Json<PaginatedResponse<LivroShort>>> {
    let (livros, total) = state.services.catalog.search_livros(&query).await?;
    let (page, per_page) = query.pagination();

    Ok(Json(PaginatedResponse {
        items: livros,
        total,
        page,
        per_page,
    }))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/livros/{id}/",
    tag = "livros",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Livro),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_livro(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Livro>> {
    let livro = state.services.catalog.get_livro(id).await?;
    Ok(Json(livro))
}

/// Create a new book. Also mounted at /livros/create/ so older clients
/// keep working.
#[utoipa::path(
    post,
    path = "/livros/",
    tag = "livros",
    request_body = LivroPayload,
    responses(
        (status = 201, description = "Book created", body = Livro),
        (status = 400, description = "Invalid input, naming each invalid field")
    )
)]
pub async fn create_livro(
    State(state): State<crate::AppState>,
    Json(payload): Json<LivroPayload>,
) -> AppResult<(StatusCode, Json<Livro>)> {
    let created = state.services.catalog.create_livro(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing book (full replacement)
#[utoipa::path(
    put,
    path = "/livros/{id}/",
    tag = "livros",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = LivroPayload,
    responses(
        (status = 200, description = "Book updated", body = Livro),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_livro(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<LivroPayload>,
) -> AppResult<Json<Livro>> {
    let updated = state.services.catalog.update_livro(id, payload).await?;
    Ok(Json(updated))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/livros/{id}/",
    tag = "livros",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_livro(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.catalog.delete_livro(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
