//! Author endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::autor::{Autor, AutorPayload, AutorQuery},
};

use super::{PaginatedAutores, PaginatedResponse};

/// List authors
#[utoipa::path(
    get,
    path = "/autores/",
    tag = "autores",
    params(
        ("nome" = Option<String>, Query, description = "Filter by name"),
        ("page" = Option<i64>, Query, description = "Page number"),
        ("per_page" = Option<i64>, Query, description = "Records per page")
    ),
    responses(
        (status = 200, description = "List of authors", body = PaginatedAutores)
    )
)]
pub async fn list_autores(
    State(state): State<crate::AppState>,
    Query(query): Query<AutorQuery>,
) -> AppResult<Json<PaginatedResponse<Autor>>> {
    let (autores, total) = state.services.catalog.search_autores(&query).await?;
    let (page, per_page) = query.pagination();

    Ok(Json(PaginatedResponse {
        items: autores,
        total,
        page,
        per_page,
    }))
}

/// Get author by ID
#[utoipa::path(
    get,
    path = "/autores/{id}/",
    tag = "autores",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author details", body = Autor),
        (status = 404, description = "Author not found")
    )
)]
pub async fn get_autor(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Autor>> {
    let autor = state.services.catalog.get_autor(id).await?;
    Ok(Json(autor))
}

/// Create a new author
#[utoipa::path(
    post,
    path = "/autores/",
    tag = "autores",
    request_body = AutorPayload,
    responses(
        (status = 201, description = "Author created", body = Autor),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_autor(
    State(state): State<crate::AppState>,
    Json(payload): Json<AutorPayload>,
) -> AppResult<(StatusCode, Json<Autor>)> {
    let created = state.services.catalog.create_autor(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing author
#[utoipa::path(
    put,
    path = "/autores/{id}/",
    tag = "autores",
    params(("id" = i32, Path, description = "Author ID")),
    request_body = AutorPayload,
    responses(
        (status = 200, description = "Author updated", body = Autor),
        (status = 404, description = "Author not found")
    )
)]
pub async fn update_autor(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<AutorPayload>,
) -> AppResult<Json<Autor>> {
    let updated = state.services.catalog.update_autor(id, payload).await?;
    Ok(Json(updated))
}

/// Delete an author
#[utoipa::path(
    delete,
    path = "/autores/{id}/",
    tag = "autores",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 204, description = "Author deleted"),
        (status = 404, description = "Author not found"),
        (status = 409, description = "Author is referenced by books")
    )
)]
pub async fn delete_autor(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.catalog.delete_autor(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
