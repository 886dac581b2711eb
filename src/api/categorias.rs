//! Category endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::categoria::{Categoria, CategoriaPayload, CategoriaQuery},
};

use super::{PaginatedCategorias, PaginatedResponse};

/// List categories
#[utoipa::path(
    get,
    path = "/categorias/",
    tag = "categorias",
    params(
        ("nome" = Option<String>, Query, description = "Filter by name"),
        ("page" = Option<i64>, Query, description = "Page number"),
        ("per_page" = Option<i64>, Query, description = "Records per page")
    ),
    responses(
        (status = 200, description = "List of categories", body = PaginatedCategorias)
    )
)]
pub async fn list_categorias(
    State(state): State<crate::AppState>,
    Query(query): Query<CategoriaQuery>,
) -> AppResult<Json<PaginatedResponse<Categoria>>> {
    let (categorias, total) = state.services.catalog.search_categorias(&query).await?;
    let (page, per_page) = query.pagination();

    Ok(Json(PaginatedResponse {
        items: categorias,
        total,
        page,
        per_page,
    }))
}

/// Get category by ID
#[utoipa::path(
    get,
    path = "/categorias/{id}/",
    tag = "categorias",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category details", body = Categoria),
        (status = 404, description = "Category not found")
    )
)]
pub async fn get_categoria(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Categoria>> {
    let categoria = state.services.catalog.get_categoria(id).await?;
    Ok(Json(categoria))
}

/// Create a new category
#[utoipa::path(
    post,
    path = "/categorias/",
    tag = "categorias",
    request_body = CategoriaPayload,
    responses(
        (status = 201, description = "Category created", body = Categoria),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_categoria(
    State(state): State<crate::AppState>,
    Json(payload): Json<CategoriaPayload>,
) -> AppResult<(StatusCode, Json<Categoria>)> {
    let created = state.services.catalog.create_categoria(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing category
#[utoipa::path(
    put,
    path = "/categorias/{id}/",
    tag = "categorias",
    params(("id" = i32, Path, description = "Category ID")),
    request_body = CategoriaPayload,
    responses(
        (status = 200, description = "Category updated", body = Categoria),
        (status = 404, description = "Category not found")
    )
)]
pub async fn update_categoria(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<CategoriaPayload>,
) -> AppResult<Json<Categoria>> {
    let updated = state.services.catalog.update_categoria(id, payload).await?;
    Ok(Json(updated))
}

/// Delete a category
#[utoipa::path(
    delete,
    path = "/categorias/{id}/",
    tag = "categorias",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category is referenced by books")
    )
)]
pub async fn delete_categoria(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.catalog.delete_categoria(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
