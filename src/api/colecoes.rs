//! Collection endpoints. All operations require authentication;
//! mutation additionally requires ownership.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::colecao::{Colecao, ColecaoQuery, CreateColecao, UpdateColecao},
};

use super::{AuthenticatedUser, PaginatedColecoes, PaginatedResponse};

/// List collections
#[utoipa::path(
    get,
    path = "/colecoes/",
    tag = "colecoes",
    security(("bearer_auth" = [])),
    params(
        ("nome" = Option<String>, Query, description = "Filter by name"),
        ("colecionador" = Option<i32>, Query, description = "Filter by owner id"),
        ("page" = Option<i64>, Query, description = "Page number"),
        ("per_page" = Option<i64>, Query, description = "Records per page")
    ),
    responses(
        (status = 200, description = "List of collections", body = PaginatedColecoes),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_colecoes(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<ColecaoQuery>,
) -> AppResult<Json<PaginatedResponse<Colecao>>> {
    let (colecoes, total) = state.services.colecoes.search(&query).await?;
    let (page, per_page) = query.pagination();

    Ok(Json(PaginatedResponse {
        items: colecoes,
        total,
        page,
        per_page,
    }))
}

/// Get collection by ID
#[utoipa::path(
    get,
    path = "/colecoes/{id}/",
    tag = "colecoes",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Collection ID")),
    responses(
        (status = 200, description = "Collection details", body = Colecao),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Collection not found")
    )
)]
pub async fn get_colecao(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Colecao>> {
    let colecao = state.services.colecoes.get(id).await?;
    Ok(Json(colecao))
}

/// Create a collection owned by the authenticated user
#[utoipa::path(
    post,
    path = "/colecoes/",
    tag = "colecoes",
    security(("bearer_auth" = [])),
    request_body = CreateColecao,
    responses(
        (status = 201, description = "Collection created", body = Colecao),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_colecao(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(payload): Json<CreateColecao>,
) -> AppResult<(StatusCode, Json<Colecao>)> {
    let created = state.services.colecoes.create(&claims, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Partially update a collection (owner only)
#[utoipa::path(
    patch,
    path = "/colecoes/{id}/",
    tag = "colecoes",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Collection ID")),
    request_body = UpdateColecao,
    responses(
        (status = 200, description = "Collection updated", body = Colecao),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Caller is not the owner"),
        (status = 404, description = "Collection not found")
    )
)]
pub async fn update_colecao(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateColecao>,
) -> AppResult<Json<Colecao>> {
    let updated = state.services.colecoes.update(&claims, id, payload).await?;
    Ok(Json(updated))
}

/// Delete a collection (owner only)
#[utoipa::path(
    delete,
    path = "/colecoes/{id}/",
    tag = "colecoes",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Collection ID")),
    responses(
        (status = 204, description = "Collection deleted"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Caller is not the owner"),
        (status = 404, description = "Collection not found")
    )
)]
pub async fn delete_colecao(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.colecoes.delete(&claims, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
