//! API integration tests.
//!
//! These run against a live server (cargo run). The default config
//! provisions the admin/admin and leitor/leitor accounts at startup.
//! Run with: cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080";

/// Helper to obtain a token for the given user
async fn get_auth_token(client: &Client, username: &str, password: &str) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": username,
            "password": password
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

/// Helper to create an autor + categoria pair for book tests
async fn create_autor_and_categoria(client: &Client) -> (i64, i64) {
    let autor: Value = client
        .post(format!("{}/autores/", BASE_URL))
        .json(&json!({"nome": "Autor 1"}))
        .send()
        .await
        .expect("Failed to create autor")
        .json()
        .await
        .expect("Failed to parse autor");

    let categoria: Value = client
        .post(format!("{}/categorias/", BASE_URL))
        .json(&json!({"nome": "Ficção"}))
        .send()
        .await
        .expect("Failed to create categoria")
        .json()
        .await
        .expect("Failed to parse categoria");

    (
        autor["id"].as_i64().expect("No autor id"),
        categoria["id"].as_i64().expect("No categoria id"),
    )
}

async fn livro_count(client: &Client) -> i64 {
    let body: Value = client
        .get(format!("{}/livros/", BASE_URL))
        .send()
        .await
        .expect("Failed to list livros")
        .json()
        .await
        .expect("Failed to parse livro list");
    body["total"].as_i64().expect("No total in response")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_login() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_string());
    assert_eq!(body["token_type"], "Bearer");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_livro_list() {
    let client = Client::new();

    let response = client
        .get(format!("{}/livros/", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["items"].is_array());
    assert!(body["total"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_livro_create_increments_count_and_echoes_fields() {
    let client = Client::new();
    let (autor, categoria) = create_autor_and_categoria(&client).await;
    let before = livro_count(&client).await;

    let response = client
        .post(format!("{}/livros/create/", BASE_URL))
        .json(&json!({
            "titulo": "Novo Livro",
            "autor": autor,
            "categoria": categoria,
            "publicado_em": "2023-10-05"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["titulo"], "Novo Livro");
    assert_eq!(body["autor"].as_i64(), Some(autor));
    assert_eq!(body["categoria"].as_i64(), Some(categoria));
    assert_eq!(body["publicado_em"], "2023-10-05");

    assert_eq!(livro_count(&client).await, before + 1);

    // Cleanup
    let livro_id = body["id"].as_i64().expect("No livro id");
    let _ = client
        .delete(format!("{}/livros/{}/", BASE_URL, livro_id))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_livro_create_invalid_data_names_every_field() {
    let client = Client::new();

    let response = client
        .post(format!("{}/livros/create/", BASE_URL))
        .json(&json!({
            "titulo": "",
            "autor": null,
            "categoria": null,
            "publicado_em": "data-invalida"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    let fields = &body["fields"];
    assert!(fields["titulo"].is_array());
    assert!(fields["autor"].is_array());
    assert!(fields["categoria"].is_array());
    assert!(fields["publicado_em"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_livro_create_unknown_references() {
    let client = Client::new();

    let response = client
        .post(format!("{}/livros/", BASE_URL))
        .json(&json!({
            "titulo": "Livro Fantasma",
            "autor": 999999,
            "categoria": 999999,
            "publicado_em": "2023-10-05"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["fields"]["autor"].is_array());
    assert!(body["fields"]["categoria"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_livro_update() {
    let client = Client::new();
    let (autor, categoria) = create_autor_and_categoria(&client).await;

    let created: Value = client
        .post(format!("{}/livros/", BASE_URL))
        .json(&json!({
            "titulo": "Livro 1",
            "autor": autor,
            "categoria": categoria,
            "publicado_em": "2023-01-01"
        }))
        .send()
        .await
        .expect("Failed to create livro")
        .json()
        .await
        .expect("Failed to parse livro");
    let livro_id = created["id"].as_i64().expect("No livro id");

    let response = client
        .put(format!("{}/livros/{}/", BASE_URL, livro_id))
        .json(&json!({
            "titulo": "Livro Atualizado",
            "autor": autor,
            "categoria": categoria,
            "publicado_em": "2023-01-01"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["titulo"], "Livro Atualizado");

    // Cleanup
    let response = client
        .delete(format!("{}/livros/{}/", BASE_URL, livro_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_livro_not_found() {
    let client = Client::new();

    let response = client
        .get(format!("{}/livros/999999/", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);

    let response = client
        .put(format!("{}/livros/999999/", BASE_URL))
        .json(&json!({
            "titulo": "Livro Não Encontrado",
            "autor": 1,
            "categoria": 1,
            "publicado_em": "2023-10-05"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);

    let response = client
        .delete(format!("{}/livros/999999/", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_livro_method_not_allowed() {
    let client = Client::new();

    let response = client
        .delete(format!("{}/livros/", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 405);
}

#[tokio::test]
#[ignore]
async fn test_colecao_requires_authentication() {
    let client = Client::new();

    let response = client
        .get(format!("{}/colecoes/", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 401);

    let response = client
        .post(format!("{}/colecoes/", BASE_URL))
        .json(&json!({"nome": "Sem Token"}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_colecao_owner_can_mutate() {
    let client = Client::new();
    let token = get_auth_token(&client, "admin", "admin").await;

    let response = client
        .post(format!("{}/colecoes/", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "nome": "Favoritos",
            "descricao": "Minha estante"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let colecao_id = body["id"].as_i64().expect("No colecao id");

    let response = client
        .patch(format!("{}/colecoes/{}/", BASE_URL, colecao_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({"descricao": "Estante renomeada"}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let response = client
        .delete(format!("{}/colecoes/{}/", BASE_URL, colecao_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_colecao_non_owner_is_forbidden() {
    let client = Client::new();
    let owner_token = get_auth_token(&client, "admin", "admin").await;
    let other_token = get_auth_token(&client, "leitor", "leitor").await;

    let body: Value = client
        .post(format!("{}/colecoes/", BASE_URL))
        .header("Authorization", format!("Bearer {}", owner_token))
        .json(&json!({"nome": "Só do Admin"}))
        .send()
        .await
        .expect("Failed to create colecao")
        .json()
        .await
        .expect("Failed to parse colecao");
    let colecao_id = body["id"].as_i64().expect("No colecao id");

    // Any authenticated user may read
    let response = client
        .get(format!("{}/colecoes/{}/", BASE_URL, colecao_id))
        .header("Authorization", format!("Bearer {}", other_token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    // Only the owner may write
    let response = client
        .patch(format!("{}/colecoes/{}/", BASE_URL, colecao_id))
        .header("Authorization", format!("Bearer {}", other_token))
        .json(&json!({"nome": "Tomada"}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);

    let response = client
        .delete(format!("{}/colecoes/{}/", BASE_URL, colecao_id))
        .header("Authorization", format!("Bearer {}", other_token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);

    // Cleanup by the owner
    let _ = client
        .delete(format!("{}/colecoes/{}/", BASE_URL, colecao_id))
        .header("Authorization", format!("Bearer {}", owner_token))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_colecao_not_found() {
    let client = Client::new();
    let token = get_auth_token(&client, "admin", "admin").await;

    let response = client
        .get(format!("{}/colecoes/999999/", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);

    let response = client
        .patch(format!("{}/colecoes/999999/", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({"nome": "Inexistente"}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);

    let response = client
        .delete(format!("{}/colecoes/999999/", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_bootstrap_users_can_login() {
    let client = Client::new();

    // Both accounts from config/default.toml are provisioned at startup
    for (username, password) in [("admin", "admin"), ("leitor", "leitor")] {
        let response = client
            .post(format!("{}/auth/login", BASE_URL))
            .json(&json!({"username": username, "password": password}))
            .send()
            .await
            .expect("Failed to send request");
        assert!(
            response.status().is_success(),
            "bootstrap user {} cannot log in",
            username
        );
    }
}

#[tokio::test]
#[ignore]
async fn test_pagination_envelope_reflects_served_bounds() {
    let client = Client::new();

    let body: Value = client
        .get(format!("{}/livros/?page=0&per_page=1000", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    // Out-of-range values are clamped, and the envelope echoes what was served
    assert_eq!(body["page"].as_i64(), Some(1));
    assert_eq!(body["per_page"].as_i64(), Some(100));
    assert!(body["items"].as_array().expect("No items").len() <= 100);
}
