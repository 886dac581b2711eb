//! Biblioteca Server - Library Catalog API

use axum::{
    routing::get,
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use biblioteca_server::{
    api,
    config::AppConfig,
    repository::Repository,
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            format!("biblioteca_server={},tower_http=debug", config.logging.level).into()
        });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Biblioteca Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, config.auth.clone());

    // Provision configured accounts that do not exist yet
    for user in &config.auth.bootstrap_users {
        if let Some(created) = services
            .auth
            .provision_user(&user.username, &user.password)
            .await
            .expect("Failed to provision bootstrap user")
        {
            tracing::info!("Provisioned bootstrap user {}", created.username);
        }
    }

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
///
/// Unsupported verbs on a matched path fall through to axum's built-in
/// 405 response (e.g. DELETE on the book list route).
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let routes = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Authentication
        .route("/auth/login", axum::routing::post(api::auth::login))
        .route("/auth/me", get(api::auth::me))
        // Livros (open access)
        .route(
            "/livros/",
            get(api::livros::list_livros).post(api::livros::create_livro),
        )
        // Alternate creation endpoint kept for older clients
        .route("/livros/create/", axum::routing::post(api::livros::create_livro))
        .route(
            "/livros/:id/",
            get(api::livros::get_livro)
                .put(api::livros::update_livro)
                .delete(api::livros::delete_livro),
        )
        // Autores
        .route(
            "/autores/",
            get(api::autores::list_autores).post(api::autores::create_autor),
        )
        .route(
            "/autores/:id/",
            get(api::autores::get_autor)
                .put(api::autores::update_autor)
                .delete(api::autores::delete_autor),
        )
        // Categorias
        .route(
            "/categorias/",
            get(api::categorias::list_categorias).post(api::categorias::create_categoria),
        )
        .route(
            "/categorias/:id/",
            get(api::categorias::get_categoria)
                .put(api::categorias::update_categoria)
                .delete(api::categorias::delete_categoria),
        )
        // Colecoes (authentication required; ownership for mutation)
        .route(
            "/colecoes/",
            get(api::colecoes::list_colecoes).post(api::colecoes::create_colecao),
        )
        .route(
            "/colecoes/:id/",
            get(api::colecoes::get_colecao)
                .patch(api::colecoes::update_colecao)
                .delete(api::colecoes::delete_colecao),
        )
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .merge(routes)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
