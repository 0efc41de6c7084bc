mod api;
mod config;
#[cfg(feature = "postgres")]
mod db;
mod models;
#[cfg(feature = "postgres")]
mod raw_sql;
#[cfg(feature = "postgres")]
mod schema;
mod store;
mod telemetry;

use axum::Router;
use config::{Config, ConfigError};
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use store::{MemoryStore, RecipeStore};
use thiserror::Error;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across all handlers
pub type AppState = Arc<dyn RecipeStore>;

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[cfg(feature = "postgres")]
    #[error(transparent)]
    Database(#[from] db::DbSetupError),

    #[cfg(not(feature = "postgres"))]
    #[error("DATABASE_URL is set but this build has no postgres support (enable the `postgres` feature)")]
    PostgresDisabled,

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(std::io::Error),
}

/// Pick the store: Postgres when DATABASE_URL is set, otherwise memory
/// preloaded from the seed file.
fn build_store(config: &Config) -> Result<AppState, StartupError> {
    if let Some(database_url) = &config.database_url {
        #[cfg(feature = "postgres")]
        {
            let pool = db::create_pool(database_url)?;
            return Ok(Arc::new(store::PgStore::new(pool)));
        }

        #[cfg(not(feature = "postgres"))]
        {
            let _ = database_url;
            return Err(StartupError::PostgresDisabled);
        }
    }

    Ok(Arc::new(MemoryStore::from_seed_file(&config.seed_file)))
}

fn build_router(store: AppState) -> Router {
    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::openapi());

    let router = Router::new()
        .merge(api::recipes::router())
        .merge(api::testing::router())
        .merge(swagger_ui)
        .with_state(store);

    telemetry::with_http_tracing(router)
}

async fn run() -> Result<(), StartupError> {
    let config = Config::from_env()?;

    let store = build_store(&config)?;
    tracing::info!("Using {} recipe store", store.backend_name());

    let app = build_router(store);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .map_err(|source| StartupError::Bind {
            addr: config.bind_addr,
            source,
        })?;

    tracing::info!("Server listening on {}", config.bind_addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", config.bind_addr);
    tracing::info!(
        "OpenAPI spec available at http://{}/api-docs/openapi.json",
        config.bind_addr
    );

    axum::serve(listener, app)
        .await
        .map_err(StartupError::Serve)
}

#[tokio::main]
async fn main() {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        match api::openapi().to_pretty_json() {
            Ok(spec) => println!("{}", spec),
            Err(e) => {
                eprintln!("Failed to render OpenAPI spec: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    telemetry::init_telemetry();

    if let Err(e) = run().await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
