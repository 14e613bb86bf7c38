mod auth;
mod error;
mod handlers;
mod models;
mod moderation;
mod rest;

use std::sync::{
    atomic::AtomicU64,
    Arc,
};

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::auth::{session::SessionService, token::TokenSigner};

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub signer: TokenSigner,
    pub webhook_key: String,
    pub platform: String,
    pub hits: Arc<AtomicU64>,
}

impl AppState {
    pub fn sessions(&self) -> SessionService {
        SessionService::new(self.db.clone(), self.signer.clone())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warbler=debug,tower_http=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Secrets and platform config come from the environment; a missing one
    // is fatal here, never a per-request error.
    let db_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let jwt_secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");
    let webhook_key = std::env::var("WEBHOOK_API_KEY").expect("WEBHOOK_API_KEY must be set");
    let platform = std::env::var("PLATFORM").expect("PLATFORM must be set");

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await
        .expect("Failed to connect to DB");
    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let app_state = AppState {
        db: pool,
        signer: TokenSigner::new(&jwt_secret),
        webhook_key,
        platform,
        hits: Arc::new(AtomicU64::new(0)),
    };

    let app = rest::router(app_state);
    let addr = "0.0.0.0:8080";
    tracing::info!("API listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
