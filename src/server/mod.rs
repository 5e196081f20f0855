use anyhow::{Context, Result};
use axum::{
    extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router,
};
use popcorn_common::Outcome;
use popcorn_db::DataManager;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Shared application context
#[derive(Clone)]
pub struct AppContext {
    pub manager: Arc<dyn DataManager>,
}

/// Create the Axum router with all routes
pub fn create_router(ctx: AppContext) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/users", get(list_users))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

async fn home() -> &'static str {
    "Welcome to MovieWeb App!"
}

/// Names of all users, oldest first.
async fn list_users(State(ctx): State<AppContext>) -> impl IntoResponse {
    match ctx.manager.get_all_users() {
        Outcome::Done(users) => {
            let names: Vec<String> = users.into_iter().map(|u| u.name).collect();
            Json(names).into_response()
        }
        Outcome::NotFound => Json(Vec::<String>::new()).into_response(),
        Outcome::Failed(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}

async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

/// Start the HTTP server and run until Ctrl-C / SIGTERM.
pub async fn start_server(config: &ServerConfig, manager: Arc<dyn DataManager>) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid server address")?;

    let app = create_router(AppContext { manager });

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
