//! Router assembly and server entry point.

use std::sync::Arc;

use axum::{extract::State, response::Json, routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::llm::{OpenRouterClient, TextGenerator};
use crate::registry::{AgentRegistry, WorkflowRegistry};

use super::agents as agents_api;
use super::generate as generate_api;
use super::projects as projects_api;
use super::types::HealthResponse;
use super::workflows as workflows_api;

/// Shared application state.
///
/// Constructed once per process in [`serve`] and passed to handlers by
/// reference; there is no ambient global state.
pub struct AppState {
    pub config: Config,
    /// Agents, their tasks, and performance metrics
    pub agents: Arc<AgentRegistry>,
    /// Workflows and projects
    pub workflows: Arc<WorkflowRegistry>,
    /// Text-generation backend for `/api/generate`
    pub llm: Arc<dyn TextGenerator>,
}

/// Start the HTTP server.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let agents = Arc::new(AgentRegistry::new());
    let workflows = Arc::new(WorkflowRegistry::new(Arc::clone(&agents)));
    let llm: Arc<dyn TextGenerator> = Arc::new(OpenRouterClient::new(
        config.api_key.clone(),
        config.default_model.clone(),
    ));

    let state = Arc::new(AppState {
        config: config.clone(),
        agents,
        workflows,
        llm,
    });

    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/generate", axum::routing::post(generate_api::generate))
        .nest("/api/agents", agents_api::routes())
        .nest("/api/tasks", agents_api::task_routes())
        .nest("/api/workflows", workflows_api::routes())
        .nest("/api/projects", projects_api::routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::clone(&state));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for SIGTERM/SIGINT.
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

    tracing::info!("Shutdown signal received");
}

/// Health check endpoint.
async fn health(State(_state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
