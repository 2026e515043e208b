//! HTTP surface: three JSON endpoints plus a health probe.

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::client::{AIClient, DynImageClient, DynLlmClient};
use crate::config::Config;
use crate::error::ServiceError;
use crate::pipeline::LearningOrchestrator;

/// Read-only state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub orchestrator: Arc<LearningOrchestrator>,
    pub llm: Arc<DynLlmClient>,
    pub images: Arc<DynImageClient>,
}

impl AppState {
    pub fn new(config: Config, llm: Arc<DynLlmClient>, images: Arc<DynImageClient>) -> Self {
        let orchestrator = LearningOrchestrator::standard(llm.clone(), &config);
        Self {
            config: Arc::new(config),
            orchestrator: Arc::new(orchestrator),
            llm,
            images,
        }
    }

    /// Fails when no API key is configured for the provider.
    pub(crate) fn require_credentials(&self) -> Result<(), ServiceError> {
        if self.config.llm.api_key.trim().is_empty() {
            return Err(ServiceError::Configuration(format!(
                "{} is not configured",
                self.config.llm.provider.api_key_env_var()
            )));
        }
        Ok(())
    }

    /// One upstream HTTP client serves both chat and image calls.
    pub fn from_config(config: Config) -> Result<Self> {
        let client = Arc::new(AIClient::new(&config.llm)?);
        Ok(Self::new(config, client.clone(), client))
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health))
        .route("/api/learn", post(handlers::learn))
        .route("/api/expand-step", post(handlers::expand_step))
        .route("/api/generate-image", post(handlers::generate_image))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run_serve(state: AppState, bind: &str, port: u16) -> Result<()> {
    let stages = state.orchestrator.stage_count();
    let app = build_router(state);
    let addr: SocketAddr = format!("{bind}:{port}").parse()?;
    tracing::info!(stages, "learnkit listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("learnkit shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}
