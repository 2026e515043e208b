use axum::Json;
use axum::extract::State;
use tracing::info;

use crate::error::ServiceError;
use crate::expander::{self, ExpandedStep, StepReference};
use crate::image;
use crate::pipeline::LearnResponse;

use super::AppState;
use super::types::{ApiJson, HealthResponse, ImageRequest, ImageResponse, LearnRequest};

pub(super) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        app: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        provider: state.config.llm.provider.to_string(),
        api_key_configured: !state.config.llm.api_key.trim().is_empty(),
    })
}

pub(super) async fn learn(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LearnRequest>,
) -> Result<Json<LearnResponse>, ServiceError> {
    state.require_credentials()?;
    info!(chars = request.topic.chars().count(), "learning plan requested");
    let response = state.orchestrator.run(&request.topic).await?;
    Ok(Json(response))
}

pub(super) async fn expand_step(
    State(state): State<AppState>,
    ApiJson(reference): ApiJson<StepReference>,
) -> Result<Json<ExpandedStep>, ServiceError> {
    state.require_credentials()?;
    info!(step = %reference.step_title, "step expansion requested");
    let expanded = expander::expand_step(state.llm.as_ref(), &reference, &state.config.models).await?;
    Ok(Json(expanded))
}

pub(super) async fn generate_image(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ImageRequest>,
) -> Result<Json<ImageResponse>, ServiceError> {
    state.require_credentials()?;
    info!(chars = request.prompt.chars().count(), "background image requested");
    let image = image::generate_background(
        state.llm.as_ref(),
        state.images.as_ref(),
        &request.prompt,
        &state.config.models,
    )
    .await?;
    Ok(Json(ImageResponse {
        image_url: image.data_url,
    }))
}
