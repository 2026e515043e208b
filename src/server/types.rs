use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

#[derive(Debug, Clone, Deserialize)]
pub struct LearnRequest {
    pub topic: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageRequest {
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageResponse {
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub app: &'static str,
    pub version: &'static str,
    pub provider: String,
    pub api_key_configured: bool,
}

/// `Json` whose rejections are reported as `400 {detail}`.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ServiceError::MalformedRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}
