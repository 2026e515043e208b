//! Background image generation: validate, screen, then one image call.

mod screening;

use screening::Screening;

use tracing::{info, warn};

use crate::client::{ClientError, DynImageClient, DynLlmClient, GeneratedImage, ImageGenerationRequest};
use crate::config::ModelSettings;
use crate::error::ServiceError;
use crate::validator;

pub const IMAGE_SIZE: &str = "1024x1024";
pub const IMAGE_QUALITY: &str = "standard";

pub const CONTENT_POLICY_MESSAGE: &str = "This prompt may violate content policies. Please try a different, more appropriate description.";
pub const INVALID_PROMPT_MESSAGE: &str = "The prompt doesn't make sense or is invalid. Please provide a clearer description of the background you want.";
pub const GENERATION_FAILED: &str = "Image generation is unavailable right now. Please try again later.";

pub async fn generate_background(
    llm: &DynLlmClient,
    images: &DynImageClient,
    prompt: &str,
    models: &ModelSettings,
) -> Result<GeneratedImage, ServiceError> {
    validator::validate_image_prompt(prompt)?;
    let prompt = prompt.trim();

    match screening::screen(prompt) {
        Screening::Rejected(message) => return Err(ServiceError::rejected(message)),
        Screening::Accepted => {}
        Screening::NeedsReview => {
            if let Some(reason) = screening::review(llm, prompt, models).await {
                return Err(ServiceError::rejected(reason));
            }
        }
    }

    let request = ImageGenerationRequest {
        model: models.image.clone(),
        prompt: prompt.to_string(),
        size: IMAGE_SIZE.to_string(),
        quality: IMAGE_QUALITY.to_string(),
        n: 1,
        response_format: "b64_json".to_string(),
    };

    let image = images.generate_image(request).await.map_err(|err| {
        warn!(error = %err, "image generation failed");
        match err {
            err if err.is_content_policy() => {
                ServiceError::ContentPolicy(CONTENT_POLICY_MESSAGE.to_string())
            }
            ClientError::BadRequest(_) => ServiceError::rejected(INVALID_PROMPT_MESSAGE),
            _ => ServiceError::upstream(GENERATION_FAILED),
        }
    })?;

    info!(bytes = image.data_url.len(), "background image generated");
    Ok(image)
}

#[cfg(test)]
mod tests;
