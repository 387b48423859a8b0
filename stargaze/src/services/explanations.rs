use std::sync::Arc;

use crate::config::ExplainConfig;
use crate::error::{Result, StargazeError, UpstreamCall};
use crate::llm::prompts::{collection_summary_prompt, explanation_prompt, ASTRONOMY_EDUCATOR};
use crate::llm::{parse_explanation, LlmApiClient};
use crate::models::{Explanation, ImageRecord, FALLBACK_COLLECTION_SUMMARY};

/// Explanation Gateway logic: one prompt, one upstream call, one normalized
/// result.
#[derive(Clone)]
pub struct ExplanationService {
    config: Arc<ExplainConfig>,
}

impl ExplanationService {
    pub fn new(config: ExplainConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Explain one image. Malformed model output is not an error; it comes
    /// back as [`Explanation::Degraded`].
    pub async fn explain(&self, image: &ImageRecord) -> Result<Explanation> {
        let client = LlmApiClient::new(&self.config)?;
        let prompt = explanation_prompt(image);

        let content = client
            .complete(&prompt, Some(ASTRONOMY_EDUCATOR))
            .await
            .map_err(|e| e.during(UpstreamCall::Explain))?;

        let explanation = parse_explanation(&content);
        tracing::info!(
            date = %image.date,
            degraded = explanation.is_degraded(),
            "Generated explanation"
        );
        Ok(explanation)
    }

    /// Summarize a collection of images in a few sentences.
    pub async fn summarize(&self, images: &[ImageRecord]) -> Result<String> {
        if images.is_empty() {
            return Err(StargazeError::Validation(
                "At least one image is required".to_string(),
            ));
        }

        let client = LlmApiClient::new(&self.config)?;
        let prompt = collection_summary_prompt(images);

        let content = client
            .complete_text(&prompt, Some(ASTRONOMY_EDUCATOR))
            .await
            .map_err(|e| e.during(UpstreamCall::Summarize))?;

        let summary = match content.trim() {
            "" => FALLBACK_COLLECTION_SUMMARY.to_string(),
            text => text.to_string(),
        };

        tracing::info!(images = images.len(), "Generated collection summary");
        Ok(summary)
    }
}
