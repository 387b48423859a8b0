use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequest, CreateChatCompletionRequestArgs, CreateChatCompletionResponse,
    },
    Client,
};

use crate::{
    config::ExplainConfig,
    error::{Result, StargazeError},
};

pub const MISSING_API_KEY: &str = "Gemini API key not configured";

/// Chat-completions client for the explanation source.
///
/// One call to [`LlmApiClient::complete`] is one upstream request. The
/// underlying client's own backoff is disabled so transient failures surface
/// immediately instead of being retried.
#[derive(Clone)]
pub struct LlmApiClient {
    client: Client<OpenAIConfig>,
    model: String,
    base_url: String,
}

impl LlmApiClient {
    pub fn new(config: &ExplainConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| StargazeError::Configuration(MISSING_API_KEY.to_string()))?;

        let base_url = config.base_url.trim_end_matches('/').to_string();

        let openai_config = OpenAIConfig::new()
            .with_api_base(base_url.clone())
            .with_api_key(api_key);

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder.build().map_err(|error| {
            StargazeError::Internal(format!("Failed to create LLM HTTP client: {error}"))
        })?;

        let backoff = backoff::ExponentialBackoff {
            max_elapsed_time: Some(Duration::ZERO),
            ..Default::default()
        };

        let client = Client::with_config(openai_config)
            .with_http_client(http_client)
            .with_backoff(backoff);

        Ok(Self {
            client,
            model: config.model.clone(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// One completion whose content must be non-empty. Whitespace counts as
    /// content and is left for the caller to interpret.
    pub async fn complete(&self, prompt: &str, system_prompt: Option<&str>) -> Result<String> {
        let content = self.complete_text(prompt, system_prompt).await?;

        if content.is_empty() {
            return Err(StargazeError::Llm(
                "LLM response contained empty content".to_string(),
            ));
        }

        Ok(content)
    }

    /// One completion; an empty answer is returned as an empty string.
    pub async fn complete_text(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
    ) -> Result<String> {
        if prompt.trim().is_empty() {
            return Err(StargazeError::Validation("Prompt cannot be empty".to_string()));
        }

        let request = self.build_request(prompt, system_prompt)?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(Self::map_openai_error)?;

        let content = Self::extract_content(response)?;
        tracing::debug!(response_len = content.len(), "LLM response received");
        Ok(content)
    }

    fn build_request(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
    ) -> Result<CreateChatCompletionRequest> {
        let mut messages = Vec::new();

        if let Some(system_prompt) = system_prompt.filter(|value| !value.trim().is_empty()) {
            messages.push(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system_prompt)
                    .build()
                    .map_err(|error| {
                        StargazeError::Validation(format!("Invalid system prompt: {error}"))
                    })?
                    .into(),
            );
        }

        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()
                .map_err(|error| {
                    StargazeError::Validation(format!("Invalid user prompt: {error}"))
                })?
                .into(),
        );

        CreateChatCompletionRequestArgs::default()
            .model(self.model.clone())
            .messages(messages)
            .build()
            .map_err(|error| {
                StargazeError::Validation(format!("Invalid LLM completion request: {error}"))
            })
    }

    fn extract_content(response: CreateChatCompletionResponse) -> Result<String> {
        let message = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| StargazeError::Llm("LLM response contained no choices".to_string()))?
            .message
            .content
            .unwrap_or_default();

        Ok(message)
    }

    fn map_openai_error(error: OpenAIError) -> StargazeError {
        match error {
            OpenAIError::Reqwest(reqwest_error) => {
                StargazeError::Llm(format!("LLM request failed: {reqwest_error}"))
            }
            OpenAIError::ApiError(api_error) => {
                StargazeError::Llm(format!("LLM API error: {api_error}"))
            }
            OpenAIError::JSONDeserialize(err) => {
                StargazeError::Llm(format!("Failed to parse LLM response: {err}"))
            }
            other => StargazeError::Llm(other.to_string()),
        }
    }
}
