use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::ApodConfig;
use crate::error::{Result, StargazeError, UpstreamCall};
use crate::models::{DateRange, ImagePayload, ImageQuery, ImageRecord};

pub const MISSING_API_KEY: &str = "NASA API key not configured";

/// Client for the Astronomy Picture of the Day endpoint.
///
/// Every method issues exactly one GET; nothing is cached or retried.
#[derive(Clone, Debug)]
pub struct ApodClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl ApodClient {
    /// Fails with a configuration error when no API key is set, before any
    /// network activity.
    pub fn new(config: &ApodConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| StargazeError::Configuration(MISSING_API_KEY.to_string()))?;

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| StargazeError::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch(&self, query: &ImageQuery) -> Result<ImagePayload> {
        match query {
            ImageQuery::Today => self.today().await.map(ImagePayload::Single),
            ImageQuery::Date(_) => self.get(query).await.map(ImagePayload::Single),
            ImageQuery::Range(range) => self.range(range).await.map(ImagePayload::Many),
        }
    }

    pub async fn today(&self) -> Result<ImageRecord> {
        self.get(&ImageQuery::Today).await
    }

    /// The upstream serves ranges natively, ascending by date.
    pub async fn range(&self, range: &DateRange) -> Result<Vec<ImageRecord>> {
        let records: Vec<ImageRecord> = self.get(&ImageQuery::Range(*range)).await?;
        if records.len() as i64 != range.days() {
            tracing::debug!(
                requested_days = range.days(),
                records = records.len(),
                "APOD range has gaps"
            );
        }
        Ok(records)
    }

    async fn get<T: DeserializeOwned>(&self, query: &ImageQuery) -> Result<T> {
        let mut params = vec![("api_key", self.api_key.clone())];
        params.extend(query.upstream_params());

        tracing::debug!(?query, "Requesting APOD");

        let response = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| upstream(format!("Request failed: {}", e.without_url())))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| upstream(format!("Failed to read response body: {e}")))?;

        if !status.is_success() {
            return Err(upstream(format!("APOD API error {status}: {body}")));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::debug!(
                response_preview = %body.chars().take(100).collect::<String>(),
                "Unparseable APOD response"
            );
            upstream(format!("Failed to parse APOD response: {e}"))
        })
    }
}

fn upstream(detail: String) -> StargazeError {
    StargazeError::Upstream {
        call: UpstreamCall::FetchImages,
        detail,
    }
}
