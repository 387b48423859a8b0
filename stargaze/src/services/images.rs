use std::sync::Arc;

use crate::apod::{ApodClient, MISSING_API_KEY};
use crate::config::ApodConfig;
use crate::error::{Result, StargazeError};
use crate::models::{ImagePayload, ImageQuery};

/// Image Fetch Gateway logic, independent of HTTP framing.
///
/// The upstream client is built per call from the configuration held here,
/// so a missing credential is reported before anything goes over the wire.
#[derive(Clone)]
pub struct ImageService {
    config: Arc<ApodConfig>,
}

impl ImageService {
    pub fn new(config: ApodConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// Configuration error when the image source has no credential.
    pub fn ensure_configured(&self) -> Result<()> {
        if self.is_configured() {
            Ok(())
        } else {
            Err(StargazeError::Configuration(MISSING_API_KEY.to_string()))
        }
    }

    pub async fn fetch(&self, query: ImageQuery) -> Result<ImagePayload> {
        let client = ApodClient::new(&self.config)?;
        let payload = client.fetch(&query).await?;

        if payload.is_empty() {
            tracing::warn!(?query, "APOD returned no records");
        } else {
            tracing::info!(?query, records = payload.len(), "Fetched APOD records");
        }
        Ok(payload)
    }
}
