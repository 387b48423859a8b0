use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use url::Url;

use crate::api::dto::ErrorBody;
use crate::error::{Result, StargazeError, UpstreamCall};
use crate::models::{ExplanationRecord, ImagePayload, ImageQuery, ImageQueryParams, ImageRecord};

/// The two gateway operations the controller depends on.
#[async_trait]
pub trait GatewayApi: Send + Sync {
    /// One call to the image gateway. Single records come back as a
    /// one-element vector; ranges keep the gateway's order.
    async fn fetch_images(&self, query: ImageQuery) -> Result<Vec<ImageRecord>>;

    /// One call to the explanation gateway.
    async fn explain(&self, image: &ImageRecord) -> Result<ExplanationRecord>;
}

/// [`GatewayApi`] over HTTP against a running `stargaze serve`.
#[derive(Clone, Debug)]
pub struct HttpGateway {
    client: Client,
    base_url: Url,
}

#[derive(Serialize)]
struct ExplainBody<'a> {
    image: &'a ImageRecord,
}

impl HttpGateway {
    pub fn new(base_url: &str) -> Result<Self> {
        // A trailing slash makes `join` append instead of replacing the last segment.
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized).map_err(|e| {
            StargazeError::Configuration(format!("Invalid gateway URL '{base_url}': {e}"))
        })?;

        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| StargazeError::Internal(format!("Invalid gateway path '{path}': {e}")))
    }

    /// Non-2xx answers become an upstream error carrying the gateway's own
    /// `{"error": ...}` message when it sent one.
    async fn read<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        call: UpstreamCall,
    ) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let detail = match response.json::<ErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => format!("gateway returned {status}"),
            };
            return Err(StargazeError::Upstream { call, detail });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| StargazeError::Upstream {
                call,
                detail: format!("Malformed gateway response: {e}"),
            })
    }
}

#[async_trait]
impl GatewayApi for HttpGateway {
    async fn fetch_images(&self, query: ImageQuery) -> Result<Vec<ImageRecord>> {
        let params = ImageQueryParams::from(query);
        let response = self
            .client
            .get(self.endpoint("api/nasa")?)
            .query(&params)
            .send()
            .await
            .map_err(|e| StargazeError::from(e).during(UpstreamCall::FetchImages))?;

        let payload: ImagePayload = Self::read(response, UpstreamCall::FetchImages).await?;
        Ok(payload.into_records())
    }

    async fn explain(&self, image: &ImageRecord) -> Result<ExplanationRecord> {
        let response = self
            .client
            .post(self.endpoint("api/explain")?)
            .json(&ExplainBody { image })
            .send()
            .await
            .map_err(|e| StargazeError::from(e).during(UpstreamCall::Explain))?;

        Self::read(response, UpstreamCall::Explain).await
    }
}
