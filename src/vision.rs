//! Best-effort client for the vision-language analysis service.
//!
//! The upload flow asks it to describe an outfit photo ("denim jacket",
//! "sneakers", ...) and stores the labels on the post record. Those labels
//! are their own namespace - they never get reconciled into a tag catalog.
//!
//! Analysis is a nicety. If the service is down, slow, or confused, the
//! post still goes up, so every failure here degrades to an empty label
//! list with a warning in the log.

use std::time::Duration;

use serde::Deserialize;

use crate::{config::Config, error::VisionError};

const USER_AGENT: &str = "Lookbook/0.1.0 (https://github.com/lookbook-app/lookbook)";

pub struct VisionClient {
    http_client: reqwest::Client,
    base_url: String,
    enabled: bool,
}

/// What the analysis endpoint answers with.
#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    labels: Vec<String>,
}

impl VisionClient {
    /// Builds a client from the shared app config.
    pub async fn from_config() -> Result<Self, VisionError> {
        let conf = Config::read().await;
        Self::new(&conf.vision.base_url, conf.vision.enabled)
    }

    pub fn new(base_url: &str, enabled: bool) -> Result<Self, VisionError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(20))
            .build()
            .map_err(|e| VisionError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            enabled,
        })
    }

    /// Labels for the image at `image_url`.
    ///
    /// Best-effort: any failure comes back as an empty list, never an
    /// error, so callers can fire this and keep moving.
    pub async fn labels_for(&self, image_url: &str) -> Vec<String> {
        if !self.enabled {
            return Vec::new();
        }

        self.analyze(image_url).await.unwrap_or_else(|e| {
            tracing::warn!("vision analysis failed. posting without labels. err: {e}");
            Vec::new()
        })
    }

    async fn analyze(&self, image_url: &str) -> Result<Vec<String>, VisionError> {
        let response = self
            .http_client
            .post(format!("{}/analyze", self.base_url))
            .json(&serde_json::json!({ "image_url": image_url }))
            .send()
            .await
            .map_err(|e| VisionError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(VisionError::Api(status.as_u16()));
        }

        let parsed: AnalyzeResponse = response
            .json()
            .await
            .map_err(|e| VisionError::Parse(e.to_string()))?;

        // labels sometimes come back padded or blank. tidy them before
        // anything downstream stores them
        Ok(parsed
            .labels
            .into_iter()
            .map(|label| label.trim().to_string())
            .filter(|label| !label.is_empty())
            .collect())
    }
}
