use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info, instrument};

use super::schema::license_report_schema;
use super::{Envelope, EnvelopeProvider};
use crate::config::ScrapeConfig;
use crate::error::{Result, ScraperError};

pub const FIRECRAWL_PROVIDER: &str = "firecrawl";

/// Client for Firecrawl's hosted scrape endpoint with JSON extraction
pub struct FirecrawlClient {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
}

impl FirecrawlClient {
    pub fn new(config: &ScrapeConfig, api_key: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn scrape_url(&self) -> String {
        format!("{}/v2/scrape", self.api_base)
    }

    fn request_body(url: &str) -> Value {
        json!({
            "url": url,
            "formats": [{
                "type": "json",
                "schema": license_report_schema()
            }]
        })
    }
}

/// Pull the extracted document out of a scrape response.
///
/// A response flagged unsuccessful is an API error. A successful response with
/// no `data.json` yields `Value::Null` so the caller can record the shape.
pub fn envelope_from_response(body: Value) -> Result<Envelope> {
    if body.get("success").and_then(Value::as_bool) == Some(false) {
        let message = body
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("scrape reported success=false")
            .to_string();
        return Err(ScraperError::Api { message });
    }
    Ok(body
        .get("data")
        .and_then(|data| data.get("json"))
        .cloned()
        .unwrap_or(Value::Null))
}

#[async_trait]
impl EnvelopeProvider for FirecrawlClient {
    fn provider_name(&self) -> &'static str {
        FIRECRAWL_PROVIDER
    }

    #[instrument(skip(self), fields(provider = FIRECRAWL_PROVIDER))]
    async fn fetch_envelope(&self, url: &str) -> Result<Envelope> {
        info!("Requesting scrape of {}", url);
        let response = self
            .client
            .post(self.scrape_url())
            .bearer_auth(&self.api_key)
            .json(&Self::request_body(url))
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        debug!("Scrape responded with status {} ({} bytes)", status, text.len());

        if !status.is_success() {
            return Err(ScraperError::Api {
                message: format!("scrape returned HTTP {}: {}", status.as_u16(), text),
            });
        }

        let body: Value = serde_json::from_str(&text)?;
        envelope_from_response(body)
    }
}
