pub mod firecrawl;
pub mod schema;

use async_trait::async_trait;

use crate::error::Result;

/// The raw response envelope handed back by a fetch provider
pub type Envelope = serde_json::Value;

/// A source that can turn a page URL into a structured envelope
#[async_trait]
pub trait EnvelopeProvider: Send + Sync {
    /// Short identifier used in logs
    fn provider_name(&self) -> &'static str;

    /// Fetch and extract the page. Only transport and API failures are errors;
    /// an envelope of the wrong shape is returned as-is for the pipeline to judge.
    async fn fetch_envelope(&self, url: &str) -> Result<Envelope>;
}
