//! Client for the business registration lookup API.

use configs::BusinessRegistryConfig;
use tracing::{debug, instrument};

use crate::errors::ServiceError;

#[derive(Clone)]
pub struct BusinessRegistryClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl BusinessRegistryClient {
    pub fn new(client: reqwest::Client, base_url: &str, api_key: &str) -> Self {
        Self { client, base_url: base_url.to_string(), api_key: api_key.to_string() }
    }

    pub fn from_config(cfg: &BusinessRegistryConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(std::time::Duration::from_secs(10)).build()?;
        Ok(Self::new(client, &cfg.base_url, &cfg.api_key))
    }

    /// Look up an active business by owner name and registration number.
    ///
    /// The registry's response body is returned untouched.
    #[instrument(skip(self))]
    pub async fn lookup(&self, master_name: &str, seller_num: &str) -> Result<String, ServiceError> {
        let resp = self
            .client
            .get(&self.base_url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("gb", "1"),
                ("status", "Y"),
                ("ceo", master_name),
                ("q", seller_num),
                ("type", "json"),
            ])
            .send()
            .await
            .map_err(|e| ServiceError::Upstream(e.to_string()))?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| ServiceError::Upstream(e.to_string()))?;
        if !status.is_success() {
            return Err(ServiceError::Upstream(format!("registry returned {status}: {body}")));
        }
        debug!(bytes = body.len(), "registry answered");
        Ok(body)
    }
}
