//! reqwest-backed gateway talking to the automation webhooks

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::{Endpoint, Gateway, GatewayError};
use crate::config::WebhooksConfig;

/// Posts stage payloads to the configured webhook URLs.
pub struct WebhookGateway {
    client: Client,
    webhooks: WebhooksConfig,
}

impl WebhookGateway {
    pub fn new(webhooks: &WebhooksConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("podflow/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            webhooks: webhooks.clone(),
        })
    }

    /// Resolved URL for an endpoint
    pub fn url(&self, endpoint: Endpoint) -> String {
        self.webhooks.url_for(endpoint)
    }
}

#[async_trait]
impl Gateway for WebhookGateway {
    async fn call(&self, endpoint: Endpoint, payload: Value) -> Result<Value, GatewayError> {
        let url = self.url(endpoint);
        tracing::info!(%endpoint, %url, "Calling webhook");
        tracing::debug!(%endpoint, payload = %payload, "Webhook request body");

        // `.json()` sets Content-Type: application/json
        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(%endpoint, error = %e, "Webhook request failed");
                GatewayError::network(endpoint, e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%endpoint, status = %status, "Webhook returned non-success status");
            return Err(GatewayError::http(endpoint, status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::network(endpoint, e.to_string()))?;

        let data: Value = serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(%endpoint, error = %e, "Webhook response is not JSON");
            GatewayError::malformed(endpoint, e.to_string())
        })?;

        tracing::debug!(%endpoint, status = %status, "Webhook call succeeded");
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_uses_config() {
        let webhooks = WebhooksConfig {
            base_url: "http://n8n.local/webhook/".to_string(),
            ..WebhooksConfig::default()
        };
        let gateway = WebhookGateway::new(&webhooks).unwrap();
        assert_eq!(
            gateway.url(Endpoint::CreateScript),
            "http://n8n.local/webhook/RunPromt"
        );
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        // Port 9 (discard) on loopback is essentially never listening
        let webhooks = WebhooksConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..WebhooksConfig::default()
        };
        let gateway = WebhookGateway::new(&webhooks).unwrap();
        let err = gateway
            .call(Endpoint::InitializeProject, serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Network { .. }));
    }
}
