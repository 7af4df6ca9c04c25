//! Verifier client speaking the connector verifier HTTP contract

use crate::error::{ConnectorError, ConnectorResult};
use crate::http::settings::VerifierSettings;
use crate::http::timeout_manager::TimeoutManager;
use async_trait::async_trait;
use dynact_core::{PropertyValues, VerificationError, VerificationResult, Verifier};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use std::time::Instant;
use url::Url;

/// Longest slice of an error body carried into `Rejected`.
const MAX_ERROR_BODY: usize = 1024;

/// One POST per call to `{url}/api/v1/connectors/{connector}/actions/{action}`
/// with the merged values as the JSON body. Connector and action ids are
/// encoded as single path segments.
#[derive(Debug, Clone)]
pub struct HttpVerifier {
    client: Client,
    base_url: Url,
    timeouts: TimeoutManager,
}

impl HttpVerifier {
    pub fn new(settings: &VerifierSettings) -> ConnectorResult<Self> {
        settings.validate()?;
        let base_url = settings.base_url()?;
        let timeouts = TimeoutManager::new(settings.timeouts());
        let client = timeouts.apply_to_client_builder(Client::builder()).build()?;
        Ok(Self { client, base_url, timeouts })
    }

    pub fn endpoint(&self, connector_id: &str, action_id: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        // http(s) bases always have path segments
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["api", "v1", "connectors", connector_id, "actions", action_id]);
        }
        url
    }

    async fn call(&self, url: Url, values: &PropertyValues) -> ConnectorResult<(u16, String)> {
        let body = serde_json::to_vec(values)?;
        self.timeouts
            .execute_with_timeout(async {
                let response = self
                    .client
                    .post(url)
                    .header(ACCEPT, "application/json")
                    .header(CONTENT_TYPE, "application/json")
                    .body(body)
                    .send()
                    .await?;
                let status = response.status().as_u16();
                let text = response.text().await?;
                Ok::<_, reqwest::Error>((status, text))
            })
            .await
    }
}

#[async_trait]
impl Verifier for HttpVerifier {
    async fn verify(
        &self,
        connector_id: &str,
        action_id: &str,
        values: &PropertyValues,
    ) -> Result<VerificationResult, VerificationError> {
        let url = self.endpoint(connector_id, action_id);
        let start = Instant::now();

        let (status, text) = self.call(url, values).await.map_err(|e: ConnectorError| {
            tracing::warn!(connector_id, action_id, error = %e, "Verifier call failed");
            VerificationError::from(e)
        })?;

        tracing::debug!(
            connector_id,
            action_id,
            status,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Verifier responded"
        );

        // Only 200 carries suggestions
        if status != 200 {
            return Err(VerificationError::Rejected { status, message: truncate(text) });
        }

        let body: serde_json::Value = serde_json::from_str(&text)
            .map_err(|e| VerificationError::Malformed(format!("response is not JSON: {}", e)))?;
        VerificationResult::from_json(body)
    }
}

fn truncate(mut text: String) -> String {
    if text.len() > MAX_ERROR_BODY {
        let mut end = MAX_ERROR_BODY;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        text.truncate(end);
    }
    text
}
