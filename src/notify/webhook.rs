//! Fire-and-forget webhook submission

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::traits::*;
use crate::types::*;

/// Posts every generated receipt as JSON to a remote endpoint
///
/// The endpoint (typically a spreadsheet web app) answers opaquely, so the
/// response is dropped unread.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: Client,
    url: String,
}

impl WebhookNotifier {
    /// Create a notifier for `url` with a per-request timeout
    pub fn new(url: impl Into<String>, timeout: Duration) -> ReceiptResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ReceiptError::Config(format!("building webhook client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Endpoint receipts are posted to
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ReceiptNotifier for WebhookNotifier {
    async fn notify(&self, payload: &SubmissionPayload) -> NotifyOutcome {
        tracing::debug!(
            "Sending receipt {} to {}",
            payload.receipt_number,
            self.url
        );

        match self.client.post(&self.url).json(payload).send().await {
            Ok(_) => {
                tracing::info!("Receipt {} sent to webhook", payload.receipt_number);
                NotifyOutcome::Sent
            }
            Err(e) => {
                tracing::warn!(
                    "Sending receipt {} to webhook failed: {}",
                    payload.receipt_number,
                    e
                );
                NotifyOutcome::Failed(e.to_string())
            }
        }
    }
}
