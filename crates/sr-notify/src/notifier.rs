//! RMS Notifier - delayed callback delivery with unbounded retry
//!
//! Each scheduled notification runs as its own background task:
//! sleep for the configured delay, POST the params as JSON, and treat the
//! attempt as delivered only when the response is 2xx with body `code == 0`.
//! Any other outcome (connection error, timeout, non-2xx status, malformed
//! body, `code != 0`) is logged and retried after the same delay, until the
//! notifier is shut down or the process exits.
//!
//! The initial delay is deliberate: it gives the station controller time to
//! settle the physical state a callback describes before RMS hears about it.

use std::time::Duration;

use reqwest::Client;
use sr_common::{CallbackParams, RmsAck, Result, StationRelayError};
use tokio::sync::broadcast;
use tracing::{debug, error, info};

/// Seam for scheduling callbacks, so request handlers can be tested with a
/// recording fake instead of a live HTTP client.
pub trait Notifier: Send + Sync {
    /// Schedule a delayed, retried callback. Never blocks the caller; the
    /// caller learns that the notification was scheduled, never whether it
    /// was delivered.
    fn schedule(&self, delay: Duration, target_url: String, params: CallbackParams);
}

/// Notifier configuration
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    /// Per-attempt request timeout. Mandatory - a stuck RMS endpoint must
    /// not pin a retry task forever between suspension points.
    pub request_timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Delivers dock callbacks to RMS with fire-and-forget semantics.
///
/// Holds no shared mutable state: every scheduled notification owns its own
/// params and retry loop. The only cross-task plumbing is the shutdown
/// channel, which lets process teardown cancel in-flight retry loops.
pub struct RmsNotifier {
    client: Client,
    shutdown_tx: broadcast::Sender<()>,
}

impl RmsNotifier {
    pub fn new(config: NotifierConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| StationRelayError::HttpClient(e.to_string()))?;

        let (shutdown_tx, _) = broadcast::channel(1);

        Ok(Self {
            client,
            shutdown_tx,
        })
    }

    /// Signal all in-flight retry tasks to stop at their next suspension
    /// point. Dropping the notifier has the same effect.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }

    /// A single delivery attempt. Returns true iff RMS acknowledged.
    async fn deliver(client: &Client, target_url: &str, params: &CallbackParams) -> bool {
        info!(url = %target_url, params = ?params, "Notifying RMS");

        let response = match client
            .post(target_url)
            .header("Content-Type", "application/json")
            .json(params)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!(
                    url = %target_url,
                    params = ?params,
                    error = %e,
                    "RMS request failed"
                );
                return false;
            }
        };

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            error!(
                url = %target_url,
                params = ?params,
                status = %status,
                body = %body,
                "RMS returned error status"
            );
            return false;
        }

        match serde_json::from_str::<RmsAck>(&body) {
            Ok(ack) if ack.is_success() => {
                info!(url = %target_url, body = %body, "RMS acknowledged notification");
                true
            }
            Ok(ack) => {
                error!(
                    url = %target_url,
                    params = ?params,
                    code = ack.code,
                    msg = %ack.msg,
                    "RMS rejected notification"
                );
                false
            }
            Err(e) => {
                error!(
                    url = %target_url,
                    params = ?params,
                    body = %body,
                    error = %e,
                    "Failed to parse RMS response"
                );
                false
            }
        }
    }
}

impl Notifier for RmsNotifier {
    fn schedule(&self, delay: Duration, target_url: String, params: CallbackParams) {
        let client = self.client.clone();
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        tokio::spawn(async move {
            loop {
                // recv() also resolves (with Closed) when the notifier is
                // dropped, so orphaned loops cannot outlive it.
                tokio::select! {
                    _ = shutdown_rx.recv() => {
                        debug!(url = %target_url, "Notification task cancelled by shutdown");
                        return;
                    }
                    _ = tokio::time::sleep(delay) => {}
                }

                if Self::deliver(&client, &target_url, &params).await {
                    return;
                }
            }
        });
    }
}
