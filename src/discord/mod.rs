pub mod message;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::{error, info};

use crate::error::{Result, TrackerError};
use crate::models::NO_UPDATES;

/// JSON body accepted by a Discord webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebhookPayload {
    pub username: String,
    pub content: String,
}

impl WebhookPayload {
    pub fn compose(username: &str, greeting: &str, report: &str) -> Self {
        let body = if report.is_empty() { NO_UPDATES } else { report };
        Self {
            username: username.to_string(),
            content: format!("{}{}", greeting, body),
        }
    }
}

/// Pick a greeting uniformly at random. A seed makes the pick repeatable.
pub fn choose_greeting(greetings: &[String], seed: Option<u64>) -> Option<&str> {
    let choice = match seed {
        Some(seed) => greetings.choose(&mut StdRng::seed_from_u64(seed)),
        None => greetings.choose(&mut rand::rng()),
    };
    choice.map(String::as_str)
}

pub struct DiscordNotifier {
    client: Client,
    webhook_url: String,
}

impl DiscordNotifier {
    pub fn new(client: Client, webhook_url: impl Into<String>) -> Self {
        Self {
            client,
            webhook_url: webhook_url.into(),
        }
    }

    /// Post the payload once. Anything but a 2xx answer is a delivery failure.
    pub async fn send(&self, payload: &WebhookPayload) -> Result<StatusCode> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(payload)
            .send()
            .await
            .map_err(|e| TrackerError::Delivery(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            info!("Successfully sent Discord notification ({})", status);
            Ok(status)
        } else {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            error!("Discord webhook failed with status {}: {}", status, error_text);
            Err(TrackerError::Delivery(format!("{} - {}", status, error_text)))
        }
    }
}
