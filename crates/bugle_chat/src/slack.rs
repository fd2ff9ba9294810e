//! Slack Web API client.

use crate::{ChatError, ChatErrorKind, ChatResult, ChatSender};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://slack.com/api";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Slack-backed [`ChatSender`] posting through `chat.postMessage`.
pub struct SlackSender {
    client: Client,
    token: String,
    base_url: String,
}

impl SlackSender {
    /// Create a sender authenticating with a bot `token`.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_else(|_| Client::new()),
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the sender at a different API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Debug, Serialize)]
struct PostMessage<'a> {
    channel: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct PostMessageAck {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

#[async_trait]
impl ChatSender for SlackSender {
    #[tracing::instrument(skip(self, text), fields(destination = %destination))]
    async fn send_message(&self, destination: &str, text: &str) -> ChatResult<()> {
        let url = format!("{}/chat.postMessage", self.base_url);
        let body = PostMessage {
            channel: destination,
            text,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response.text().await.unwrap_or_default();
            return Err(ChatError::new(ChatErrorKind::Api(format!(
                "{status}: {message}"
            ))));
        }

        let ack: PostMessageAck = response.json().await?;
        if !ack.ok {
            let reason = ack.error.unwrap_or_else(|| "unspecified failure".to_string());
            return Err(ChatError::new(ChatErrorKind::Api(reason)));
        }

        debug!("Message delivered");
        Ok(())
    }
}
