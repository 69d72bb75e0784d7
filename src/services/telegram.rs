use anyhow::{Context, Result};
use serde_json::json;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Minimal Telegram Bot API client, just enough to push alerts.
#[derive(Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    token: String,
    api_base: String,
}

impl TelegramClient {
    pub fn new(http: reqwest::Client, token: String) -> Self {
        Self::with_base(http, token, TELEGRAM_API_BASE.to_string())
    }

    /// Point the client at a different API host. Tests use this to talk
    /// to a local mock server.
    pub fn with_base(http: reqwest::Client, token: String, api_base: String) -> Self {
        TelegramClient {
            http,
            token,
            api_base,
        }
    }

    pub async fn send_message(&self, chat_id: &str, text: &str) -> Result<()> {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.token);

        self.http
            .post(&url)
            .json(&json!({ "chat_id": chat_id, "text": text }))
            .send()
            .await
            .context("telegram API request failed")?
            .error_for_status()
            .context("telegram API returned an error status")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn posts_the_message_payload() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/botTEST-TOKEN/sendMessage")
                    .json_body(serde_json::json!({ "chat_id": "42", "text": "hello" }));
                then.status(200).json_body(serde_json::json!({ "ok": true }));
            })
            .await;

        let client = TelegramClient::with_base(
            reqwest::Client::new(),
            "TEST-TOKEN".into(),
            server.base_url(),
        );

        client.send_message("42", "hello").await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn surfaces_api_errors() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/botTEST-TOKEN/sendMessage");
                then.status(403);
            })
            .await;

        let client = TelegramClient::with_base(
            reqwest::Client::new(),
            "TEST-TOKEN".into(),
            server.base_url(),
        );

        assert!(client.send_message("42", "hello").await.is_err());
    }
}
