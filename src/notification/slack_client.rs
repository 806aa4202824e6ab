use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::{
    notification_dispatcher::{DeliveryClient, DeliveryError, DeliveryReceipt},
    notification_models::NotificationDocument,
    slack_blocks::{fallback_text, render_blocks},
};

/// Posts notifications through Slack's `chat.postMessage` Web API method.
#[derive(Clone)]
pub struct SlackClient {
    http_client: Client,
    api_url: String,
    token: String,
}

#[derive(Serialize)]
struct PostMessage<'a> {
    channel: &'a str,
    text: String,
    blocks: Vec<Value>,
}

/// Slack answers 200 for most failures and reports them through `ok`/`error`.
#[derive(Deserialize)]
struct PostMessageResponse {
    ok: bool,
    channel: Option<String>,
    ts: Option<String>,
    error: Option<String>,
}

impl SlackClient {
    pub fn new(api_url: &str, token: &str) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }
}

#[async_trait]
impl DeliveryClient for SlackClient {
    async fn send(
        &self,
        document: &NotificationDocument,
        channel: &str,
    ) -> Result<DeliveryReceipt, DeliveryError> {
        let body = PostMessage {
            channel,
            text: fallback_text(document),
            blocks: render_blocks(document),
        };
        debug!(channel, blocks = body.blocks.len(), "Posting message to Slack");

        let response: PostMessageResponse = self
            .http_client
            .post(format!("{}/chat.postMessage", self.api_url))
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if !response.ok {
            return Err(DeliveryError::Rejected(
                response.error.unwrap_or_else(|| "unknown_error".to_string()),
            ));
        }

        let message_ts = response
            .ts
            .ok_or_else(|| DeliveryError::Rejected("response missing ts".to_string()))?;

        Ok(DeliveryReceipt {
            channel: response.channel.unwrap_or_else(|| channel.to_string()),
            message_ts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::notification_service::compose;
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use wiremock::{
        matchers::{body_partial_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn document() -> NotificationDocument {
        compose("U1", &[], &[], Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap())
    }

    #[tokio::test]
    async fn test_successful_post() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat.postMessage"))
            .and(header("authorization", "Bearer xoxb-test"))
            .and(body_partial_json(json!({
                "channel": "C1",
                "text": "You have 0 overdue and 0 upcoming assignments",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "channel": "C1",
                "ts": "1700000000.000200",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = SlackClient::new(&format!("{}/", server.uri()), "xoxb-test").unwrap();
        let receipt = client.send(&document(), "C1").await.unwrap();

        assert_eq!(
            receipt,
            DeliveryReceipt {
                channel: "C1".into(),
                message_ts: "1700000000.000200".into(),
            }
        );
    }

    #[tokio::test]
    async fn test_slack_error_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat.postMessage"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": false,
                "error": "not_in_channel",
            })))
            .mount(&server)
            .await;

        let client = SlackClient::new(&server.uri(), "xoxb-test").unwrap();
        let err = client.send(&document(), "C1").await.unwrap_err();

        assert!(matches!(err, DeliveryError::Rejected(ref e) if e == "not_in_channel"));
    }

    #[tokio::test]
    async fn test_http_failure_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = SlackClient::new(&server.uri(), "xoxb-test").unwrap();
        let err = client.send(&document(), "C1").await.unwrap_err();

        assert!(matches!(err, DeliveryError::Http(_)));
    }
}
