//! Push relay client module
//!
//! This module provides the production adapter for the push relay
//! capability: the Expo push gateway. It sends one fixed-shape message
//! per call over an authenticated HTTPS request and passes the gateway's
//! JSON response back verbatim. The HTTP client carries a bounded
//! timeout, so a stalled gateway cannot pin a dispatch request forever.

use notifly_common::services::{BoxFuture, BoxedError, PushMessage, PushRelayClient, RelayReceipt};
use notifly_common::create_client;
use notifly_config::RelayConfig;
use reqwest::{header, Client};
use std::env;
use thiserror::Error;
use tracing::warn;

/// Env var holding the bearer credential for the relay.
pub const RELAY_ACCESS_TOKEN_VAR: &str = "RELAY_ACCESS_TOKEN";

/// Errors that can occur when calling the push relay
#[derive(Error, Debug)]
pub enum ExpoPushError {
    /// Error during HTTP request to the relay
    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Non-success response returned by the relay
    #[error("Push relay error: {0}")]
    ApiError(String),
}

/// Client for the Expo push gateway
pub struct ExpoPushClient {
    /// HTTP client for requests to the gateway, built with the configured timeout
    client: Client,

    /// Gateway endpoint URL
    url: String,

    /// Bearer credential, when one is configured
    access_token: Option<String>,
}

impl ExpoPushClient {
    /// Creates a client from explicit parts. Tests use this to point the
    /// client at a local mock gateway.
    pub fn new(client: Client, url: impl Into<String>, access_token: Option<String>) -> Self {
        Self {
            client,
            url: url.into(),
            access_token,
        }
    }

    /// Creates a client from the relay configuration, reading the bearer
    /// credential from the `RELAY_ACCESS_TOKEN` env var.
    pub fn from_config(config: &RelayConfig) -> Result<Self, reqwest::Error> {
        let client = create_client(config.timeout_secs(), true)?;
        let access_token = env::var(RELAY_ACCESS_TOKEN_VAR).ok();
        if access_token.is_none() {
            warn!(
                "{} is not set; relay requests will be unauthenticated",
                RELAY_ACCESS_TOKEN_VAR
            );
        }
        Ok(Self::new(client, config.url(), access_token))
    }

    /// Sends one push message to the gateway.
    ///
    /// # Errors
    ///
    /// Returns `RequestError` when the HTTP call itself fails (including
    /// timeout) and `ApiError` carrying the response text when the gateway
    /// answers with a non-success status.
    pub async fn send(&self, message: &PushMessage) -> Result<RelayReceipt, ExpoPushError> {
        let mut request = self.client.post(&self.url).json(message);
        if let Some(token) = &self.access_token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(ExpoPushError::ApiError(error_text));
        }

        let body = response.json().await?;
        Ok(RelayReceipt { response: body })
    }
}

impl PushRelayClient for ExpoPushClient {
    type Error = BoxedError;

    fn send_push(&self, message: PushMessage) -> BoxFuture<'_, RelayReceipt, Self::Error> {
        Box::pin(async move { self.send(&message).await.map_err(BoxedError::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn message() -> PushMessage {
        PushMessage {
            to: "ExponentPushToken[xyz]".to_string(),
            title: "Test Notification".to_string(),
            body: "You got a notification!".to_string(),
        }
    }

    #[tokio::test]
    async fn send_posts_bearer_authenticated_payload_and_returns_body() {
        let server = MockServer::start().await;
        let relay_body = json!({ "data": { "status": "ok", "id": "receipt-1" } });
        Mock::given(method("POST"))
            .and(path("/push/send"))
            .and(header("authorization", "Bearer secret-token"))
            .and(body_json(json!({
                "to": "ExponentPushToken[xyz]",
                "title": "Test Notification",
                "body": "You got a notification!",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(relay_body.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let client = ExpoPushClient::new(
            Client::new(),
            format!("{}/push/send", server.uri()),
            Some("secret-token".to_string()),
        );

        let receipt = client.send(&message()).await.unwrap();
        assert_eq!(receipt.response, relay_body);
    }

    #[tokio::test]
    async fn non_success_status_surfaces_the_relay_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("invalid push token"))
            .mount(&server)
            .await;

        let client = ExpoPushClient::new(Client::new(), server.uri(), None);

        let err = client.send(&message()).await.unwrap_err();
        match err {
            ExpoPushError::ApiError(text) => assert_eq!(text, "invalid push token"),
            other => panic!("expected ApiError, got {other:?}"),
        }
    }
}
