// SPDX-FileCopyrightText: 2026 Lettermine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Gmail REST API.
//!
//! Provides [`GmailClient`] which handles request construction,
//! authentication, and mapping Gmail error bodies onto the crate error
//! taxonomy. Notably, a 403 for a project that never enabled the Gmail API
//! becomes [`LettermineError::Capability`] so callers can surface a
//! user-actionable message instead of a generic HTTP failure.

use std::time::Duration;

use async_trait::async_trait;
use lettermine_core::{
    LettermineError, MailMessage, MailProfile, MailProvider, MessagePage,
};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use tracing::debug;

use crate::types::{ErrorResponse, GetResponse, ListResponse, ProfileResponse};

/// Base URL for the Gmail REST API.
const API_BASE_URL: &str = "https://gmail.googleapis.com/gmail/v1";

/// HTTP client for Gmail API communication.
#[derive(Debug, Clone)]
pub struct GmailClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl GmailClient {
    /// Creates a new Gmail API client authenticating with `access_token`.
    pub fn new(access_token: &str, timeout: Duration) -> Result<Self, LettermineError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {access_token}"))
            .map_err(|e| LettermineError::Config(format!("invalid access token value: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| LettermineError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: API_BASE_URL.to_string(),
            timeout,
        })
    }

    /// Overrides the base URL (self-hosted proxies, wiremock in tests).
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, LettermineError> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LettermineError::Timeout {
                        duration: self.timeout,
                    }
                } else {
                    LettermineError::Provider {
                        message: format!("HTTP request failed: {e}"),
                        source: Some(Box::new(e)),
                    }
                }
            })?;

        let status = response.status();
        debug!(%status, path, "gmail response received");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_api_error(status, &body));
        }

        let body = response.text().await.map_err(|e| LettermineError::Provider {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        serde_json::from_str(&body).map_err(|e| LettermineError::Provider {
            message: format!("failed to parse API response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

/// Map a non-success Gmail response to the error taxonomy.
fn map_api_error(status: reqwest::StatusCode, body: &str) -> LettermineError {
    if let Ok(parsed) = serde_json::from_str::<ErrorResponse>(body) {
        let not_configured = parsed
            .error
            .errors
            .iter()
            .any(|d| d.reason == "accessNotConfigured")
            || parsed.error.message.contains("Gmail API has not been used")
            || parsed.error.message.contains("it is disabled");
        if status == reqwest::StatusCode::FORBIDDEN && not_configured {
            return LettermineError::Capability {
                message: format!(
                    "Gmail API is not enabled for this project: {}",
                    parsed.error.message
                ),
            };
        }
        return LettermineError::Provider {
            message: format!("Gmail API error ({status}): {}", parsed.error.message),
            source: None,
        };
    }
    LettermineError::Provider {
        message: format!("Gmail API returned {status}: {body}"),
        source: None,
    }
}

#[async_trait]
impl MailProvider for GmailClient {
    async fn search(
        &self,
        query: &str,
        page_token: Option<&str>,
        page_size: u32,
    ) -> Result<MessagePage, LettermineError> {
        let page_size = page_size.to_string();
        let mut params = vec![("q", query), ("maxResults", page_size.as_str())];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }
        let list: ListResponse = self.get_json("/users/me/messages", &params).await?;
        Ok(list.into())
    }

    async fn get_message(&self, id: &str) -> Result<MailMessage, LettermineError> {
        let path = format!("/users/me/messages/{id}");
        let msg: GetResponse = self.get_json(&path, &[("format", "full")]).await?;
        Ok(msg.into())
    }

    async fn get_profile(&self) -> Result<MailProfile, LettermineError> {
        let profile: ProfileResponse = self.get_json("/users/me/profile", &[]).await?;
        Ok(profile.into())
    }
}
