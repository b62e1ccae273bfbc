// SPDX-FileCopyrightText: 2026 Lettermine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the Gmail REST API, converted into the provider-neutral
//! core types at the client boundary.

use lettermine_core::{MailHeader, MailMessage, MailProfile, MessagePage, MessagePart, MessageRef};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListResponse {
    #[serde(default)]
    pub messages: Vec<ListMessage>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListMessage {
    pub id: String,
}

impl From<ListResponse> for MessagePage {
    fn from(list: ListResponse) -> Self {
        MessagePage {
            messages: list
                .messages
                .into_iter()
                .map(|m| MessageRef { id: m.id })
                .collect(),
            next_page_token: list.next_page_token,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GetResponse {
    pub id: String,
    pub payload: WirePart,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WirePart {
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub headers: Vec<WireHeader>,
    pub body: Option<WireBody>,
    #[serde(default)]
    pub parts: Vec<WirePart>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireHeader {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireBody {
    /// base64url-encoded content; absent for container parts.
    pub data: Option<String>,
}

impl From<GetResponse> for MailMessage {
    fn from(msg: GetResponse) -> Self {
        MailMessage {
            id: msg.id,
            payload: msg.payload.into(),
        }
    }
}

impl From<WirePart> for MessagePart {
    fn from(part: WirePart) -> Self {
        MessagePart {
            mime_type: part.mime_type,
            headers: part
                .headers
                .into_iter()
                .map(|h| MailHeader {
                    name: h.name,
                    value: h.value,
                })
                .collect(),
            body: part.body.and_then(|b| b.data),
            parts: part.parts.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProfileResponse {
    pub email_address: String,
}

impl From<ProfileResponse> for MailProfile {
    fn from(profile: ProfileResponse) -> Self {
        MailProfile {
            email_address: profile.email_address,
        }
    }
}

/// Structured Gmail error body, used to distinguish "API not enabled for
/// this project" from other failures.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDetail {
    #[serde(default)]
    pub reason: String,
}
