// SPDX-FileCopyrightText: 2026 Lettermine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixture builders for mail messages and result pages.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use lettermine_core::{MailHeader, MailMessage, MessagePage, MessagePart, MessageRef};

/// Build a single-part HTML message with the standard headers set.
pub fn html_message(id: &str, subject: &str, sender: &str, date: &str, html: &str) -> MailMessage {
    MailMessage {
        id: id.to_string(),
        payload: MessagePart {
            mime_type: "text/html".to_string(),
            headers: vec![
                header("Subject", subject),
                header("From", sender),
                header("Date", date),
            ],
            body: Some(URL_SAFE_NO_PAD.encode(html.as_bytes())),
            parts: vec![],
        },
    }
}

/// Build a multipart/alternative message carrying both plain and HTML parts.
pub fn multipart_message(
    id: &str,
    subject: &str,
    sender: &str,
    date: &str,
    plain: &str,
    html: &str,
) -> MailMessage {
    MailMessage {
        id: id.to_string(),
        payload: MessagePart {
            mime_type: "multipart/alternative".to_string(),
            headers: vec![
                header("Subject", subject),
                header("From", sender),
                header("Date", date),
            ],
            body: None,
            parts: vec![
                MessagePart {
                    mime_type: "text/plain".to_string(),
                    headers: vec![],
                    body: Some(URL_SAFE_NO_PAD.encode(plain.as_bytes())),
                    parts: vec![],
                },
                MessagePart {
                    mime_type: "text/html".to_string(),
                    headers: vec![],
                    body: Some(URL_SAFE_NO_PAD.encode(html.as_bytes())),
                    parts: vec![],
                },
            ],
        },
    }
}

/// Build a search result page from message ids.
pub fn page(ids: &[&str], next_page_token: Option<&str>) -> MessagePage {
    MessagePage {
        messages: ids
            .iter()
            .map(|id| MessageRef { id: id.to_string() })
            .collect(),
        next_page_token: next_page_token.map(|t| t.to_string()),
    }
}

/// An HTML body long enough to clear the ingestion content floor.
pub fn long_html(marker: &str) -> String {
    format!(
        "<html><body><p>{marker} raised a new funding round this week. The company \
         plans to use the proceeds to expand hiring across engineering and go to \
         market, according to people familiar with the deal.</p></body></html>"
    )
}

fn header(name: &str, value: &str) -> MailHeader {
    MailHeader {
        name: name.to_string(),
        value: value.to_string(),
    }
}
