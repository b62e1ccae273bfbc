// SPDX-FileCopyrightText: 2026 Lettermine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! MIME part tree traversal and body decoding.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE, URL_SAFE_NO_PAD};
use lettermine_core::MessagePart;
use tracing::debug;

/// Recursion cap for the part walk. Real newsletters nest two or three
/// levels; anything deeper is treated as absent.
const MAX_PART_DEPTH: usize = 5;

/// Extract the HTML body of a message payload.
///
/// Walks the part tree looking for a `text/html` leaf, falls back to the
/// top-level body, then to any part body at all. Returns the decoded
/// content, or `None` when the message carries no usable body.
pub fn find_html_body(payload: &MessagePart) -> Option<String> {
    if let Some(data) = find_part_body(payload, "text/html", 0) {
        return decode_body(data);
    }
    if let Some(data) = payload.body.as_deref() {
        return decode_body(data);
    }
    find_any_body(payload, 0).and_then(decode_body)
}

fn find_part_body<'a>(part: &'a MessagePart, mime_type: &str, depth: usize) -> Option<&'a str> {
    if depth > MAX_PART_DEPTH {
        return None;
    }
    if part.mime_type == mime_type {
        if let Some(data) = part.body.as_deref() {
            return Some(data);
        }
    }
    part.parts
        .iter()
        .find_map(|p| find_part_body(p, mime_type, depth + 1))
}

fn find_any_body(part: &MessagePart, depth: usize) -> Option<&str> {
    if depth > MAX_PART_DEPTH {
        return None;
    }
    if let Some(data) = part.body.as_deref() {
        return Some(data);
    }
    part.parts.iter().find_map(|p| find_any_body(p, depth + 1))
}

/// Decode a base64url body into UTF-8 text.
///
/// Gmail emits unpadded base64url, but padded and standard-alphabet
/// variants show up in the wild; all three are accepted.
pub fn decode_body(data: &str) -> Option<String> {
    let bytes = URL_SAFE_NO_PAD
        .decode(data)
        .or_else(|_| URL_SAFE.decode(data))
        .or_else(|_| STANDARD.decode(data))
        .ok()?;
    match String::from_utf8(bytes) {
        Ok(text) => Some(text),
        Err(e) => {
            debug!(error = %e, "message body is not valid utf-8");
            None
        }
    }
}
