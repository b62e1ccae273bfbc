// SPDX-FileCopyrightText: 2026 Lettermine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Newsletter display-name inference from the From header.

/// Infer the newsletter name from a raw From header value.
///
/// Preference order: explicit display name, Substack subdomain
/// (`my-letter.substack.com` becomes `My Letter`), sender domain, then the
/// raw sender string unchanged.
pub fn infer_newsletter_name(sender: &str) -> String {
    if let Some(name) = display_name(sender) {
        return name;
    }
    let address = address_part(sender);
    if let Some(domain) = address.split('@').nth(1) {
        if let Some(subdomain) = domain.strip_suffix(".substack.com") {
            return title_case(subdomain);
        }
        if let Some(label) = domain.split('.').next() {
            if !label.is_empty() {
                return title_case(label);
            }
        }
    }
    sender.trim().to_string()
}

/// The display-name portion of `Name <addr@host>`, if present.
fn display_name(sender: &str) -> Option<String> {
    let bracket = sender.find('<')?;
    let name = sender[..bracket].trim().trim_matches('"').trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// The address portion of the sender, with or without angle brackets.
fn address_part(sender: &str) -> &str {
    match (sender.find('<'), sender.find('>')) {
        (Some(open), Some(close)) if open < close => sender[open + 1..close].trim(),
        _ => sender.trim(),
    }
}

/// Title-case a domain label, treating `-`, `_`, and `.` as word breaks.
fn title_case(label: &str) -> String {
    label
        .split(['-', '_', '.'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
