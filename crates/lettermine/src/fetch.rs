// SPDX-FileCopyrightText: 2026 Lettermine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `lettermine fetch` command implementation.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use lettermine_anthropic::{AnthropicClient, AnthropicExtractor};
use lettermine_companies::deduplicate;
use lettermine_config::model::LettermineConfig;
use lettermine_core::{CompanyExtractor, LettermineError, ProcessedEmail};
use lettermine_gmail::{GmailClient, IngestOptions, Ingestor};
use lettermine_limiter::BurstLimiter;
use lettermine_storage::{Database, SqliteStore};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Run the `lettermine fetch` command.
pub async fn run(
    config: &LettermineConfig,
    days: i64,
    extract: bool,
) -> Result<(), LettermineError> {
    let token = access_token(config)?;
    let client = GmailClient::new(&token, Duration::from_secs(config.gmail.timeout_secs))?
        .with_base_url(config.gmail.api_base_url.clone());

    let db = Database::open(
        Path::new(&config.storage.database_path),
        config.storage.wal_mode,
    )
    .await?;
    let store = SqliteStore::new(db);

    let options = IngestOptions {
        sender_domain: config.gmail.sender_domain.clone(),
        page_size: config.gmail.page_size,
        max_concurrency: config.ingest.max_concurrency,
        min_content_length: config.ingest.min_content_length,
        fetch_limit: config.ingest.fetch_limit,
        fetch_window: config.ingest.fetch_window.clone(),
    };
    let ingestor = Ingestor::new(
        Arc::new(client),
        Arc::new(store),
        BurstLimiter::new(),
        options,
    );

    // Ctrl-C stops between messages; what is already processed persists.
    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, finishing in-flight messages");
            signal_cancel.cancel();
        }
    });

    let emails = ingestor.fetch_daily_with_cancel(days, cancel).await?;
    println!(
        "fetched {} newsletter email(s) from the last {days} day(s)",
        emails.len()
    );

    if extract {
        run_extraction(config, &emails).await?;
    }
    Ok(())
}

/// Extract company mentions from each fetched email and print the
/// deduplicated list per issue.
async fn run_extraction(
    config: &LettermineConfig,
    emails: &[ProcessedEmail],
) -> Result<(), LettermineError> {
    let api_key = config
        .anthropic
        .api_key
        .clone()
        .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
        .ok_or_else(|| {
            LettermineError::Config(
                "anthropic.api_key (or ANTHROPIC_API_KEY) is required for --extract".to_string(),
            )
        })?;
    let client = AnthropicClient::new(
        api_key,
        config.anthropic.api_version.clone(),
        config.anthropic.model.clone(),
    )?;
    let extractor = AnthropicExtractor::new(client, config.anthropic.max_tokens);

    for email in emails {
        let text = truncated(&email.text, config.extract.max_input_length);
        match extractor
            .extract_companies(text, &email.newsletter_name)
            .await
        {
            Ok(extraction) => {
                let companies = deduplicate(extraction.companies);
                info!(
                    newsletter = %email.newsletter_name,
                    companies = companies.len(),
                    "extraction complete"
                );
                println!("{} ({}):", email.newsletter_name, email.subject);
                if companies.is_empty() {
                    println!("  no companies mentioned");
                }
                for company in companies {
                    println!(
                        "  {} [{}] confidence {:.2}",
                        company.name, company.sentiment, company.confidence
                    );
                }
            }
            Err(e) => {
                // One bad issue should not sink the rest of the batch.
                warn!(newsletter = %email.newsletter_name, error = %e, "extraction failed");
            }
        }
    }
    Ok(())
}

fn access_token(config: &LettermineConfig) -> Result<String, LettermineError> {
    config
        .gmail
        .access_token
        .clone()
        .or_else(|| std::env::var("GMAIL_ACCESS_TOKEN").ok())
        .ok_or_else(|| {
            LettermineError::Config(
                "gmail.access_token (or GMAIL_ACCESS_TOKEN) is required".to_string(),
            )
        })
}

/// Truncate at a char boundary at or below `max_length` bytes.
fn truncated(text: &str, max_length: usize) -> &str {
    if text.len() <= max_length {
        return text;
    }
    let mut end = max_length;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
