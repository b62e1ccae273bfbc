// SPDX-FileCopyrightText: 2026 Lettermine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gmail REST client and the Substack newsletter ingestion connector.
//!
//! [`GmailClient`] implements the provider-neutral
//! [`MailProvider`](lettermine_core::MailProvider) trait over the Gmail
//! REST API; [`Ingestor`] drives the fetch/clean/sanitize/persist pipeline
//! against any provider and store implementation.

pub mod client;
pub mod ingest;
pub mod mime;
pub mod newsletter;
mod types;

pub use client::GmailClient;
pub use ingest::{IngestOptions, Ingestor};
pub use newsletter::infer_newsletter_name;
