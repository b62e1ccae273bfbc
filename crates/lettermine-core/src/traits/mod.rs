// SPDX-FileCopyrightText: 2026 Lettermine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the collaborators the ingestion pipeline
//! consumes but does not implement.
//!
//! All traits use `#[async_trait]` for dynamic dispatch compatibility.

pub mod extractor;
pub mod mail;
pub mod store;

// Re-export all traits at the traits module level for convenience.
pub use extractor::CompanyExtractor;
pub use mail::MailProvider;
pub use store::EmailStore;
