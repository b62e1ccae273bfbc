// SPDX-FileCopyrightText: 2026 Lettermine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Lettermine integration tests.
//!
//! Provides mock adapters and fixture builders for fast, deterministic,
//! CI-runnable tests without external services.
//!
//! # Components
//!
//! - [`MockMailProvider`] - Scripted mail provider with failure injection
//! - [`MemoryEmailStore`] - In-memory [`EmailStore`](lettermine_core::EmailStore)
//! - [`MockExtractor`] - Company extractor with pre-configured results
//! - [`builders`] - Fixture builders for messages and pages

pub mod builders;
pub mod memory_store;
pub mod mock_extractor;
pub mod mock_mail;

pub use memory_store::MemoryEmailStore;
pub use mock_extractor::MockExtractor;
pub use mock_mail::MockMailProvider;
