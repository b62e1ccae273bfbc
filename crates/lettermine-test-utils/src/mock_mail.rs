// SPDX-FileCopyrightText: 2026 Lettermine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted mail provider for deterministic connector tests.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use lettermine_core::{
    LettermineError, MailMessage, MailProfile, MailProvider, MessagePage,
};

/// A mail provider that serves pre-scripted pages and messages.
///
/// Search pages are popped from a FIFO queue; an empty queue yields an empty
/// final page. Individual message fetches can be failed by id to exercise
/// partial-batch behavior.
pub struct MockMailProvider {
    pages: Mutex<VecDeque<MessagePage>>,
    messages: Mutex<HashMap<String, MailMessage>>,
    failing_messages: Mutex<HashSet<String>>,
    search_calls: AtomicUsize,
    profile_error: Mutex<Option<LettermineError>>,
    email_address: String,
}

impl MockMailProvider {
    pub fn new() -> Self {
        Self {
            pages: Mutex::new(VecDeque::new()),
            messages: Mutex::new(HashMap::new()),
            failing_messages: Mutex::new(HashSet::new()),
            search_calls: AtomicUsize::new(0),
            profile_error: Mutex::new(None),
            email_address: "reader@example.com".to_string(),
        }
    }

    /// Queue a search result page.
    pub fn push_page(&self, page: MessagePage) {
        self.pages.lock().unwrap().push_back(page);
    }

    /// Register a fetchable message.
    pub fn add_message(&self, message: MailMessage) {
        self.messages
            .lock()
            .unwrap()
            .insert(message.id.clone(), message);
    }

    /// Make `get_message` fail for the given id.
    pub fn fail_message(&self, id: &str) {
        self.failing_messages.lock().unwrap().insert(id.to_string());
    }

    /// Make `get_profile` return the given error.
    pub fn fail_profile(&self, error: LettermineError) {
        *self.profile_error.lock().unwrap() = Some(error);
    }

    /// Number of `search` calls observed so far.
    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockMailProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MailProvider for MockMailProvider {
    async fn search(
        &self,
        _query: &str,
        _page_token: Option<&str>,
        _page_size: u32,
    ) -> Result<MessagePage, LettermineError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(MessagePage {
                messages: vec![],
                next_page_token: None,
            }))
    }

    async fn get_message(&self, id: &str) -> Result<MailMessage, LettermineError> {
        if self.failing_messages.lock().unwrap().contains(id) {
            return Err(LettermineError::Provider {
                message: format!("scripted failure for message {id}"),
                source: None,
            });
        }
        self.messages
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| LettermineError::Provider {
                message: format!("no such message: {id}"),
                source: None,
            })
    }

    async fn get_profile(&self) -> Result<MailProfile, LettermineError> {
        if let Some(err) = self.profile_error.lock().unwrap().take() {
            return Err(err);
        }
        Ok(MailProfile {
            email_address: self.email_address.clone(),
        })
    }
}
