// SPDX-FileCopyrightText: 2026 Lettermine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-process burst protection for expensive remote calls.
//!
//! Short-window call-rate limiting, distinct from longer-horizon API quota
//! management. State lives for the process lifetime and is never persisted;
//! the limiter bounds *this process's* outbound call rate, not a distributed
//! rate limit.
//!
//! Construct one [`BurstLimiter`] and inject it wherever gating is needed;
//! there is deliberately no hidden global instance.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::warn;

/// Per-key sliding counter.
#[derive(Debug, Clone, Copy)]
struct RateLimitEntry {
    count: u32,
    reset_time: Instant,
}

/// Sliding-counter rate limiter keyed by `operation:identifier`.
///
/// At most `limit` checks succeed per window per key. The check-and-increment
/// is atomic under a single mutex, so concurrent callers racing on the same
/// key cannot lose updates. Entries reset lazily on first use after their
/// window expires and are never removed.
#[derive(Debug, Default)]
pub struct BurstLimiter {
    entries: Mutex<HashMap<String, RateLimitEntry>>,
}

impl BurstLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the call is allowed, false if the key is over budget.
    ///
    /// `window` is a numeric prefix plus a unit suffix: `m` for minutes,
    /// `h` for hours. Unrecognized suffixes fall back to a one-minute
    /// window; the leniency is deliberate and matches the behavior callers
    /// have historically relied on.
    ///
    /// A denial never mutates state: once the window expires, the key has
    /// its full budget again regardless of how many denials occurred.
    pub fn check(&self, identifier: &str, operation: &str, limit: u32, window: &str) -> bool {
        let key = format!("{operation}:{identifier}");
        let window = parse_window(window);
        let now = Instant::now();

        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        match entries.get_mut(&key) {
            Some(entry) if now < entry.reset_time => {
                if entry.count >= limit {
                    warn!(%key, limit, "burst protection triggered");
                    return false;
                }
                entry.count += 1;
                true
            }
            _ => {
                // Absent or expired: start a fresh window.
                entries.insert(
                    key,
                    RateLimitEntry {
                        count: 1,
                        reset_time: now + window,
                    },
                );
                true
            }
        }
    }
}

/// Parses a window string like `"5m"` or `"1h"`.
fn parse_window(window: &str) -> Duration {
    let (digits, unit) = window
        .find(|c: char| !c.is_ascii_digit())
        .map_or((window, ""), |idx| window.split_at(idx));
    let value: u64 = digits.parse().unwrap_or(1);
    match unit {
        "m" => Duration::from_secs(value * 60),
        "h" => Duration::from_secs(value * 3600),
        _ => Duration::from_secs(60),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn allows_up_to_limit_then_denies() {
        let limiter = BurstLimiter::new();
        let results: Vec<bool> = (0..5)
            .map(|_| limiter.check("default", "daily-fetch", 3, "1h"))
            .collect();
        assert_eq!(results, vec![true, true, true, false, false]);
    }

    #[test]
    fn keys_are_independent() {
        let limiter = BurstLimiter::new();
        assert!(limiter.check("user-a", "daily-fetch", 1, "1h"));
        assert!(!limiter.check("user-a", "daily-fetch", 1, "1h"));

        // Different identifier: unaffected.
        assert!(limiter.check("user-b", "daily-fetch", 1, "1h"));
        // Different operation, same identifier: unaffected.
        assert!(limiter.check("user-a", "connection-test", 1, "1h"));
    }

    #[test]
    fn denial_does_not_consume_budget_after_reset() {
        let limiter = BurstLimiter::new();
        // Zero-length window expires immediately: "0m" parses to 0 minutes.
        assert!(limiter.check("default", "op", 1, "0m"));
        assert!(limiter.check("default", "op", 1, "0m"));
        assert!(limiter.check("default", "op", 1, "0m"));
    }

    #[test]
    fn window_resets_after_expiry() {
        let limiter = BurstLimiter::new();
        {
            // Reach the limit, then force the entry's window into the past.
            assert!(limiter.check("default", "op", 1, "1m"));
            assert!(!limiter.check("default", "op", 1, "1m"));
            let mut entries = limiter.entries.lock().unwrap();
            let entry = entries.get_mut("op:default").unwrap();
            // `now >= reset_time` counts as expired, so now() itself works.
            entry.reset_time = Instant::now();
        }
        assert!(limiter.check("default", "op", 1, "1m"));
    }

    #[test]
    fn unknown_unit_suffix_defaults_to_one_minute() {
        // Lenient fallback, preserved deliberately. See crate docs.
        assert_eq!(parse_window("30s"), Duration::from_secs(60));
        assert_eq!(parse_window("banana"), Duration::from_secs(60));
        assert_eq!(parse_window(""), Duration::from_secs(60));
    }

    #[test]
    fn window_units_parse() {
        assert_eq!(parse_window("5m"), Duration::from_secs(300));
        assert_eq!(parse_window("1h"), Duration::from_secs(3600));
        assert_eq!(parse_window("2h"), Duration::from_secs(7200));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn exactly_limit_calls_succeed_under_concurrent_load() {
        let limiter = Arc::new(BurstLimiter::new());
        let mut handles = Vec::new();
        for _ in 0..50 {
            let limiter = Arc::clone(&limiter);
            handles.push(tokio::spawn(async move {
                limiter.check("default", "daily-fetch", 5, "1h")
            }));
        }

        let mut allowed = 0;
        for handle in handles {
            if handle.await.unwrap() {
                allowed += 1;
            }
        }
        assert_eq!(allowed, 5, "exactly `limit` checks must succeed per window");
    }
}
