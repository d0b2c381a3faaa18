//! Mutable state owned by one interactive session

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp of the last request that passed the gate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitState {
    pub last_request_time: Option<DateTime<Utc>>,
}

/// Single-slot memo of the most recently completed analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub content_hash: String,
    pub feedback: String,
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    rate_limit: RateLimitState,
    cache: Option<CacheEntry>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cache(&self) -> Option<&CacheEntry> {
        self.cache.as_ref()
    }

    pub fn last_request_time(&self) -> Option<DateTime<Utc>> {
        self.rate_limit.last_request_time
    }

    /// Feedback memoized for this hash, if it is the current cache entry
    pub fn cached_feedback(&self, content_hash: &str) -> Option<&str> {
        self.cache
            .as_ref()
            .filter(|entry| entry.content_hash == content_hash)
            .map(|entry| entry.feedback.as_str())
    }

    pub(crate) fn mark_accepted(&mut self, now: DateTime<Utc>) {
        self.rate_limit.last_request_time = Some(now);
    }

    /// Only called once an analysis has fully completed
    pub(crate) fn store(&mut self, content_hash: String, feedback: String) {
        self.cache = Some(CacheEntry {
            content_hash,
            feedback,
        });
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
