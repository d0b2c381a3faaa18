//! Rate limiting and last-result memoization in front of an analysis

use crate::error::{CritiqueError, Result};
use crate::session::state::SessionState;
use chrono::{DateTime, Duration, Utc};
use log::debug;

/// Outcome of a gate check that was not rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Same document as the last completed analysis
    Cached(String),
    Proceed,
}

#[derive(Debug, Clone)]
pub struct RequestGate {
    min_interval: Duration,
}

impl Default for RequestGate {
    fn default() -> Self {
        Self::new(Duration::seconds(10))
    }
}

impl RequestGate {
    pub fn new(min_interval: Duration) -> Self {
        Self { min_interval }
    }

    /// Decide without touching the session.
    /// The cache is consulted before the interval on purpose: an identical document
    /// replays its stored feedback even inside the window, while any other document
    /// is held to the interval. An analysis still in flight has stored nothing yet,
    /// so re-triggers during it hit the interval check.
    pub fn check(&self, state: &SessionState, now: DateTime<Utc>, content_hash: &str) -> Result<GateDecision> {
        if let Some(feedback) = state.cached_feedback(content_hash) {
            debug!("Gate hit cache for {}", short_hash(content_hash));
            return Ok(GateDecision::Cached(feedback.to_string()));
        }

        if let Some(last) = state.last_request_time() {
            let elapsed = now - last;
            if elapsed < self.min_interval {
                let remaining = (self.min_interval - elapsed).min(self.min_interval);
                let remaining_secs = (remaining.num_milliseconds().max(0) as u64).div_ceil(1000);
                debug!("Gate rejected request: {}ms since last accepted", elapsed.num_milliseconds());
                return Err(CritiqueError::TooSoon { remaining_secs });
            }
        }

        Ok(GateDecision::Proceed)
    }

    /// Check and, when proceeding, stamp the session before any slow work starts
    pub fn admit(&self, state: &mut SessionState, now: DateTime<Utc>, content_hash: &str) -> Result<GateDecision> {
        let decision = self.check(state, now, content_hash)?;
        if decision == GateDecision::Proceed {
            state.mark_accepted(now);
        }
        Ok(decision)
    }
}

pub(crate) fn short_hash(content_hash: &str) -> &str {
    content_hash.get(..12).unwrap_or(content_hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_first_request_proceeds_and_stamps() {
        let gate = RequestGate::default();
        let mut state = SessionState::new();

        let decision = gate.admit(&mut state, t0(), "hash-a").unwrap();
        assert_eq!(decision, GateDecision::Proceed);
        assert_eq!(state.last_request_time(), Some(t0()));
    }

    #[test]
    fn test_second_request_within_window_is_too_soon() {
        let gate = RequestGate::default();
        let mut state = SessionState::new();
        gate.admit(&mut state, t0(), "hash-a").unwrap();

        let result = gate.admit(&mut state, t0() + Duration::seconds(2), "hash-b");
        assert!(matches!(result, Err(CritiqueError::TooSoon { remaining_secs: 8 })));
        // Rejection leaves the timestamp alone
        assert_eq!(state.last_request_time(), Some(t0()));
    }

    #[test]
    fn test_remaining_rounds_up() {
        let gate = RequestGate::default();
        let mut state = SessionState::new();
        gate.admit(&mut state, t0(), "hash-a").unwrap();

        let result = gate.check(&state, t0() + Duration::milliseconds(9_500), "hash-b");
        assert!(matches!(result, Err(CritiqueError::TooSoon { remaining_secs: 1 })));
    }

    #[test]
    fn test_request_after_window_proceeds() {
        let gate = RequestGate::default();
        let mut state = SessionState::new();
        gate.admit(&mut state, t0(), "hash-a").unwrap();

        let later = t0() + Duration::seconds(10);
        assert_eq!(gate.admit(&mut state, later, "hash-b").unwrap(), GateDecision::Proceed);
        assert_eq!(state.last_request_time(), Some(later));
    }

    #[test]
    fn test_cached_hash_short_circuits_without_stamping() {
        let gate = RequestGate::default();
        let mut state = SessionState::new();
        gate.admit(&mut state, t0(), "hash-a").unwrap();
        state.store("hash-a".to_string(), "cached feedback".to_string());

        let later = t0() + Duration::seconds(30);
        let decision = gate.admit(&mut state, later, "hash-a").unwrap();
        assert_eq!(decision, GateDecision::Cached("cached feedback".to_string()));
        assert_eq!(state.last_request_time(), Some(t0()));
    }

    #[test]
    fn test_cached_hash_within_window_replays() {
        let gate = RequestGate::default();
        let mut state = SessionState::new();
        gate.admit(&mut state, t0(), "hash-a").unwrap();
        state.store("hash-a".to_string(), "cached feedback".to_string());

        let decision = gate.admit(&mut state, t0() + Duration::seconds(3), "hash-a").unwrap();
        assert_eq!(decision, GateDecision::Cached("cached feedback".to_string()));
    }

    #[test]
    fn test_different_document_within_window_ignores_cache() {
        let gate = RequestGate::default();
        let mut state = SessionState::new();
        gate.admit(&mut state, t0(), "hash-a").unwrap();
        state.store("hash-a".to_string(), "cached feedback".to_string());

        let result = gate.admit(&mut state, t0() + Duration::seconds(2), "hash-b");
        assert!(matches!(result, Err(CritiqueError::TooSoon { .. })));
    }

    #[test]
    fn test_clock_going_backwards_is_rejected() {
        let gate = RequestGate::default();
        let mut state = SessionState::new();
        gate.admit(&mut state, t0(), "hash-a").unwrap();

        let result = gate.check(&state, t0() - Duration::seconds(60), "hash-b");
        assert!(matches!(result, Err(CritiqueError::TooSoon { remaining_secs: 10 })));
    }

    #[test]
    fn test_zero_interval_never_rejects() {
        let gate = RequestGate::new(Duration::zero());
        let mut state = SessionState::new();
        gate.admit(&mut state, t0(), "hash-a").unwrap();
        assert_eq!(gate.admit(&mut state, t0(), "hash-b").unwrap(), GateDecision::Proceed);
    }
}
