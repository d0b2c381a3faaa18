//! Session-scoped state and the request gate

pub mod gate;
pub mod state;

pub use gate::{GateDecision, RequestGate};
pub use state::{CacheEntry, RateLimitState, SessionState};
