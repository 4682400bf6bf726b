//! Spaced repetition scheduling.

pub mod sm2;

use crate::error::Result;
use crate::types::CardSchedulingState;
use chrono::{DateTime, Utc};

pub use sm2::{compute_next_state, ease_delta, next_ease, Sm2};

/// Trait for spaced repetition schedulers.
pub trait ReviewScheduler: Send + Sync {
    /// Scheduler identifier.
    fn name(&self) -> &'static str;

    /// Initial state for a card authored at `now`.
    fn initial_state(&self, now: DateTime<Utc>) -> CardSchedulingState;

    /// Calculate the next state after a review with the given raw quality rating.
    ///
    /// Fails without producing a state when the rating or `current` is invalid.
    fn schedule(
        &self,
        current: &CardSchedulingState,
        quality: i64,
        now: DateTime<Utc>,
    ) -> Result<CardSchedulingState>;
}
