//! SM-2 spaced repetition algorithm.
//!
//! Based on SuperMemo 2:
//! - the ease factor moves by `0.1 - (5 - q) * (0.08 + (5 - q) * 0.02)` on
//!   every review and never drops below 1.3
//! - a failed recall (q < 3) resets the interval to one day
//! - the first successful recall from a one-day interval jumps to six days
//! - after that intervals grow geometrically by the updated ease factor

use super::ReviewScheduler;
use crate::error::{Result, SchedulerError};
use crate::types::{
    CardSchedulingState, QualityScale, ReviewQuality, INITIAL_EASE, INITIAL_INTERVAL_DAYS,
    MINIMUM_EASE,
};
use chrono::{DateTime, Duration, Utc};

/// SM-2 scheduler with configurable parameters.
#[derive(Debug, Clone)]
pub struct Sm2 {
    pub initial_ease: f64,
    pub minimum_ease: f64,
    pub first_success_interval: u32,
    pub passing_quality: u8,
    pub quality_scale: QualityScale,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            initial_ease: INITIAL_EASE,
            minimum_ease: MINIMUM_EASE,
            first_success_interval: 6,
            passing_quality: 3,
            quality_scale: QualityScale::default(),
        }
    }
}

impl ReviewScheduler for Sm2 {
    fn name(&self) -> &'static str {
        "sm2"
    }

    fn initial_state(&self, now: DateTime<Utc>) -> CardSchedulingState {
        CardSchedulingState {
            interval_days: INITIAL_INTERVAL_DAYS,
            ease_factor: self.initial_ease,
            next_review_date: now,
        }
    }

    fn schedule(
        &self,
        current: &CardSchedulingState,
        quality: i64,
        now: DateTime<Utc>,
    ) -> Result<CardSchedulingState> {
        let quality = ReviewQuality::new(quality, self.quality_scale)?;
        current.validate(self.minimum_ease)?;

        let ease_factor = next_ease(current.ease_factor, quality, self.minimum_ease);
        let interval_days = self.next_interval(current.interval_days, ease_factor, quality)?;
        let next_review_date = now
            .checked_add_signed(Duration::days(i64::from(interval_days)))
            .ok_or(SchedulerError::DueDateOutOfRange)?;

        Ok(CardSchedulingState {
            interval_days,
            ease_factor,
            next_review_date,
        })
    }
}

impl Sm2 {
    /// Scheduler with default parameters on the given quality scale.
    pub fn with_scale(quality_scale: QualityScale) -> Self {
        Self {
            quality_scale,
            ..Self::default()
        }
    }

    /// Interval for the next review. Growth is never clamped: an interval
    /// too large to represent is an error, not a shorter interval.
    fn next_interval(&self, current: u32, new_ease: f64, quality: ReviewQuality) -> Result<u32> {
        if quality.value() < self.passing_quality {
            return Ok(INITIAL_INTERVAL_DAYS);
        }
        if current == INITIAL_INTERVAL_DAYS {
            return Ok(self.first_success_interval);
        }

        let grown = (f64::from(current) * new_ease).round();
        if grown > f64::from(u32::MAX) {
            return Err(SchedulerError::DueDateOutOfRange);
        }
        // Whole, non-negative and within u32 after the check above.
        Ok(grown as u32)
    }
}

/// Ease adjustment for a rating. Positive only for a perfect recall.
pub fn ease_delta(quality: ReviewQuality) -> f64 {
    let shortfall = quality.shortfall();
    0.1 - shortfall * (0.08 + shortfall * 0.02)
}

/// Updated ease factor, clamped to `minimum`.
pub fn next_ease(ease_factor: f64, quality: ReviewQuality, minimum: f64) -> f64 {
    (ease_factor + ease_delta(quality)).max(minimum)
}

/// Compute the next state with default SM-2 parameters.
pub fn compute_next_state(
    current: &CardSchedulingState,
    quality: i64,
    now: DateTime<Utc>,
) -> Result<CardSchedulingState> {
    Sm2::default().schedule(current, quality, now)
}
