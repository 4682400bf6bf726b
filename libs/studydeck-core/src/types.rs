//! Core types for card scheduling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulerError};

/// Ease factor given to a freshly authored card.
pub const INITIAL_EASE: f64 = 2.5;

/// Ease factor floor. Intervals stop growing sensibly below this.
pub const MINIMUM_EASE: f64 = 1.3;

/// Interval of a freshly authored card, and the reset target after a failed recall.
pub const INITIAL_INTERVAL_DAYS: u32 = 1;

/// Scheduling state of a single flashcard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardSchedulingState {
    pub interval_days: u32,
    pub ease_factor: f64,
    pub next_review_date: DateTime<Utc>,
}

impl CardSchedulingState {
    /// State of a card that was just authored: due immediately.
    pub fn new_card(now: DateTime<Utc>) -> Self {
        Self {
            interval_days: INITIAL_INTERVAL_DAYS,
            ease_factor: INITIAL_EASE,
            next_review_date: now,
        }
    }

    /// Build a state from loosely typed parts (database rows, JSON bodies).
    ///
    /// The result is validated against [`MINIMUM_EASE`].
    pub fn from_parts(
        interval_days: i64,
        ease_factor: f64,
        next_review_date: DateTime<Utc>,
    ) -> Result<Self> {
        let interval_days = u32::try_from(interval_days)
            .map_err(|_| SchedulerError::InvalidInterval { interval_days })?;
        let state = Self {
            interval_days,
            ease_factor,
            next_review_date,
        };
        state.validate(MINIMUM_EASE)?;
        Ok(state)
    }

    /// Reject states that could not have been produced by the scheduler.
    pub fn validate(&self, minimum_ease: f64) -> Result<()> {
        if self.interval_days < 1 {
            return Err(SchedulerError::InvalidInterval {
                interval_days: i64::from(self.interval_days),
            });
        }
        if !self.ease_factor.is_finite() {
            return Err(SchedulerError::InvalidEase {
                ease_factor: self.ease_factor,
            });
        }
        if self.ease_factor < minimum_ease {
            return Err(SchedulerError::EaseBelowFloor {
                ease_factor: self.ease_factor,
                minimum: minimum_ease,
            });
        }
        Ok(())
    }
}

/// Accepted range of quality ratings.
///
/// The practice flow rates recall 1-5, the revision flow 0-5 where 0 means a
/// complete blackout. Both treat anything below 3 as a failed recall.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityScale {
    #[default]
    Practice,
    Revision,
}

impl QualityScale {
    /// Lowest accepted rating.
    pub fn min(self) -> u8 {
        match self {
            Self::Practice => 1,
            Self::Revision => 0,
        }
    }

    /// Highest accepted rating.
    pub fn max(self) -> u8 {
        5
    }

    /// Get the scale name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Practice => "practice",
            Self::Revision => "revision",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "practice" => Some(Self::Practice),
            "revision" => Some(Self::Revision),
            _ => None,
        }
    }
}

/// A recall-quality rating that has been checked against a [`QualityScale`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ReviewQuality(u8);

impl ReviewQuality {
    /// Highest possible rating on any scale.
    pub const PERFECT: u8 = 5;

    /// Validate a raw rating.
    pub fn new(value: i64, scale: QualityScale) -> Result<Self> {
        let (min, max) = (scale.min(), scale.max());
        if value < i64::from(min) || value > i64::from(max) {
            return Err(SchedulerError::QualityOutOfRange {
                quality: value,
                min,
                max,
            });
        }
        // In range 0..=5, so the cast is lossless.
        Ok(Self(value as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Distance from a perfect rating, the `5 - q` term of SM-2.
    pub fn shortfall(self) -> f64 {
        f64::from(Self::PERFECT - self.0)
    }
}
