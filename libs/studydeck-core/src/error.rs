//! Error types for studydeck-core.

use thiserror::Error;

/// Result type alias using SchedulerError.
pub type Result<T> = std::result::Result<T, SchedulerError>;

/// Invalid input rejected by the scheduler.
///
/// The scheduler never coerces bad ratings or corrupt persisted state into
/// something valid; every variant here means the caller sent garbage.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchedulerError {
    #[error("quality {quality} is outside the accepted range {min}..={max}")]
    QualityOutOfRange { quality: i64, min: u8, max: u8 },

    #[error("quality must be a whole-number rating, got {quality}")]
    InvalidQuality { quality: String },

    #[error("interval_days must be a positive whole number of days, got {interval_days}")]
    InvalidInterval { interval_days: i64 },

    #[error("ease_factor must be a finite number, got {ease_factor}")]
    InvalidEase { ease_factor: f64 },

    #[error("ease_factor {ease_factor} is below the minimum of {minimum}")]
    EaseBelowFloor { ease_factor: f64, minimum: f64 },

    #[error("next review date is out of range")]
    DueDateOutOfRange,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_message_names_range() {
        let error = SchedulerError::QualityOutOfRange {
            quality: 6,
            min: 1,
            max: 5,
        };
        assert_eq!(
            error.to_string(),
            "quality 6 is outside the accepted range 1..=5"
        );
    }

    #[test]
    fn fractional_quality_message() {
        let error = SchedulerError::InvalidQuality {
            quality: "4.5".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "quality must be a whole-number rating, got 4.5"
        );
    }

    #[test]
    fn ease_floor_message() {
        let error = SchedulerError::EaseBelowFloor {
            ease_factor: 1.2,
            minimum: 1.3,
        };
        assert_eq!(
            error.to_string(),
            "ease_factor 1.2 is below the minimum of 1.3"
        );
    }
}
