//! Spaced repetition scheduling core shared by the studydeck services.
//!
//! Provides:
//! - SM-2 scheduler that turns a recall-quality rating into the next review
//! - Card scheduling state and validated quality ratings
//! - Error types for rejected input
//!
//! Everything here is pure: no I/O, no clocks. Callers pass `now` in.

pub mod algorithm;
pub mod error;
pub mod types;

pub use algorithm::{compute_next_state, ReviewScheduler, Sm2};
pub use error::{Result, SchedulerError};
pub use types::{
    CardSchedulingState, QualityScale, ReviewQuality, INITIAL_EASE, INITIAL_INTERVAL_DAYS,
    MINIMUM_EASE,
};
