//! Match state and scoring rules for Crease
//!
//! Pure domain crate: the live match record, the event reducer that folds
//! scoring events into it, and the derived statistics functions. No I/O and
//! no async — everything here is unit-testable without a network in sight.

pub mod match_state;
pub mod reducer;
pub mod stats;

pub use match_state::{Ball, Batsman, Extras, MatchState, ParseBallError};
pub use reducer::{reduce, ExtraKind, ScoreEvent, BALLS_PER_OVER};
pub use stats::{
    economy, overs, required_run_rate, run_rate, runs_needed, strike_rate, Scoreboard,
};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("match has not been started")]
    NotStarted,

    #[error("invalid run value: {0}")]
    InvalidRun(u8),
}
