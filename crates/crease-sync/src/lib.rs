//! Optimistic synchronization for Crease
//!
//! Couples the pure reducer to the remote document store: the
//! [`ScoreController`] serializes mutations and keeps one level of undo,
//! the [`ScorePoller`] feeds read-only display consumers on an interval.
//! Consistency between the two is eventual, mediated only through the
//! remote store.

pub mod controller;
pub mod poller;

pub use controller::ScoreController;
pub use poller::{PollerHandle, ScorePoller};

use crease_remote::RemoteError;
use crease_state::StateError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    /// The event was rejected before any reduction; state is untouched and
    /// the caller should not retry unchanged.
    #[error("validation failed: {0}")]
    State(#[from] StateError),

    /// The remote read or write failed; the pre-event state was kept.
    #[error("remote store error: {0}")]
    Remote(#[from] RemoteError),

    #[error("nothing to undo")]
    NothingToUndo,
}
