//! The store seam the engine is written against

use crate::RemoteError;
use async_trait::async_trait;
use crease_state::MatchState;

/// Read/write access to the authoritative match record.
///
/// The collection is expected to hold exactly one live match; `fetch_active`
/// returns its first entry. Writes are whole-document replaces — one event's
/// worth of fields persists atomically as a unit, and concurrent writers
/// resolve last-write-wins.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Fetch the live match record.
    ///
    /// # Errors
    ///
    /// [`RemoteError::NoActiveMatch`] when the collection is empty, a
    /// network variant when the read fails or times out.
    async fn fetch_active(&self) -> Result<MatchState, RemoteError>;

    /// Replace the record with `state`, keyed by `state.id`.
    async fn replace(&self, state: &MatchState) -> Result<(), RemoteError>;
}
