//! The synchronization controller
//!
//! Sequences reducer application with remote persistence. A mutation only
//! becomes authoritative once the remote write succeeds; until then the
//! previous state stands, and the undo snapshot taken at the start of the
//! call survives a failed write so the scorer can retry the same edit.

use crate::SyncError;
use crease_remote::RemoteStore;
use crease_state::{reduce, MatchState, ScoreEvent};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Single-writer front end over the remote match record.
///
/// All mutating calls funnel through one fair async mutex held across the
/// reduce-then-persist critical section, so exactly one write is in flight
/// per controller and queued callers proceed in arrival order.
pub struct ScoreController {
    store: Arc<dyn RemoteStore>,
    inner: Mutex<Inner>,
}

struct Inner {
    state: MatchState,
    undo: Option<MatchState>,
}

impl ScoreController {
    /// Fetch the live record and build a controller around it.
    ///
    /// # Errors
    ///
    /// Surfaces [`RemoteError::NoActiveMatch`] when the collection is empty,
    /// or the network error when the initial read fails.
    ///
    /// [`RemoteError::NoActiveMatch`]: crease_remote::RemoteError::NoActiveMatch
    pub async fn load(store: Arc<dyn RemoteStore>) -> Result<Self, SyncError> {
        let state = store.fetch_active().await?;
        Ok(Self::with_state(store, state))
    }

    /// Build a controller around a record the caller already holds (the
    /// match-list flow hands the selected record over directly).
    pub fn with_state(store: Arc<dyn RemoteStore>, state: MatchState) -> Self {
        Self {
            store,
            inner: Mutex::new(Inner { state, undo: None }),
        }
    }

    /// Apply one scoring event and persist the result.
    ///
    /// On success the candidate becomes the new authoritative state and the
    /// pre-event state fills the single undo slot. A validation error leaves
    /// both state and undo slot untouched; a persist error keeps the
    /// pre-event state but leaves the fresh snapshot available for a retry
    /// of the same logical edit.
    pub async fn apply(&self, event: &ScoreEvent) -> Result<MatchState, SyncError> {
        let mut inner = self.inner.lock().await;

        let candidate = reduce(&inner.state, event)?;
        inner.undo = Some(inner.state.clone());

        self.store.replace(&candidate).await?;

        debug!(balls = candidate.balls, total_run = candidate.total_run, "event persisted");
        inner.state = candidate.clone();
        Ok(candidate)
    }

    /// Revert the last persisted mutation.
    ///
    /// The snapshot is persisted like a normal mutation but does not itself
    /// refill the undo slot; one level only. A persist failure keeps the
    /// snapshot so the undo can be retried.
    pub async fn undo(&self) -> Result<MatchState, SyncError> {
        let mut inner = self.inner.lock().await;

        let snapshot = inner.undo.clone().ok_or(SyncError::NothingToUndo)?;
        self.store.replace(&snapshot).await?;

        debug!(balls = snapshot.balls, "reverted to previous state");
        inner.state = snapshot.clone();
        inner.undo = None;
        Ok(snapshot)
    }

    /// Persist a caller-edited record wholesale (team names, players,
    /// target, stream URL). Takes a normal undo snapshot.
    pub async fn replace(&self, new_state: MatchState) -> Result<MatchState, SyncError> {
        let mut inner = self.inner.lock().await;

        inner.undo = Some(inner.state.clone());
        self.store.replace(&new_state).await?;

        inner.state = new_state.clone();
        Ok(new_state)
    }

    /// The current authoritative state.
    pub async fn state(&self) -> MatchState {
        self.inner.lock().await.state.clone()
    }

    /// Whether an undo snapshot is available.
    pub async fn can_undo(&self) -> bool {
        self.inner.lock().await.undo.is_some()
    }
}
