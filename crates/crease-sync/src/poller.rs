//! The read-only remote poller
//!
//! Fetches the remote record on a fixed interval and publishes each good
//! snapshot to display consumers through a watch channel. Never mutates.
//! A transient fetch failure republishes nothing, so subscribers keep the
//! last known-good snapshot and the display degrades to stale data instead
//! of an error.

use crease_remote::RemoteStore;
use crease_state::{MatchState, Scoreboard};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, warn};

/// Spawns the poll loop.
pub struct ScorePoller;

impl ScorePoller {
    /// Start polling `store` every `poll_interval`, beginning with an
    /// immediate fetch. The returned handle owns the loop; dropping it
    /// tears the loop down.
    pub fn spawn(store: Arc<dyn RemoteStore>, poll_interval: Duration) -> PollerHandle {
        let (snapshot_tx, snapshot_rx) = watch::channel(None);
        let (shutdown_tx, mut shutdown_rx) = broadcast::channel::<()>(1);

        let task = tokio::spawn(async move {
            let mut ticker = time::interval(poll_interval);
            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => {
                        debug!("score poller stopping");
                        break;
                    }
                    _ = ticker.tick() => {
                        // Race the fetch against shutdown so stop() also
                        // abandons an in-flight request.
                        tokio::select! {
                            _ = shutdown_rx.recv() => {
                                debug!("score poller stopping mid-fetch");
                                break;
                            }
                            result = store.fetch_active() => match result {
                                Ok(state) => {
                                    debug!(balls = state.balls, "poller snapshot updated");
                                    let _ = snapshot_tx.send(Some(state));
                                }
                                Err(e) => {
                                    warn!("poll failed, keeping last snapshot: {e}");
                                }
                            }
                        }
                    }
                }
            }
        });

        PollerHandle {
            shutdown: shutdown_tx,
            task: Some(task),
            snapshot_rx,
        }
    }
}

/// Scoped handle to a running poll loop.
///
/// `stop` is the orderly teardown; plain `drop` aborts the task so no tick
/// or fetch callback outlives the owning view, whichever exit path ran.
pub struct PollerHandle {
    shutdown: broadcast::Sender<()>,
    task: Option<JoinHandle<()>>,
    snapshot_rx: watch::Receiver<Option<MatchState>>,
}

impl PollerHandle {
    /// A receiver for snapshot updates. Holds `None` until the first
    /// successful fetch.
    pub fn subscribe(&self) -> watch::Receiver<Option<MatchState>> {
        self.snapshot_rx.clone()
    }

    /// The most recent known-good snapshot.
    pub fn latest(&self) -> Option<MatchState> {
        self.snapshot_rx.borrow().clone()
    }

    /// The latest snapshot rendered through the statistics calculator.
    /// `total_overs` is the scheduled match length when the caller knows it.
    pub fn scoreboard(&self, total_overs: Option<u32>) -> Option<Scoreboard> {
        self.latest()
            .map(|state| Scoreboard::from_state(&state, total_overs))
    }

    /// Stop the loop and wait for it to exit. No further fetch completes
    /// after this returns.
    pub async fn stop(mut self) {
        let _ = self.shutdown.send(());
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
