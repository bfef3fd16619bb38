//! In-memory stand-ins for the remote document store

use async_trait::async_trait;
use crease_remote::{RemoteError, RemoteStore};
use crease_state::MatchState;
use std::sync::Mutex;
use std::time::Duration;

/// An in-memory single-collection store.
///
/// Behaves like the real document API: reads return the first record in the
/// collection, writes replace by id. Every accepted write is also appended
/// to a log so tests can assert persist order.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Collection>,
}

#[derive(Default)]
struct Collection {
    records: Vec<MatchState>,
    replace_log: Vec<MatchState>,
}

impl MemoryStore {
    /// An empty collection — reads fail with `NoActiveMatch`.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A collection holding one live record.
    pub fn with_record(state: MatchState) -> Self {
        Self {
            inner: Mutex::new(Collection {
                records: vec![state],
                replace_log: Vec::new(),
            }),
        }
    }

    /// The current first record, if any.
    pub fn current(&self) -> Option<MatchState> {
        self.inner.lock().unwrap().records.first().cloned()
    }

    /// Overwrite the collection contents directly (simulates another writer).
    pub fn set_record(&self, state: MatchState) {
        self.inner.lock().unwrap().records = vec![state];
    }

    /// Every accepted replace, in arrival order.
    pub fn replace_log(&self) -> Vec<MatchState> {
        self.inner.lock().unwrap().replace_log.clone()
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn fetch_active(&self) -> Result<MatchState, RemoteError> {
        self.inner
            .lock()
            .unwrap()
            .records
            .first()
            .cloned()
            .ok_or(RemoteError::NoActiveMatch)
    }

    async fn replace(&self, state: &MatchState) -> Result<(), RemoteError> {
        let mut inner = self.inner.lock().unwrap();
        match inner.records.iter_mut().find(|r| r.id == state.id) {
            Some(record) => *record = state.clone(),
            None => inner.records.push(state.clone()),
        }
        inner.replace_log.push(state.clone());
        Ok(())
    }
}

/// Wraps a store with scripted failures and optional latency.
///
/// Covers what controller and poller tests need from a misbehaving network:
/// "the next N requests fail", plus a per-request delay so tests can
/// interleave concurrent callers under tokio's paused clock.
pub struct FlakyStore<S> {
    inner: S,
    plan: Mutex<FailurePlan>,
    latency: Option<Duration>,
}

#[derive(Default)]
struct FailurePlan {
    fail_fetches: usize,
    fail_replaces: usize,
}

impl<S> FlakyStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            plan: Mutex::new(FailurePlan::default()),
            latency: None,
        }
    }

    /// Delay every request by `latency` before it touches the inner store.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Make the next `n` reads fail.
    pub fn fail_next_fetches(&self, n: usize) {
        self.plan.lock().unwrap().fail_fetches = n;
    }

    /// Make the next `n` writes fail.
    pub fn fail_next_replaces(&self, n: usize) {
        self.plan.lock().unwrap().fail_replaces = n;
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    async fn delay(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl<S: RemoteStore> RemoteStore for FlakyStore<S> {
    async fn fetch_active(&self) -> Result<MatchState, RemoteError> {
        self.delay().await;
        {
            let mut plan = self.plan.lock().unwrap();
            if plan.fail_fetches > 0 {
                plan.fail_fetches -= 1;
                return Err(RemoteError::RequestFailed("injected fetch failure".into()));
            }
        }
        self.inner.fetch_active().await
    }

    async fn replace(&self, state: &MatchState) -> Result<(), RemoteError> {
        self.delay().await;
        {
            let mut plan = self.plan.lock().unwrap();
            if plan.fail_replaces > 0 {
                plan.fail_replaces -= 1;
                return Err(RemoteError::RequestFailed(
                    "injected replace failure".into(),
                ));
            }
        }
        self.inner.replace(state).await
    }
}
