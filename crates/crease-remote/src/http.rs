//! HTTP document store client

use crate::{RemoteConfig, RemoteError, RemoteStore};
use async_trait::async_trait;
use crease_state::MatchState;
use tracing::debug;

/// [`RemoteStore`] over the REST document API.
///
/// Every request carries the configured timeout so a stalled round trip
/// cannot wedge the mutation queue or a poller tick.
pub struct HttpStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStore {
    /// Build a client for the configured collection endpoint.
    pub fn new(config: &RemoteConfig) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| RemoteError::RequestFailed(format!("failed to build client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn record_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, id)
    }
}

#[async_trait]
impl RemoteStore for HttpStore {
    async fn fetch_active(&self) -> Result<MatchState, RemoteError> {
        let response = self
            .client
            .get(&self.base_url)
            .send()
            .await
            .map_err(map_request_error)?
            .error_for_status()
            .map_err(map_request_error)?;

        let mut records: Vec<MatchState> = response
            .json()
            .await
            .map_err(|e| RemoteError::InvalidRecord(e.to_string()))?;

        if records.is_empty() {
            return Err(RemoteError::NoActiveMatch);
        }
        debug!(id = %records[0].id, "fetched active match record");
        Ok(records.swap_remove(0))
    }

    async fn replace(&self, state: &MatchState) -> Result<(), RemoteError> {
        self.client
            .put(self.record_url(&state.id))
            .json(state)
            .send()
            .await
            .map_err(map_request_error)?
            .error_for_status()
            .map_err(map_request_error)?;

        debug!(id = %state.id, balls = state.balls, "replaced match record");
        Ok(())
    }
}

fn map_request_error(e: reqwest::Error) -> RemoteError {
    if e.is_timeout() {
        RemoteError::Timeout
    } else {
        RemoteError::RequestFailed(e.to_string())
    }
}
