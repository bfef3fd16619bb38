//! Remote store configuration

use std::time::Duration;

/// Default per-request deadline. A hung request would otherwise block the
/// controller's serialized mutation queue indefinitely.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Default poll cadence for read-only display consumers.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Configuration for remote record access.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Collection endpoint, e.g. `https://api.example.com/UpdateScore`.
    /// Reads GET this URL; writes PUT to `<base_url>/<id>`.
    pub base_url: String,

    /// Deadline applied to every read and write request.
    pub request_timeout: Duration,

    /// How often pollers refetch the record. Display surfaces run this in
    /// the 3–5 second range.
    pub poll_interval: Duration,
}

impl RemoteConfig {
    /// Config for a collection endpoint with default timings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_applies_default_timings() {
        let config = RemoteConfig::new("https://api.example.com/UpdateScore");
        assert_eq!(config.base_url, "https://api.example.com/UpdateScore");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.poll_interval, Duration::from_secs(5));
    }
}
