//! Remote record access for Crease
//!
//! The authoritative match record lives in a single-collection document
//! store behind a REST API: reads fetch the collection and take its first
//! entry, writes replace the whole document by id. The engine is written
//! against the [`RemoteStore`] trait so the HTTP client stays swappable.

pub mod config;
pub mod http;
pub mod store;

pub use config::RemoteConfig;
pub use http::HttpStore;
pub use store::RemoteStore;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("remote collection holds no active match")]
    NoActiveMatch,

    #[error("request timed out")]
    Timeout,

    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("invalid match record: {0}")]
    InvalidRecord(String),
}
