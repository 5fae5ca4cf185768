//! MediaWiki Action API access.
//!
//! This module provides the `MediaWikiApi` trait for querying a remote
//! wiki's media files plus the `MediaWikiClient` implementation backed by
//! the public `action=query` HTTP endpoint.

mod cache;
mod client;
mod types;

pub use cache::QueryResultCache;
pub use client::{MediaWikiClient, MAX_PAGE_SIZE};
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while talking to the remote API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport level failure reaching the remote host.
    #[error("Connection to remote API failed: {0}")]
    Connection(String),

    /// Request exceeded the configured timeout.
    #[error("Request timeout")]
    Timeout,

    /// Response body was not valid JSON or lacked required fields.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The remote API itself reported a failure.
    #[error("Remote API error {code}: {info}")]
    Remote { code: String, info: String },
}

/// Read access to a remote wiki's media files.
///
/// Implemented by `MediaWikiClient` and by `testing::MockMediaWikiApi`,
/// which lets queries be unit tested without a wiki present.
#[async_trait]
pub trait MediaWikiApi: Send + Sync {
    /// List media files starting at `offset`, at most `limit` records.
    async fn find_all(&self, offset: u32, limit: u32) -> Result<QueryResult, ApiError>;

    /// Full-text search the file namespace with the same paging contract.
    async fn search(&self, term: &str, offset: u32, limit: u32)
        -> Result<QueryResult, ApiError>;
}
