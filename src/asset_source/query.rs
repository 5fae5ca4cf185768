//! Mutable search and pagination specification.

use std::sync::Arc;

use thiserror::Error;

use crate::api::ApiError;

use super::query_result::AssetProxyQueryResult;
use super::MediaWikiAssetSource;

/// Default page size when the caller sets no limit.
pub const DEFAULT_LIMIT: u32 = 20;

/// Errors surfaced by query execution.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Remote API failure, propagated unchanged.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Deliberate gap: the operation has no defined semantic.
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),
}

/// The search term and paging parameters the caller executes. Setting a
/// value never triggers I/O; each `execute` reads only the values set at
/// that moment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    pub search_term: String,
    pub offset: u32,
    pub limit: u32,
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            offset: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// A query against one asset source.
///
/// An empty search term means browse-all mode; `execute` then routes to
/// the listing endpoint instead of the search endpoint.
pub struct AssetProxyQuery {
    asset_source: Arc<MediaWikiAssetSource>,
    spec: QuerySpec,
}

impl AssetProxyQuery {
    pub(super) fn new(asset_source: Arc<MediaWikiAssetSource>) -> Self {
        Self {
            asset_source,
            spec: QuerySpec::default(),
        }
    }

    pub fn search_term(&self) -> &str {
        &self.spec.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.spec.search_term = term.into();
    }

    pub fn offset(&self) -> u32 {
        self.spec.offset
    }

    pub fn set_offset(&mut self, offset: u32) {
        self.spec.offset = offset;
    }

    pub fn limit(&self) -> u32 {
        self.spec.limit
    }

    pub fn set_limit(&mut self, limit: u32) {
        self.spec.limit = limit;
    }

    /// Execute the query against the remote API and wrap the returned
    /// batch for lazy consumption. Remote errors propagate unchanged.
    pub async fn execute(&self) -> Result<AssetProxyQueryResult, QueryError> {
        let api = self.asset_source.api();
        let result = if self.spec.search_term.is_empty() {
            api.find_all(self.spec.offset, self.spec.limit).await?
        } else {
            api.search(&self.spec.search_term, self.spec.offset, self.spec.limit)
                .await?
        };

        Ok(AssetProxyQueryResult::new(
            self.spec.clone(),
            result,
            Arc::clone(&self.asset_source),
        ))
    }

    /// Counting a query without executing it has no defined semantic on
    /// the Action API; use [`AssetProxyQueryResult::count`] for the total
    /// reported with an executed batch.
    pub fn count(&self) -> Result<u64, QueryError> {
        Err(QueryError::NotImplemented("AssetProxyQuery::count"))
    }
}
