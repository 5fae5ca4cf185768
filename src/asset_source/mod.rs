//! The asset source surface a host system consumes.

mod asset_proxy;
mod query;
mod query_result;

pub use asset_proxy::MediaWikiAssetProxy;
pub use query::{AssetProxyQuery, QueryError, QuerySpec, DEFAULT_LIMIT};
pub use query_result::AssetProxyQueryResult;

use std::fmt;
use std::sync::Arc;

use regex_lite::Regex;

use crate::api::{MediaWikiApi, MediaWikiClient};
use crate::config::{validate_options, AssetSourceOptions, ConfigError};

const IDENTIFIER_PATTERN: &str = "^[a-z][a-z0-9-]{0,62}[a-z]$";

/// One configured remote wiki, read-only by design. Queries built from
/// the same source share its API client and therefore its result cache.
pub struct MediaWikiAssetSource {
    identifier: String,
    options: AssetSourceOptions,
    api: Arc<dyn MediaWikiApi>,
}

impl fmt::Debug for MediaWikiAssetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaWikiAssetSource")
            .field("identifier", &self.identifier)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl MediaWikiAssetSource {
    /// Create an asset source backed by a real HTTP client.
    pub fn new(
        identifier: impl Into<String>,
        options: AssetSourceOptions,
    ) -> Result<Arc<Self>, ConfigError> {
        let client = MediaWikiClient::new(&options)
            .map_err(|e| ConfigError::TransportSetup(e.to_string()))?;
        Self::with_api(identifier, options, Arc::new(client))
    }

    /// Create an asset source with an injected API implementation. This is
    /// the seam that lets queries run against a mock in tests.
    pub fn with_api(
        identifier: impl Into<String>,
        options: AssetSourceOptions,
        api: Arc<dyn MediaWikiApi>,
    ) -> Result<Arc<Self>, ConfigError> {
        let identifier = identifier.into();
        let pattern = Regex::new(IDENTIFIER_PATTERN).expect("identifier pattern is valid");
        if !pattern.is_match(&identifier) {
            return Err(ConfigError::ValidationError(format!(
                "asset source identifier {identifier:?} does not match {IDENTIFIER_PATTERN}"
            )));
        }
        validate_options(&options)?;

        Ok(Arc::new(Self {
            identifier,
            options,
            api,
        }))
    }

    /// Unique identifier of this source.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Human readable label, falling back to the domain.
    pub fn label(&self) -> &str {
        self.options.label.as_deref().unwrap_or(&self.options.domain)
    }

    pub fn description(&self) -> String {
        format!("{}: {}", self.label(), self.options.domain)
    }

    /// The connector never writes to the remote wiki.
    pub fn is_read_only(&self) -> bool {
        true
    }

    /// Configured icon path; resolving it to a URI is the host's concern.
    pub fn icon(&self) -> Option<&str> {
        self.options.icon.as_deref()
    }

    pub fn copy_right_notice_template(&self) -> &str {
        &self.options.copy_right_notice_template
    }

    pub fn options(&self) -> &AssetSourceOptions {
        &self.options
    }

    pub(crate) fn api(&self) -> &Arc<dyn MediaWikiApi> {
        &self.api
    }

    /// Build a new query bound to this source, with default paging.
    pub fn query(self: &Arc<Self>) -> AssetProxyQuery {
        AssetProxyQuery::new(Arc::clone(self))
    }
}
