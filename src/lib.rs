//! Read-only asset source connector for MediaWiki based media
//! repositories.
//!
//! A host content-management system configures a [`MediaWikiAssetSource`]
//! with a remote wiki domain, builds an [`AssetProxyQuery`] from it, sets
//! search term and paging, and executes it. The returned
//! [`AssetProxyQueryResult`] converts remote records into
//! [`MediaWikiAssetProxy`] values lazily as they are consumed.
//!
//! ```rust,no_run
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use mediawiki_asset_source::{AssetSourceOptions, MediaWikiAssetSource};
//!
//! let options = AssetSourceOptions::for_domain("commons.wikimedia.org");
//! let source = MediaWikiAssetSource::new("commons", options)?;
//!
//! let mut query = source.query();
//! query.set_search_term("cat");
//! query.set_limit(10);
//!
//! let result = query.execute().await?;
//! println!("{} results in total", result.count());
//! for asset in result.iter() {
//!     println!("{} ({})", asset.filename, asset.copyright_notice);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod asset_source;
pub mod config;
pub mod testing;

pub use api::{
    ApiError, AssetRecord, MediaWikiApi, MediaWikiClient, QueryResult, QueryResultCache,
    MAX_PAGE_SIZE,
};
pub use asset_source::{
    AssetProxyQuery, AssetProxyQueryResult, MediaWikiAssetProxy, MediaWikiAssetSource,
    QueryError, QuerySpec, DEFAULT_LIMIT,
};
pub use config::{
    load_options, load_options_from_str, validate_options, AssetSourceOptions, ConfigError,
};
