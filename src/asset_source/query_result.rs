//! Lazy adapter from raw result batches to asset proxies.

use std::fmt;
use std::sync::Arc;

use crate::api::QueryResult;

use super::asset_proxy::MediaWikiAssetProxy;
use super::query::QuerySpec;
use super::MediaWikiAssetSource;

/// One executed query's batch, presented as asset proxies.
///
/// Records are converted on access: `get` converts the one entry it
/// returns, `iter` converts while the caller advances. A batch the caller
/// never fully consumes never pays full conversion cost. Iterators are
/// independent; each `iter` call starts at the first entry.
pub struct AssetProxyQueryResult {
    query: QuerySpec,
    result: QueryResult,
    asset_source: Arc<MediaWikiAssetSource>,
}

impl fmt::Debug for AssetProxyQueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetProxyQueryResult")
            .field("query", &self.query)
            .field("len", &self.result.len())
            .field("total_results", &self.result.total_results())
            .finish_non_exhaustive()
    }
}

impl AssetProxyQueryResult {
    pub(super) fn new(
        query: QuerySpec,
        result: QueryResult,
        asset_source: Arc<MediaWikiAssetSource>,
    ) -> Self {
        Self {
            query,
            result,
            asset_source,
        }
    }

    /// The search and paging parameters this batch was executed with.
    pub fn query(&self) -> &QuerySpec {
        &self.query
    }

    /// Total reported by the remote API for the whole query, not the
    /// number of records in this page. 0 when the remote omitted a total.
    pub fn count(&self) -> u64 {
        self.result.total_results()
    }

    /// Number of records physically present in this page.
    pub fn len(&self) -> usize {
        self.result.len()
    }

    pub fn is_empty(&self) -> bool {
        self.result.is_empty()
    }

    /// Convert and return the record at `index`, in remote order.
    pub fn get(&self, index: usize) -> Option<MediaWikiAssetProxy> {
        self.result
            .assets()
            .get(index)
            .map(|record| self.convert(record))
    }

    /// Lazily converting cursor over the batch, in remote order.
    pub fn iter(&self) -> impl Iterator<Item = MediaWikiAssetProxy> + '_ {
        self.result.iter().map(|record| self.convert(record))
    }

    fn convert(&self, record: &crate::api::AssetRecord) -> MediaWikiAssetProxy {
        MediaWikiAssetProxy::from_record(
            record,
            self.asset_source.copy_right_notice_template(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{AssetRecord, MediaWikiApi};
    use crate::config::AssetSourceOptions;
    use crate::testing::MockMediaWikiApi;

    fn record(identifier: &str) -> AssetRecord {
        AssetRecord {
            identifier: identifier.to_string(),
            filename: identifier.trim_start_matches("File:").to_string(),
            mime_type: Some("image/jpeg".to_string()),
            width: None,
            height: None,
            size_bytes: 10,
            thumbnail_url: None,
            url: None,
            artist: Some("Jane".to_string()),
            license: Some("CC0".to_string()),
            uploaded: None,
        }
    }

    fn adapter(records: Vec<AssetRecord>, total: u64) -> AssetProxyQueryResult {
        let mut options = AssetSourceOptions::for_domain("wiki.example.org");
        options.copy_right_notice_template = "{artist} ({license})".to_string();
        let api: Arc<dyn MediaWikiApi> = Arc::new(MockMediaWikiApi::new());
        let source = MediaWikiAssetSource::with_api("test-wiki", options, api).unwrap();
        AssetProxyQueryResult::new(QuerySpec::default(), QueryResult::new(records, total), source)
    }

    #[test]
    fn test_count_is_reported_total() {
        let adapter = adapter(vec![record("File:A.jpg")], 999);
        assert_eq!(adapter.count(), 999);
        assert_eq!(adapter.len(), 1);
    }

    #[test]
    fn test_iter_converts_in_order_and_restarts() {
        let adapter = adapter(vec![record("File:A.jpg"), record("File:B.jpg")], 2);

        let first: Vec<_> = adapter.iter().map(|p| p.identifier).collect();
        let second: Vec<_> = adapter.iter().map(|p| p.identifier).collect();
        assert_eq!(first, vec!["File:A.jpg", "File:B.jpg"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_get_converts_on_access() {
        let adapter = adapter(vec![record("File:A.jpg")], 1);
        let proxy = adapter.get(0).unwrap();
        assert_eq!(proxy.copyright_notice, "Jane (CC0)");
        assert!(adapter.get(1).is_none());
    }
}
