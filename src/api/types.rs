//! Types for normalized remote query results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One media file as reported by the remote wiki, normalized from the
/// heterogeneous Action API response shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    /// Canonical page title, e.g. "File:Cat.jpg". Unique per wiki.
    pub identifier: String,
    /// Title without the namespace prefix, e.g. "Cat.jpg".
    pub filename: String,
    /// MIME type as reported by the wiki.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Pixel width, if the media has dimensions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Pixel height, if the media has dimensions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Scaled thumbnail URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// URL of the original media.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Attribution holder, HTML stripped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    /// Short license name, e.g. "CC BY-SA 4.0".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    /// Upload timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded: Option<DateTime<Utc>>,
}

/// One page of records plus the total the remote API reported for the
/// whole query. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    assets: Vec<AssetRecord>,
    total_results: u64,
}

impl QueryResult {
    pub fn new(assets: Vec<AssetRecord>, total_results: u64) -> Self {
        Self {
            assets,
            total_results,
        }
    }

    /// Read-only view of the records in remote order.
    pub fn assets(&self) -> &[AssetRecord] {
        &self.assets
    }

    /// Fresh cursor over the records. Every call starts at the first
    /// element; cursors never affect each other.
    pub fn iter(&self) -> std::slice::Iter<'_, AssetRecord> {
        self.assets.iter()
    }

    /// Number of records physically present in this page.
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Total reported by the remote API for the whole query. May be an
    /// estimate; 0 when the remote omitted a total.
    pub fn total_results(&self) -> u64 {
        self.total_results
    }
}

impl<'a> IntoIterator for &'a QueryResult {
    type Item = &'a AssetRecord;
    type IntoIter = std::slice::Iter<'a, AssetRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(identifier: &str) -> AssetRecord {
        AssetRecord {
            identifier: identifier.to_string(),
            filename: identifier.trim_start_matches("File:").to_string(),
            mime_type: Some("image/jpeg".to_string()),
            width: Some(800),
            height: Some(600),
            size_bytes: 1024,
            thumbnail_url: None,
            url: None,
            artist: None,
            license: None,
            uploaded: None,
        }
    }

    #[test]
    fn test_iterators_are_independent() {
        let result = QueryResult::new(
            vec![record("File:A.jpg"), record("File:B.jpg"), record("File:C.jpg")],
            3,
        );

        let first: Vec<_> = result.iter().map(|r| r.identifier.clone()).collect();

        // Exhaust one cursor, then obtain a fresh one.
        let mut exhausted = result.iter();
        while exhausted.next().is_some() {}

        let second: Vec<_> = result.iter().map(|r| r.identifier.clone()).collect();
        assert_eq!(first, second);
        assert_eq!(first, vec!["File:A.jpg", "File:B.jpg", "File:C.jpg"]);
    }

    #[test]
    fn test_total_is_independent_of_page_size() {
        let result = QueryResult::new(vec![record("File:A.jpg")], 4321);
        assert_eq!(result.len(), 1);
        assert_eq!(result.total_results(), 4321);
    }

    #[test]
    fn test_record_serialization_skips_absent_fields() {
        let mut r = record("File:A.jpg");
        r.mime_type = None;
        r.width = None;
        r.height = None;
        let json = serde_json::to_string(&r).unwrap();
        assert!(!json.contains("mime_type"));
        assert!(!json.contains("width"));

        let parsed: AssetRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, r);
    }
}
