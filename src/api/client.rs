//! HTTP client for the MediaWiki Action API.
//!
//! Two request flows, both normalized into [`QueryResult`]:
//!
//! - `find_all` walks the `list=allimages` endpoint. That endpoint pages by
//!   continuation token, so a numeric offset is honored by walking pages
//!   and discarding leading titles. The reported total comes from the
//!   wiki's site statistics, piggybacked on the first page.
//! - `search` uses `list=search` on the file namespace, which supports a
//!   numeric offset natively and reports `totalhits`.
//!
//! Both flows then hydrate the collected titles through one
//! `prop=imageinfo` call for URLs, dimensions, MIME type and license
//! metadata, emitting records in the order the listing returned them.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use regex_lite::Regex;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::AssetSourceOptions;

use super::cache::QueryResultCache;
use super::types::{AssetRecord, QueryResult};
use super::{ApiError, MediaWikiApi};

/// Maximum page size the Action API grants non-bot clients.
pub const MAX_PAGE_SIZE: u32 = 50;

/// The wiki namespace holding media files.
const FILE_NAMESPACE: &str = "6";

const IMAGE_INFO_PROPS: &str = "timestamp|url|size|mime|extmetadata";

/// Client for one remote wiki's Action API.
pub struct MediaWikiClient {
    client: Client,
    endpoint: String,
    thumbnail_width: u32,
    cache: QueryResultCache,
}

impl MediaWikiClient {
    /// Create a client from asset source options.
    pub fn new(options: &AssetSourceOptions) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_secs as u64))
            .build()
            .map_err(|e| ApiError::Connection(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: options.endpoint(),
            thumbnail_width: options.thumbnail_width,
            cache: QueryResultCache::new(options.use_query_result_cache),
        })
    }

    /// The fully resolved API endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn get_json(&self, params: &[(&str, String)]) -> Result<QueryResponse, ApiError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ApiError::Timeout
                } else {
                    ApiError::Connection(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Remote {
                code: format!("http-{}", status.as_u16()),
                info: body.chars().take(200).collect(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Connection(e.to_string()))?;
        decode_response(&body)
    }

    /// Fetch image details for the given titles and emit records in the
    /// same order.
    async fn image_details(&self, titles: &[String]) -> Result<Vec<AssetRecord>, ApiError> {
        let params = vec![
            ("action", "query".to_string()),
            ("format", "json".to_string()),
            ("formatversion", "2".to_string()),
            ("titles", titles.join("|")),
            ("prop", "imageinfo".to_string()),
            ("iiprop", IMAGE_INFO_PROPS.to_string()),
            ("iiurlwidth", self.thumbnail_width.to_string()),
        ];

        let response = self.get_json(&params).await?;
        let query = response
            .query
            .ok_or_else(|| ApiError::MalformedResponse("missing query block".to_string()))?;

        Ok(records_from_pages(titles, &query))
    }
}

#[async_trait]
impl MediaWikiApi for MediaWikiClient {
    async fn find_all(&self, offset: u32, limit: u32) -> Result<QueryResult, ApiError> {
        let limit = clamp_limit(limit);
        let key = find_all_cache_key(&self.endpoint, offset, limit);
        if let Some(hit) = self.cache.get(&key).await {
            return Ok(hit);
        }

        debug!(offset, limit, "MediaWiki listing");

        let mut titles: Vec<String> = Vec::new();
        let mut to_skip = offset as usize;
        let mut total = 0u64;
        let mut continue_from: Option<String> = None;
        let mut first_page = true;

        loop {
            let mut params = vec![
                ("action", "query".to_string()),
                ("format", "json".to_string()),
                ("formatversion", "2".to_string()),
                ("list", "allimages".to_string()),
                ("aisort", "name".to_string()),
                ("ailimit", MAX_PAGE_SIZE.to_string()),
            ];
            if first_page {
                params.push(("meta", "siteinfo".to_string()));
                params.push(("siprop", "statistics".to_string()));
            }
            if let Some(cont) = &continue_from {
                params.push(("aicontinue", cont.clone()));
            }

            let response = self.get_json(&params).await?;
            let query = response
                .query
                .ok_or_else(|| ApiError::MalformedResponse("missing query block".to_string()))?;

            if first_page {
                total = query.statistics.as_ref().map(|s| s.images).unwrap_or(0);
                first_page = false;
            }

            let page_len = query.allimages.len();
            for image in query.allimages {
                if to_skip > 0 {
                    to_skip -= 1;
                    continue;
                }
                titles.push(image.title);
                if titles.len() == limit as usize {
                    break;
                }
            }

            if titles.len() == limit as usize || page_len == 0 {
                break;
            }
            match response.cont.and_then(|c| c.aicontinue) {
                Some(cont) => continue_from = Some(cont),
                None => break,
            }
        }

        let records = if titles.is_empty() {
            Vec::new()
        } else {
            self.image_details(&titles).await?
        };

        debug!(records = records.len(), total, "MediaWiki listing complete");

        let result = QueryResult::new(records, total);
        self.cache.put(key, result.clone()).await;
        Ok(result)
    }

    async fn search(&self, term: &str, offset: u32, limit: u32) -> Result<QueryResult, ApiError> {
        let limit = clamp_limit(limit);
        let key = search_cache_key(&self.endpoint, term, offset, limit);
        if let Some(hit) = self.cache.get(&key).await {
            return Ok(hit);
        }

        debug!(term = %term, offset, limit, "MediaWiki search");

        let params = vec![
            ("action", "query".to_string()),
            ("format", "json".to_string()),
            ("formatversion", "2".to_string()),
            ("list", "search".to_string()),
            ("srsearch", term.to_string()),
            ("srnamespace", FILE_NAMESPACE.to_string()),
            ("srlimit", limit.to_string()),
            ("sroffset", offset.to_string()),
        ];

        let response = self.get_json(&params).await?;
        let query = response
            .query
            .ok_or_else(|| ApiError::MalformedResponse("missing query block".to_string()))?;

        let total = query
            .searchinfo
            .as_ref()
            .map(|info| info.totalhits)
            .unwrap_or(0);
        let titles: Vec<String> = query.search.into_iter().map(|hit| hit.title).collect();

        let records = if titles.is_empty() {
            Vec::new()
        } else {
            self.image_details(&titles).await?
        };

        debug!(
            term = %term,
            records = records.len(),
            total,
            "MediaWiki search complete"
        );

        let result = QueryResult::new(records, total);
        self.cache.put(key, result.clone()).await;
        Ok(result)
    }
}

/// Clamp a requested page size into the range the remote API accepts.
fn clamp_limit(limit: u32) -> u32 {
    limit.clamp(1, MAX_PAGE_SIZE)
}

/// Cache key for a listing request. The key must change whenever any
/// parameter of the resolved request changes.
fn find_all_cache_key(endpoint: &str, offset: u32, limit: u32) -> String {
    format!("{endpoint}::find_all?offset={offset}&limit={limit}")
}

/// Cache key for a search request, same contract as [`find_all_cache_key`].
fn search_cache_key(endpoint: &str, term: &str, offset: u32, limit: u32) -> String {
    format!("{endpoint}::search?term={term}&offset={offset}&limit={limit}")
}

/// Decode a response body, surfacing remote error payloads.
fn decode_response(body: &str) -> Result<QueryResponse, ApiError> {
    let response: QueryResponse = serde_json::from_str(body)
        .map_err(|e| ApiError::MalformedResponse(e.to_string()))?;

    if let Some(error) = response.error {
        return Err(ApiError::Remote {
            code: error.code,
            info: error.info,
        });
    }

    Ok(response)
}

/// Join listing order with the unordered `pages` block of an imageinfo
/// response. Titles the wiki normalized are resolved through the
/// `normalized` mapping; titles without details are skipped.
fn records_from_pages(titles: &[String], query: &QueryBlock) -> Vec<AssetRecord> {
    let normalized: HashMap<&str, &str> = query
        .normalized
        .iter()
        .map(|n| (n.from.as_str(), n.to.as_str()))
        .collect();
    let by_title: HashMap<&str, &PageRecord> = query
        .pages
        .iter()
        .map(|p| (p.title.as_str(), p))
        .collect();

    let mut records = Vec::with_capacity(titles.len());
    for title in titles {
        let resolved = normalized
            .get(title.as_str())
            .copied()
            .unwrap_or(title.as_str());
        match by_title.get(resolved).and_then(|page| record_from_page(page)) {
            Some(record) => records.push(record),
            None => warn!(title = %title, "No image details for title, skipping"),
        }
    }
    records
}

fn record_from_page(page: &PageRecord) -> Option<AssetRecord> {
    if page.missing {
        return None;
    }
    let info = page.imageinfo.first()?;

    let filename = page
        .title
        .split_once(':')
        .map(|(_, rest)| rest)
        .unwrap_or(&page.title)
        .to_string();

    let artist = info
        .extmetadata
        .get("Artist")
        .map(|v| strip_html(&v.as_text()))
        .filter(|s| !s.is_empty());
    let license = info
        .extmetadata
        .get("LicenseShortName")
        .map(|v| v.as_text().trim().to_string())
        .filter(|s| !s.is_empty());

    Some(AssetRecord {
        identifier: page.title.clone(),
        filename,
        mime_type: info.mime.clone(),
        width: info.width,
        height: info.height,
        size_bytes: info.size,
        thumbnail_url: info.thumburl.clone(),
        url: info.url.clone(),
        artist,
        license,
        uploaded: info.timestamp.as_deref().and_then(parse_timestamp),
    })
}

/// Strip HTML markup from attribution metadata, which wikis routinely
/// store as anchor tags.
fn strip_html(input: &str) -> String {
    let tags = Regex::new(r"<[^>]*>").expect("tag pattern is valid");
    tags.replace_all(input, "").trim().to_string()
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

// Action API response shapes (private)

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    error: Option<RemoteErrorPayload>,
    #[serde(rename = "continue", default)]
    cont: Option<ContinueBlock>,
    #[serde(default)]
    query: Option<QueryBlock>,
}

#[derive(Debug, Deserialize)]
struct RemoteErrorPayload {
    code: String,
    info: String,
}

#[derive(Debug, Deserialize)]
struct ContinueBlock {
    #[serde(default)]
    aicontinue: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QueryBlock {
    #[serde(default)]
    searchinfo: Option<SearchInfo>,
    #[serde(default)]
    search: Vec<SearchHit>,
    #[serde(default)]
    allimages: Vec<ListedImage>,
    #[serde(default)]
    statistics: Option<SiteStatistics>,
    #[serde(default)]
    normalized: Vec<NormalizedTitle>,
    #[serde(default)]
    pages: Vec<PageRecord>,
}

#[derive(Debug, Deserialize)]
struct SearchInfo {
    #[serde(default)]
    totalhits: u64,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ListedImage {
    title: String,
}

#[derive(Debug, Deserialize)]
struct SiteStatistics {
    #[serde(default)]
    images: u64,
}

#[derive(Debug, Deserialize)]
struct NormalizedTitle {
    from: String,
    to: String,
}

#[derive(Debug, Deserialize)]
struct PageRecord {
    title: String,
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    imageinfo: Vec<ImageInfo>,
}

#[derive(Debug, Deserialize)]
struct ImageInfo {
    #[serde(default)]
    size: u64,
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
    #[serde(default)]
    mime: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    thumburl: Option<String>,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    extmetadata: HashMap<String, ExtMetadataValue>,
}

#[derive(Debug, Deserialize)]
struct ExtMetadataValue {
    value: serde_json::Value,
}

impl ExtMetadataValue {
    /// Metadata values are usually strings but can be numbers.
    fn as_text(&self) -> String {
        match &self.value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
