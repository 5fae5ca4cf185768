//! Host-facing representation of one remote media file.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::AssetRecord;

/// Converted, host-facing view of an [`AssetRecord`]. Built on demand
/// when the caller actually accesses an entry of a query result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaWikiAssetProxy {
    pub identifier: String,
    pub filename: String,
    pub mime_type: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub size_bytes: u64,
    pub thumbnail_uri: Option<String>,
    pub original_uri: Option<String>,
    /// Attribution text, rendered from the source's notice template.
    pub copyright_notice: String,
    pub uploaded: Option<DateTime<Utc>>,
}

impl MediaWikiAssetProxy {
    /// Convert one record, rendering the attribution text with the given
    /// notice template.
    pub fn from_record(record: &AssetRecord, notice_template: &str) -> Self {
        Self {
            identifier: record.identifier.clone(),
            filename: record.filename.clone(),
            mime_type: record.mime_type.clone(),
            width: record.width,
            height: record.height,
            size_bytes: record.size_bytes,
            thumbnail_uri: record.thumbnail_url.clone(),
            original_uri: record.url.clone(),
            copyright_notice: render_copyright_notice(notice_template, record),
            uploaded: record.uploaded,
        }
    }
}

/// Interpolate `{artist}`, `{license}` and `{title}` into the configured
/// template. With no template configured, falls back to joining whatever
/// attribution data the record carries.
fn render_copyright_notice(template: &str, record: &AssetRecord) -> String {
    let artist = record.artist.as_deref().unwrap_or("");
    let license = record.license.as_deref().unwrap_or("");

    if template.is_empty() {
        return [artist, license]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(", ");
    }

    template
        .replace("{artist}", artist)
        .replace("{license}", license)
        .replace("{title}", &record.filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> AssetRecord {
        AssetRecord {
            identifier: "File:Cat.jpg".to_string(),
            filename: "Cat.jpg".to_string(),
            mime_type: Some("image/jpeg".to_string()),
            width: Some(800),
            height: Some(600),
            size_bytes: 2048,
            thumbnail_url: Some("https://e/t/cat.jpg".to_string()),
            url: Some("https://e/cat.jpg".to_string()),
            artist: Some("Jane Doe".to_string()),
            license: Some("CC BY-SA 4.0".to_string()),
            uploaded: None,
        }
    }

    #[test]
    fn test_from_record_copies_fields() {
        let proxy = MediaWikiAssetProxy::from_record(&record(), "");
        assert_eq!(proxy.identifier, "File:Cat.jpg");
        assert_eq!(proxy.filename, "Cat.jpg");
        assert_eq!(proxy.mime_type.as_deref(), Some("image/jpeg"));
        assert_eq!(proxy.width, Some(800));
        assert_eq!(proxy.size_bytes, 2048);
        assert_eq!(proxy.thumbnail_uri.as_deref(), Some("https://e/t/cat.jpg"));
        assert_eq!(proxy.original_uri.as_deref(), Some("https://e/cat.jpg"));
    }

    #[test]
    fn test_notice_template_interpolation() {
        let proxy = MediaWikiAssetProxy::from_record(
            &record(),
            "{title} by {artist}, licensed under {license}",
        );
        assert_eq!(
            proxy.copyright_notice,
            "Cat.jpg by Jane Doe, licensed under CC BY-SA 4.0"
        );
    }

    #[test]
    fn test_empty_template_falls_back_to_joined_attribution() {
        let proxy = MediaWikiAssetProxy::from_record(&record(), "");
        assert_eq!(proxy.copyright_notice, "Jane Doe, CC BY-SA 4.0");

        let mut bare = record();
        bare.artist = None;
        let proxy = MediaWikiAssetProxy::from_record(&bare, "");
        assert_eq!(proxy.copyright_notice, "CC BY-SA 4.0");

        bare.license = None;
        let proxy = MediaWikiAssetProxy::from_record(&bare, "");
        assert_eq!(proxy.copyright_notice, "");
    }
}
