//! Test fixtures for building records and result batches.

use crate::api::{AssetRecord, QueryResult};

/// A plausible image record for the given file title.
pub fn image_record(title: &str) -> AssetRecord {
    let identifier = format!("File:{title}");
    AssetRecord {
        identifier,
        filename: title.to_string(),
        mime_type: Some("image/jpeg".to_string()),
        width: Some(1024),
        height: Some(768),
        size_bytes: 123_456,
        thumbnail_url: Some(format!("https://wiki.example.org/thumb/{title}")),
        url: Some(format!("https://wiki.example.org/media/{title}")),
        artist: Some("Example Artist".to_string()),
        license: Some("CC BY-SA 4.0".to_string()),
        uploaded: None,
    }
}

/// A batch of `count` records named `Image-0.jpg` .. with the given total.
pub fn result_batch(count: usize, total_results: u64) -> QueryResult {
    let records = (0..count)
        .map(|i| image_record(&format!("Image-{i}.jpg")))
        .collect();
    QueryResult::new(records, total_results)
}
