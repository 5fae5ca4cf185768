use serde::{Deserialize, Serialize};

/// Options for a single MediaWiki asset source.
///
/// Mirrors the option map a host system hands to the connector: the remote
/// wiki host plus presentation bits (label, icon, attribution template).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssetSourceOptions {
    /// Remote wiki host (e.g. "commons.wikimedia.org").
    pub domain: String,
    /// Path of the Action API endpoint on that host (default: "/w/api.php").
    #[serde(default = "default_api_path")]
    pub api_path: String,
    /// Whether identical queries should be answered from the in-process
    /// result cache instead of hitting the network again.
    #[serde(default)]
    pub use_query_result_cache: bool,
    /// Human readable label; falls back to the domain when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Icon path for the host's source picker. Resolution is up to the host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Attribution template interpolated per asset with `{artist}`,
    /// `{license}` and `{title}` placeholders.
    #[serde(default)]
    pub copy_right_notice_template: String,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// Width in pixels requested for thumbnail renditions (default: 240).
    #[serde(default = "default_thumbnail_width")]
    pub thumbnail_width: u32,
}

fn default_api_path() -> String {
    "/w/api.php".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_thumbnail_width() -> u32 {
    240
}

impl AssetSourceOptions {
    /// Create options for a domain with all defaults.
    pub fn for_domain(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            api_path: default_api_path(),
            use_query_result_cache: false,
            label: None,
            icon: None,
            copy_right_notice_template: String::new(),
            timeout_secs: default_timeout(),
            thumbnail_width: default_thumbnail_width(),
        }
    }

    /// Full URL of the Action API endpoint.
    pub fn endpoint(&self) -> String {
        format!(
            "https://{}/{}",
            self.domain.trim_end_matches('/'),
            self.api_path.trim_start_matches('/')
        )
    }
}
