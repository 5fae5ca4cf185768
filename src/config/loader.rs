use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::AssetSourceOptions, ConfigError};

/// Load asset source options from a TOML file with environment overrides.
pub fn load_options(path: &Path) -> Result<AssetSourceOptions, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let options: AssetSourceOptions = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed("MEDIAWIKI_"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    validate_options(&options)?;
    Ok(options)
}

/// Load options from a TOML string (useful for testing).
pub fn load_options_from_str(toml_str: &str) -> Result<AssetSourceOptions, ConfigError> {
    let options: AssetSourceOptions =
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_options(&options)?;
    Ok(options)
}

/// Validate option values that serde defaults cannot catch.
pub fn validate_options(options: &AssetSourceOptions) -> Result<(), ConfigError> {
    if options.domain.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "domain must not be empty".to_string(),
        ));
    }
    if options.domain.contains("://") {
        return Err(ConfigError::ValidationError(
            "domain must be a bare host, without a scheme".to_string(),
        ));
    }
    if options.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "timeout_secs must be greater than zero".to_string(),
        ));
    }
    if options.thumbnail_width == 0 {
        return Err(ConfigError::ValidationError(
            "thumbnail_width must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_options_from_str_valid() {
        let toml = r#"
domain = "commons.wikimedia.org"
use_query_result_cache = true
label = "Wikimedia Commons"
"#;
        let options = load_options_from_str(toml).unwrap();
        assert_eq!(options.domain, "commons.wikimedia.org");
        assert!(options.use_query_result_cache);
        assert_eq!(options.label.as_deref(), Some("Wikimedia Commons"));
        assert_eq!(options.api_path, "/w/api.php");
    }

    #[test]
    fn test_load_options_from_str_missing_domain() {
        let result = load_options_from_str(r#"label = "no domain""#);
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_options_from_str_empty_domain() {
        let result = load_options_from_str(r#"domain = """#);
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::ValidationError(_)
        ));
    }

    #[test]
    fn test_load_options_file_not_found() {
        let result = load_options(Path::new("/nonexistent/options.toml"));
        assert!(matches!(result.unwrap_err(), ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_load_options_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
domain = "wiki.example.org"
timeout_secs = 10
thumbnail_width = 320
"#
        )
        .unwrap();

        let options = load_options(temp_file.path()).unwrap();
        assert_eq!(options.domain, "wiki.example.org");
        assert_eq!(options.timeout_secs, 10);
        assert_eq!(options.thumbnail_width, 320);
    }

    #[test]
    fn test_validate_rejects_domain_with_scheme() {
        let options = AssetSourceOptions::for_domain("https://commons.wikimedia.org");
        let err = validate_options(&options).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_transport_setup_error_display() {
        let err = ConfigError::TransportSetup("tls backend unavailable".to_string());
        assert_eq!(
            err.to_string(),
            "Failed to set up HTTP transport: tls backend unavailable"
        );
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut options = AssetSourceOptions::for_domain("wiki.example.org");
        options.timeout_secs = 0;
        assert!(validate_options(&options).is_err());
    }
}
