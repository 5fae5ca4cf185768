mod loader;
mod types;

pub use loader::{load_options, load_options_from_str, validate_options};
pub use types::*;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Options file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse options: {0}")]
    ParseError(String),

    #[error("Option validation failed: {0}")]
    ValidationError(String),

    #[error("Failed to set up HTTP transport: {0}")]
    TransportSetup(String),
}
