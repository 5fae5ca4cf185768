//! Test doubles and fixtures for consumers of this crate.

pub mod fixtures;
mod mock_api;

pub use mock_api::{MockMediaWikiApi, RecordedCall};
