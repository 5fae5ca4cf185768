//! Mock remote API for testing.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{ApiError, MediaWikiApi, QueryResult};

/// One recorded API call, for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    FindAll {
        offset: u32,
        limit: u32,
    },
    Search {
        term: String,
        offset: u32,
        limit: u32,
    },
}

/// Mock implementation of the [`MediaWikiApi`] trait.
///
/// Provides controllable behavior for testing:
/// - Return a configurable result batch
/// - Record every call for assertions
/// - Fail the next call with a scripted error
///
/// # Example
///
/// ```rust,ignore
/// let api = Arc::new(MockMediaWikiApi::new());
/// api.set_result(QueryResult::new(records, 1234));
///
/// let source = MediaWikiAssetSource::with_api("wiki", options, api.clone())?;
/// let result = source.query().execute().await?;
///
/// assert_eq!(api.calls(), vec![RecordedCall::FindAll { offset: 0, limit: 20 }]);
/// ```
pub struct MockMediaWikiApi {
    result: Mutex<QueryResult>,
    next_error: Mutex<Option<ApiError>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl Default for MockMediaWikiApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMediaWikiApi {
    /// Create a mock that returns an empty batch with total 0.
    pub fn new() -> Self {
        Self {
            result: Mutex::new(QueryResult::new(Vec::new(), 0)),
            next_error: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock with a predefined result batch.
    pub fn with_result(result: QueryResult) -> Self {
        let mock = Self::new();
        mock.set_result(result);
        mock
    }

    /// Configure the batch every subsequent call returns.
    pub fn set_result(&self, result: QueryResult) {
        *self.result.lock().unwrap() = result;
    }

    /// Make the next call fail with the given error.
    pub fn fail_next(&self, error: ApiError) {
        *self.next_error.lock().unwrap() = Some(error);
    }

    /// All calls recorded so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn answer(&self, call: RecordedCall) -> Result<QueryResult, ApiError> {
        self.calls.lock().unwrap().push(call);
        if let Some(error) = self.next_error.lock().unwrap().take() {
            return Err(error);
        }
        Ok(self.result.lock().unwrap().clone())
    }
}

#[async_trait]
impl MediaWikiApi for MockMediaWikiApi {
    async fn find_all(&self, offset: u32, limit: u32) -> Result<QueryResult, ApiError> {
        self.answer(RecordedCall::FindAll { offset, limit })
    }

    async fn search(
        &self,
        term: &str,
        offset: u32,
        limit: u32,
    ) -> Result<QueryResult, ApiError> {
        self.answer(RecordedCall::Search {
            term: term.to_string(),
            offset,
            limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_records_calls_in_order() {
        let mock = MockMediaWikiApi::new();
        mock.find_all(0, 20).await.unwrap();
        mock.search("cat", 40, 10).await.unwrap();

        assert_eq!(
            mock.calls(),
            vec![
                RecordedCall::FindAll {
                    offset: 0,
                    limit: 20
                },
                RecordedCall::Search {
                    term: "cat".to_string(),
                    offset: 40,
                    limit: 10
                }
            ]
        );
    }

    #[tokio::test]
    async fn test_mock_scripted_error_fires_once() {
        let mock = MockMediaWikiApi::new();
        mock.fail_next(ApiError::Timeout);

        assert!(mock.find_all(0, 20).await.is_err());
        assert!(mock.find_all(0, 20).await.is_ok());
        assert_eq!(mock.call_count(), 2);
    }
}
