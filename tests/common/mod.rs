// Common test utilities and helpers for the analytics integration tests
// This module exports shared test infrastructure used across all test suites

#![allow(dead_code)]

pub mod builders;
pub mod mocks;

use preprint_analytics::analytics::YearBucket;
use preprint_analytics::api::RetryPolicy;
use preprint_analytics::{AnalyticsError, ApiClient, Config};
use std::time::Duration;
use wiremock::MockServer;

/// Client pointed at a mock server, with millisecond backoff so retries stay fast
pub fn client_for(server: &MockServer) -> ApiClient {
    client_with_retry(server, RetryPolicy::new(3, Duration::from_millis(5)))
}

pub fn client_with_retry(server: &MockServer, retry: RetryPolicy) -> ApiClient {
    let config = Config {
        base_url: format!("{}/api", server.uri()),
        timeout: Duration::from_secs(5),
        retry,
    };
    ApiClient::new(&config).expect("client config is valid")
}

/// Assertion helper utilities for common test scenarios
pub struct AssertionHelper;

impl AssertionHelper {
    /// Year buckets reduced to (year, paper_count) pairs
    pub fn year_counts(buckets: &[YearBucket]) -> Vec<(i32, u64)> {
        buckets.iter().map(|b| (b.year, b.paper_count)).collect()
    }

    /// Assert that an error, looking through retry wrapping, has the given HTTP status
    pub fn assert_http_status(err: &AnalyticsError, expected: u16) {
        match err.root() {
            AnalyticsError::HttpStatusError { status, .. } => assert_eq!(*status, expected),
            other => panic!("Expected HTTP {}, got {:?}", expected, other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_counts() {
        let buckets = vec![YearBucket {
            year: 2020,
            paper_count: 2,
            citation_count: 9,
        }];
        assert_eq!(AssertionHelper::year_counts(&buckets), vec![(2020, 2)]);
    }

    #[test]
    #[should_panic(expected = "Expected HTTP 500")]
    fn test_assert_http_status_mismatch() {
        AssertionHelper::assert_http_status(&AnalyticsError::Cancelled, 500);
    }
}
