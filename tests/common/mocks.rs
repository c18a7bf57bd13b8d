// Mock implementations for testing
// Provides an in-memory paper fetcher and wiremock mounting helpers

use preprint_analytics::api::models::Paper;
use preprint_analytics::{AnalyticsError, Result};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::future::{Ready, ready};
use std::sync::{Arc, Mutex};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Canned outcome for one fetch
#[derive(Debug, Clone)]
pub enum Scripted {
    Papers(Vec<Paper>),
    /// Fails as if the retry policy was exhausted on this status
    Fail(u16),
}

/// In-memory stand-in for a per-author paper fetcher
#[derive(Default)]
pub struct MockPaperFetcher {
    scripts: Arc<Mutex<HashMap<String, VecDeque<Scripted>>>>,
    defaults: Arc<Mutex<HashMap<String, Scripted>>>,
    call_history: Arc<Mutex<Vec<String>>>,
}

impl MockPaperFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call for `key` returns `papers`
    pub fn always(self, key: &str, papers: Vec<Paper>) -> Self {
        self.defaults
            .lock()
            .unwrap()
            .insert(key.to_string(), Scripted::Papers(papers));
        self
    }

    /// Every call for `key` fails
    pub fn always_fail(self, key: &str, status: u16) -> Self {
        self.defaults
            .lock()
            .unwrap()
            .insert(key.to_string(), Scripted::Fail(status));
        self
    }

    /// Queue one-shot responses for `key`, consumed before the default
    pub fn then(self, key: &str, responses: Vec<Scripted>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .entry(key.to_string())
            .or_default()
            .extend(responses);
        self
    }

    /// Record the call and resolve immediately
    pub fn fetch(&self, key: String) -> Ready<Result<Vec<Paper>>> {
        self.call_history.lock().unwrap().push(key.clone());

        let scripted = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(&key)
            .and_then(VecDeque::pop_front)
            .or_else(|| self.defaults.lock().unwrap().get(&key).cloned());

        ready(match scripted {
            Some(Scripted::Papers(papers)) => Ok(papers),
            Some(Scripted::Fail(status)) => Err(AnalyticsError::ExhaustedRetries {
                attempts: 3,
                source: Box::new(AnalyticsError::HttpStatusError {
                    status,
                    body: "scripted failure".to_string(),
                }),
            }),
            None => Err(AnalyticsError::InvalidInput(format!("No script for {}", key))),
        })
    }

    pub fn call_history(&self) -> Vec<String> {
        self.call_history.lock().unwrap().clone()
    }

    pub fn call_count(&self, key: &str) -> usize {
        self.call_history
            .lock()
            .unwrap()
            .iter()
            .filter(|k| k.as_str() == key)
            .count()
    }
}

/// Serve `body` for `/api/authors/search?query=<query>`
pub async fn mount_author_search(server: &MockServer, query: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path("/api/authors/search"))
        .and(query_param("query", query))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Serve `body` for `/api/authors/<encoded_name>/papers`
pub async fn mount_author_papers(server: &MockServer, encoded_name: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/api/authors/{}/papers", encoded_name)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Fail every request to `endpoint` with `status`
pub async fn mount_failure(server: &MockServer, endpoint: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(endpoint.to_string()))
        .respond_with(ResponseTemplate::new(status).set_body_string("upstream failure"))
        .mount(server)
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripts_before_default() {
        let mock = MockPaperFetcher::new()
            .then("A", vec![Scripted::Fail(502)])
            .always("A", vec![Paper::default()]);

        tokio_test::assert_err!(mock.fetch("A".to_string()).await);
        let papers = tokio_test::assert_ok!(mock.fetch("A".to_string()).await);
        assert_eq!(papers.len(), 1);
        assert_eq!(mock.call_count("A"), 2);
    }

    #[tokio::test]
    async fn test_unscripted_key_fails() {
        let mock = MockPaperFetcher::new();
        tokio_test::assert_err!(mock.fetch("nobody".to_string()).await);
        assert_eq!(mock.call_history(), vec!["nobody".to_string()]);
    }
}
