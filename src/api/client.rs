use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use super::models::*;
use super::retry::{self, RetryPolicy};
use crate::config::Config;
use crate::error::{AnalyticsError, Result};

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    retry: RetryPolicy,
    cancel: CancellationToken,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            AnalyticsError::ConfigError(format!("Invalid base URL '{}': {}", config.base_url, e))
        })?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(AnalyticsError::NetworkError)?;

        Ok(Self {
            client,
            base_url,
            retry: config.retry.clone(),
            cancel: CancellationToken::new(),
        })
    }

    /// A handle sharing the connection pool whose requests stop when `cancel` fires.
    pub fn with_cancellation(&self, cancel: CancellationToken) -> Self {
        Self {
            cancel,
            ..self.clone()
        }
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    fn endpoint_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                AnalyticsError::ConfigError(format!("Base URL cannot have a path: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.endpoint_url(segments)?;
        let this = self;

        retry::retry_with_backoff(&self.retry, &self.cancel, move || {
            this.get_once(url.clone(), query)
        })
        .await
    }

    async fn get_once<T: DeserializeOwned>(&self, url: Url, query: &[(&str, String)]) -> Result<T> {
        log::debug!("GET {}", url);
        let response = self.client.get(url).query(query).send().await?;
        self.handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            Err(AnalyticsError::HttpStatusError {
                status: status.as_u16(),
                body,
            })
        }
    }

    // ============= Papers API =============

    pub async fn search_papers(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<SearchResponse> {
        let query = non_empty(query, "search query")?;
        let params = vec![
            ("query", query.to_string()),
            ("page", page.to_string()),
            ("page_size", page_size.to_string()),
        ];

        self.get(&["papers", "search"], &params).await
    }

    pub async fn get_paper(&self, ppc_id: &str) -> Result<Paper> {
        let ppc_id = non_empty(ppc_id, "paper id")?;
        self.get(&["papers", ppc_id], &[]).await
    }

    pub async fn list_papers(&self, filters: &[(&str, String)]) -> Result<SearchResponse> {
        self.get(&["papers", ""], filters).await
    }

    // ============= Authors API =============

    pub async fn search_authors(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<SearchResponse> {
        let query = non_empty(query, "author query")?;
        let params = vec![
            ("query", query.to_string()),
            ("page", page.to_string()),
            ("page_size", page_size.to_string()),
        ];

        self.get(&["authors", "search"], &params).await
    }

    pub async fn list_authors(&self, page: u32, page_size: u32) -> Result<AuthorListResponse> {
        let params = vec![
            ("page", page.to_string()),
            ("page_size", page_size.to_string()),
        ];

        self.get(&["authors", "list"], &params).await
    }

    /// Papers submitted by one author; the name is percent-encoded as a path segment.
    pub async fn author_papers(
        &self,
        author_name: &str,
        page: u32,
        page_size: u32,
    ) -> Result<SearchResponse> {
        let author_name = non_empty(author_name, "author name")?;
        let params = vec![
            ("page", page.to_string()),
            ("page_size", page_size.to_string()),
        ];

        self.get(&["authors", author_name, "papers"], &params).await
    }

    // ============= Subjects & Analytics API =============

    pub async fn subjects(&self) -> Result<Value> {
        self.get(&["subjects", ""], &[]).await
    }

    /// Raw payload of an `/analytics/*` endpoint, e.g. `dashboard` or `citations`.
    pub async fn analytics(&self, path: &str, filter: &AnalyticsFilter) -> Result<Value> {
        let path = non_empty(path, "analytics path")?;
        let mut segments = vec!["analytics"];
        segments.extend(path.split('/').filter(|s| !s.is_empty()));

        self.get(&segments, &filter.to_params()).await
    }

    // ============= Health API =============

    pub async fn health(&self) -> Result<HealthResponse> {
        self.get(&["health", ""], &[]).await
    }
}

fn non_empty<'a>(value: &'a str, what: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AnalyticsError::InvalidInput(format!("{} must not be empty", what)));
    }
    Ok(trimmed)
}
