//! Client-side aggregation of author search results into chart series.
//!
//! Every aggregation expands the first `limit` top-level records one at a time,
//! fetching each record's papers through a caller-supplied fetcher. A fetch that
//! fails is logged and skipped; only cancellation aborts the run.

pub mod scatter;
pub mod subjects;
pub mod timeline;

use serde::Serialize;
use std::future::Future;
use tokio_util::sync::CancellationToken;

use crate::api::ApiClient;
use crate::api::models::{AuthorSummary, Paper};
use crate::error::{AnalyticsError, Result};

pub use scatter::{ScatterPoint, author_scatter, summarize_authors};
pub use subjects::{SubjectBucket, aggregate_by_subject};
pub use timeline::{YearBucket, aggregate_by_year};

/// A top-level record whose papers can be fetched by key
pub trait RecordKey {
    fn record_key(&self) -> Option<&str>;
}

impl RecordKey for AuthorSummary {
    fn record_key(&self) -> Option<&str> {
        Some(self.author_name.as_str()).filter(|name| !name.trim().is_empty())
    }
}

impl RecordKey for Paper {
    fn record_key(&self) -> Option<&str> {
        self.submission_contact
            .as_deref()
            .filter(|name| !name.trim().is_empty())
    }
}

/// Counters from one expansion pass, used for the summary log line
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ExpansionStats {
    pub expanded: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Fetch the papers of the first `limit` records in order and hand each one to `visit`.
pub(crate) async fn expand_records<R, F, Fut, V>(
    records: &[R],
    limit: usize,
    cancel: &CancellationToken,
    mut fetch: F,
    mut visit: V,
) -> Result<ExpansionStats>
where
    R: RecordKey,
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Vec<Paper>>>,
    V: FnMut(&Paper),
{
    let mut stats = ExpansionStats::default();

    for record in records.iter().take(limit) {
        if cancel.is_cancelled() {
            return Err(AnalyticsError::Cancelled);
        }

        let Some(key) = record.record_key() else {
            log::warn!("Skipping record without an author name");
            stats.skipped += 1;
            continue;
        };

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(AnalyticsError::Cancelled),
            result = fetch(key.to_string()) => result,
        };

        match result {
            Ok(papers) => {
                papers.iter().for_each(&mut visit);
                stats.expanded += 1;
            }
            Err(AnalyticsError::Cancelled) => return Err(AnalyticsError::Cancelled),
            Err(e) => {
                log::warn!("Failed to fetch papers for {}: {}", key, e);
                stats.failed += 1;
            }
        }
    }

    log::debug!(
        "Expanded {} record(s), {} failed, {} skipped",
        stats.expanded,
        stats.failed,
        stats.skipped
    );
    Ok(stats)
}

/// Limits used when building an [`AnalyticsReport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// Page size of the initial author search
    pub search_page_size: u32,
    pub scatter_authors: usize,
    pub timeline_authors: usize,
    pub timeline_page_size: u32,
    pub subject_authors: usize,
    pub subject_page_size: u32,
    pub top_subjects: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            search_page_size: 20,
            scatter_authors: scatter::DEFAULT_SCATTER_AUTHORS,
            timeline_authors: timeline::DEFAULT_TIMELINE_AUTHORS,
            timeline_page_size: timeline::TIMELINE_PAGE_SIZE,
            subject_authors: subjects::DEFAULT_SUBJECT_AUTHORS,
            subject_page_size: subjects::SUBJECT_PAGE_SIZE,
            top_subjects: subjects::TOP_SUBJECTS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    pub query: String,
    pub scatter: Vec<ScatterPoint>,
    pub timeline: Vec<YearBucket>,
    pub subjects: Vec<SubjectBucket>,
}

/// Author analytics backed by the REST API
pub struct AuthorAnalytics {
    client: ApiClient,
    options: ReportOptions,
}

impl AuthorAnalytics {
    pub fn new(client: ApiClient) -> Self {
        Self::with_options(client, ReportOptions::default())
    }

    pub fn with_options(client: ApiClient, options: ReportOptions) -> Self {
        Self { client, options }
    }

    /// Search authors matching `query` and build every chart series for them.
    ///
    /// Fails only when the author search itself fails or `cancel` fires.
    pub async fn report(&self, query: &str, cancel: &CancellationToken) -> Result<AnalyticsReport> {
        let client = self.client.with_cancellation(cancel.clone());
        let opts = &self.options;

        let search = client
            .search_authors(query, 1, opts.search_page_size)
            .await?;
        let authors = summarize_authors(&search.papers);
        log::info!(
            "Author search '{}' returned {} paper(s) from {} author(s)",
            query,
            search.papers.len(),
            authors.len()
        );

        let scatter = author_scatter(&authors, opts.scatter_authors);

        let client = &client;
        let timeline_page_size = opts.timeline_page_size;
        let timeline = aggregate_by_year(
            &authors,
            move |name| async move {
                client
                    .author_papers(&name, 1, timeline_page_size)
                    .await
                    .map(|r| r.papers)
            },
            opts.timeline_authors,
            cancel,
        )
        .await?;

        let subject_page_size = opts.subject_page_size;
        let subjects = aggregate_by_subject(
            &authors,
            move |name| async move {
                client
                    .author_papers(&name, 1, subject_page_size)
                    .await
                    .map(|r| r.papers)
            },
            opts.subject_authors,
            opts.top_subjects,
            cancel,
        )
        .await?;

        Ok(AnalyticsReport {
            query: query.trim().to_string(),
            scatter,
            timeline,
            subjects,
        })
    }
}
