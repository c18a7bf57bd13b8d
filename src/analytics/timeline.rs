use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::future::Future;
use tokio_util::sync::CancellationToken;

use super::{RecordKey, expand_records};
use crate::api::models::Paper;
use crate::error::Result;
use crate::utils::parse_year;

/// Authors expanded for the publications timeline
pub const DEFAULT_TIMELINE_AUTHORS: usize = 10;

/// Papers requested per author for the timeline
pub const TIMELINE_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearBucket {
    pub year: i32,
    pub paper_count: u64,
    pub citation_count: u64,
}

/// Running per-year counts for one aggregation run
#[derive(Debug, Default)]
pub struct YearAccumulator {
    buckets: BTreeMap<i32, YearBucket>,
}

impl YearAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a paper under its submission year; undated papers are ignored.
    pub fn add(&mut self, paper: &Paper) {
        let Some(year) = paper.preprint_submission_date.as_deref().and_then(parse_year) else {
            return;
        };

        let bucket = self.buckets.entry(year).or_insert(YearBucket {
            year,
            paper_count: 0,
            citation_count: 0,
        });
        bucket.paper_count = bucket.paper_count.saturating_add(1);
        bucket.citation_count = bucket
            .citation_count
            .saturating_add(paper.total_citation.unwrap_or(0));
    }

    /// Buckets in ascending year order
    pub fn into_buckets(self) -> Vec<YearBucket> {
        self.buckets.into_values().collect()
    }
}

/// Fetch papers for the first `limit` records and count them per submission year.
pub async fn aggregate_by_year<R, F, Fut>(
    records: &[R],
    fetch: F,
    limit: usize,
    cancel: &CancellationToken,
) -> Result<Vec<YearBucket>>
where
    R: RecordKey,
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Vec<Paper>>>,
{
    let mut acc = YearAccumulator::new();
    expand_records(records, limit, cancel, fetch, |paper| acc.add(paper)).await?;
    Ok(acc.into_buckets())
}
