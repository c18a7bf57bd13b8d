use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::future::Future;
use tokio_util::sync::CancellationToken;

use super::{RecordKey, expand_records};
use crate::api::models::Paper;
use crate::error::Result;

/// Authors expanded for the subject distribution
pub const DEFAULT_SUBJECT_AUTHORS: usize = 20;

/// Papers requested per author for the subject distribution
pub const SUBJECT_PAGE_SIZE: u32 = 50;

/// Subjects kept in the chart
pub const TOP_SUBJECTS: usize = 8;

/// Chart colours, indexed by `SubjectBucket::color_index`
pub const PALETTE: [&str; 8] = [
    "#3B82F6", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6", "#06B6D4", "#F97316", "#84CC16",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectBucket {
    /// Lower-cased
    pub subject: String,
    pub count: u64,
    pub color_index: usize,
}

impl SubjectBucket {
    pub fn color(&self) -> &'static str {
        PALETTE[self.color_index % PALETTE.len()]
    }

    /// Subject with its first letter upper-cased, for chart labels
    pub fn display_name(&self) -> String {
        let mut chars = self.subject.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// Running per-subject counts, remembering first-seen order for ties
#[derive(Debug, Default)]
pub struct SubjectAccumulator {
    counts: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl SubjectAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, paper: &Paper) {
        let Some(subject) = paper
            .preprint_subject
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
        else {
            return;
        };

        match self.index.get(&subject) {
            Some(&i) => self.counts[i].1 += 1,
            None => {
                self.index.insert(subject.clone(), self.counts.len());
                self.counts.push((subject, 1));
            }
        }
    }

    /// Top `top_k` subjects by count, descending
    pub fn into_buckets(self, top_k: usize) -> Vec<SubjectBucket> {
        let mut counts = self.counts;
        // stable: equal counts keep first-seen order
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        counts
            .into_iter()
            .take(top_k)
            .enumerate()
            .map(|(i, (subject, count))| SubjectBucket {
                subject,
                count,
                color_index: i % PALETTE.len(),
            })
            .collect()
    }
}

/// Fetch papers for the first `limit` records and count the `top_k` most common subjects.
pub async fn aggregate_by_subject<R, F, Fut>(
    records: &[R],
    fetch: F,
    limit: usize,
    top_k: usize,
    cancel: &CancellationToken,
) -> Result<Vec<SubjectBucket>>
where
    R: RecordKey,
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Vec<Paper>>>,
{
    let mut acc = SubjectAccumulator::new();
    expand_records(records, limit, cancel, fetch, |paper| acc.add(paper)).await?;
    Ok(acc.into_buckets(top_k))
}
