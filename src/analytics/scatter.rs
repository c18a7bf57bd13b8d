use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::RecordKey;
use crate::api::models::{AuthorSummary, Paper};

/// Authors plotted in the papers-vs-citations scatter
pub const DEFAULT_SCATTER_AUTHORS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub author: String,
    pub papers: u64,
    pub citations: u64,
}

/// Collapse paper rows into one summary per submitting author, in first-seen order.
pub fn summarize_authors(papers: &[Paper]) -> Vec<AuthorSummary> {
    let mut summaries: Vec<AuthorSummary> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for paper in papers {
        let Some(name) = paper.record_key() else {
            continue;
        };
        let citations = paper.total_citation.unwrap_or(0);

        match index.get(name) {
            Some(&i) => {
                let summary = &mut summaries[i];
                summary.paper_count = Some(summary.paper_count.unwrap_or(0) + 1);
                summary.max_citations =
                    Some(summary.max_citations.unwrap_or(0).max(citations));
            }
            None => {
                index.insert(name, summaries.len());
                summaries.push(AuthorSummary {
                    author_name: name.to_string(),
                    paper_count: Some(1),
                    max_citations: Some(citations),
                });
            }
        }
    }

    summaries
}

/// Scatter points for the first `max_authors` authors; missing counts plot as zero.
pub fn author_scatter(authors: &[AuthorSummary], max_authors: usize) -> Vec<ScatterPoint> {
    authors
        .iter()
        .take(max_authors)
        .map(|a| ScatterPoint {
            author: a.author_name.clone(),
            papers: a.paper_count.unwrap_or(0),
            citations: a.max_citations.unwrap_or(0),
        })
        .collect()
}
