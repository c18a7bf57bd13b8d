use serde::{Deserialize, Serialize};

use crate::api::models::SearchResponse;

/// Rows per search results page
pub const RESULTS_PER_PAGE: u32 = 20;

/// Search results beyond this are not paged through
pub const MAX_RESULTS: u64 = 200;

/// Paging state of a search results list
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageSummary {
    /// Current page (1-indexed)
    pub page: u32,

    /// Items per page
    pub per_page: u32,

    /// Total results, capped at [`MAX_RESULTS`]
    pub total_results: u64,

    pub total_pages: u32,
}

impl PageSummary {
    /// A missing or zero `total` falls back to the number of rows returned.
    pub fn from_response(response: &SearchResponse, page: u32, per_page: u32) -> Self {
        let reported = response
            .total
            .filter(|t| *t > 0)
            .unwrap_or(response.papers.len() as u64);
        let total_results = reported.min(MAX_RESULTS);
        let per_page = per_page.max(1);

        Self {
            page,
            per_page,
            total_results,
            total_pages: total_results.div_ceil(per_page as u64) as u32,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}
