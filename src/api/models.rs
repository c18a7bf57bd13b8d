use serde::{Deserialize, Serialize};

use crate::utils::lenient_count;

// ============= Paper Models =============

/// A preprint row as returned by the search and author endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    #[serde(rename = "PPC_Id", default, skip_serializing_if = "Option::is_none")]
    pub ppc_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preprint_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preprint_doi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preprint_subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preprint_server: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preprint_submission_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_authors: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_contact: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_citation: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_name: Option<String>,
}

/// Paginated list of papers (`/papers/search`, `/authors/search`, `/authors/{name}/papers`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub papers: Vec<Paper>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total: Option<u64>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub has_next: bool,
}

// ============= Author Models =============

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorSummary {
    pub author_name: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub paper_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub max_citations: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorListResponse {
    #[serde(default)]
    pub authors: Vec<AuthorSummary>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total: Option<u64>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub has_next: bool,
}

// ============= Health Models =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub database: bool,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl HealthResponse {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy" && self.database
    }
}

// ============= Query Parameters =============

/// Optional filters accepted by the analytics endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyticsFilter {
    pub time_range: Option<String>,
    pub subject: Option<String>,
}

impl AnalyticsFilter {
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![];
        if let Some(t) = &self.time_range {
            params.push(("time_range", t.clone()));
        }
        if let Some(s) = &self.subject {
            params.push(("subject", s.clone()));
        }
        params
    }
}
