// Test data builders for constructing API payloads
// These builders provide a fluent API for creating papers and search responses

use preprint_analytics::api::models::Paper;
use serde_json::{Value, json};

/// Builder for a single paper row
#[derive(Default)]
pub struct PaperBuilder {
    paper: Paper,
}

impl PaperBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            paper: Paper {
                ppc_id: Some(id.to_string()),
                ..Default::default()
            },
        }
    }

    pub fn by(mut self, contact: &str) -> Self {
        self.paper.submission_contact = Some(contact.to_string());
        self
    }

    pub fn dated(mut self, date: &str) -> Self {
        self.paper.preprint_submission_date = Some(date.to_string());
        self
    }

    pub fn subject(mut self, subject: &str) -> Self {
        self.paper.preprint_subject = Some(subject.to_string());
        self
    }

    pub fn citations(mut self, citations: u64) -> Self {
        self.paper.total_citation = Some(citations);
        self
    }

    pub fn build(self) -> Paper {
        self.paper
    }

    pub fn build_json(self) -> Value {
        serde_json::to_value(self.paper).expect("paper serializes")
    }
}

/// Builder for paginated `{ papers, total, ... }` responses
pub struct SearchResponseBuilder {
    papers: Vec<Value>,
    total: Option<u64>,
    page: u32,
    page_size: u32,
}

impl SearchResponseBuilder {
    pub fn new() -> Self {
        Self {
            papers: Vec::new(),
            total: None,
            page: 1,
            page_size: 20,
        }
    }

    pub fn with_paper(mut self, paper: PaperBuilder) -> Self {
        self.papers.push(paper.build_json());
        self
    }

    pub fn with_papers(mut self, papers: Vec<PaperBuilder>) -> Self {
        self.papers
            .extend(papers.into_iter().map(PaperBuilder::build_json));
        self
    }

    pub fn with_total(mut self, total: u64) -> Self {
        self.total = Some(total);
        self
    }

    pub fn with_page(mut self, page: u32, page_size: u32) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }

    pub fn build(self) -> Value {
        let total = self.total.unwrap_or(self.papers.len() as u64);
        let has_next = (self.page as u64) * (self.page_size as u64) < total;
        json!({
            "papers": self.papers,
            "total": total,
            "page": self.page,
            "page_size": self.page_size,
            "has_next": has_next,
        })
    }
}

impl Default for SearchResponseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_builder() {
        let body = SearchResponseBuilder::new()
            .with_paper(PaperBuilder::new("P1").dated("2020-01-01"))
            .with_total(45)
            .build();

        assert_eq!(body["papers"].as_array().unwrap().len(), 1);
        assert_eq!(body["total"], 45);
        assert_eq!(body["has_next"], true);
        assert_eq!(body["papers"][0]["PPC_Id"], "P1");
    }
}
