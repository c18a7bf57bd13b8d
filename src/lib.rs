// Library interface for the preprint analytics client
// The binary is a thin wrapper; everything testable lives here

pub mod analytics;
pub mod api;
pub mod config;
pub mod error;
pub mod pagination;
pub mod utils;

// Re-export commonly used types
pub use analytics::{AnalyticsReport, AuthorAnalytics};
pub use api::ApiClient;
pub use config::Config;
pub use error::{AnalyticsError, Result};
