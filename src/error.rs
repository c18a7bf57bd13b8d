use thiserror::Error;

/// Whether a failure is worth another attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Retryable,
    Terminal,
}

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatusError { status: u16, body: String },

    #[error("JSON parsing error: {0}")]
    DecodeError(#[from] serde_json::Error),

    #[error("Request failed after {attempts} attempt(s): {source}")]
    ExhaustedRetries {
        attempts: u32,
        #[source]
        source: Box<AnalyticsError>,
    },

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AnalyticsError {
    /// Classify the error for [`RetryScope::TransientOnly`](crate::api::retry::RetryScope).
    ///
    /// 408 and 429 are transient even though they are 4xx.
    pub fn class(&self) -> ErrorClass {
        match self {
            AnalyticsError::NetworkError(_) | AnalyticsError::DecodeError(_) => {
                ErrorClass::Retryable
            }
            AnalyticsError::HttpStatusError { status, .. } => match status {
                408 | 429 => ErrorClass::Retryable,
                400..=499 => ErrorClass::Terminal,
                _ => ErrorClass::Retryable,
            },
            AnalyticsError::ExhaustedRetries { .. }
            | AnalyticsError::Cancelled
            | AnalyticsError::InvalidInput(_)
            | AnalyticsError::ConfigError(_) => ErrorClass::Terminal,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, AnalyticsError::Cancelled)
    }

    /// The underlying failure, looking through `ExhaustedRetries`.
    pub fn root(&self) -> &AnalyticsError {
        match self {
            AnalyticsError::ExhaustedRetries { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;
