pub mod client;
pub mod models;
pub mod retry;

pub use client::ApiClient;
pub use retry::{RetryPolicy, RetryScope, retry_with_backoff};
