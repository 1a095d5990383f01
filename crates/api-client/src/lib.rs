pub mod client;
pub mod retry;

pub use agentdeck_api;
pub use client::ApiClient;
pub use retry::RetryConfig;
