pub mod client;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod rate_limit;
pub mod retry;
pub mod types;

pub use client::WongnaiClient;
pub use error::{ExtractError, ScraperError};
pub use normalize::normalize_status;
pub use rate_limit::RateLimiter;
pub use retry::RetryPolicy;
pub use types::{FetchedPage, OpenState, Signal, SignalSource};
