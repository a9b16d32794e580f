mod completion_client;
mod content_fetcher;
mod rate_limiter;

pub use completion_client::*;
pub use content_fetcher::*;
pub use rate_limiter::*;
