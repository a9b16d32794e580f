mod http_fetcher;
mod mock_completion;
mod mock_fetcher;
mod mock_rate_limiter;
mod openai_client;
mod rest_rate_limiter;

pub use http_fetcher::*;
pub use mock_completion::*;
pub use mock_fetcher::*;
pub use mock_rate_limiter::*;
pub use openai_client::*;
pub use rest_rate_limiter::*;
