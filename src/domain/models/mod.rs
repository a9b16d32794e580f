mod message;
mod rate_limit;
mod url_batch;

pub use message::*;
pub use rate_limit::*;
pub use url_batch::*;
