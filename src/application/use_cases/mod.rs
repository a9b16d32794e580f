mod chat_completion;
mod session;
mod summarize_urls;

pub use chat_completion::*;
pub use session::*;
pub use summarize_urls::*;
