pub mod application;
pub mod connector;
pub mod domain;

pub use application::{
    ChatCompletionUseCase, ChatReply, ChatSession, CompletionClient, ContentFetcher, RateLimiter,
    SessionState, SummarizeUrlsUseCase,
};

pub use connector::{
    build_router, AppState, Container, HttpFetcher, MockCompletion, MockFetcher, MockRateLimiter,
    OpenAiClient, RestRateLimiter,
};

pub use domain::{
    ChatTurn, Conversation, DomainError, Message, RateLimitDecision, RateLimitPolicy, Role,
    UrlBatch,
};
