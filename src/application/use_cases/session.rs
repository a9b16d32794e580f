use std::fmt::Write as _;

use tracing::{debug, error};

use crate::application::use_cases::{ChatCompletionUseCase, SummarizeUrlsUseCase};
use crate::domain::{Conversation, Message, UrlBatch};

/// Where the session currently is in its request cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingChatResponse,
    AwaitingUrlSummary,
}

/// Single-writer conversation state manager for one session.
///
/// Owns the append-only message sequence, drives the two backend
/// operations, and blocks duplicate submission while a request is
/// outstanding. Failures append nothing and are only logged; every path —
/// success or failure — returns the session to `Idle` and re-enables
/// input. State lives in memory for the session lifetime and is never
/// persisted.
pub struct ChatSession {
    conversation: Conversation,
    state: SessionState,
    chat: ChatCompletionUseCase,
    summarize: SummarizeUrlsUseCase,
}

impl ChatSession {
    pub fn new(chat: ChatCompletionUseCase, summarize: SummarizeUrlsUseCase) -> Self {
        Self {
            conversation: Conversation::new(),
            state: SessionState::Idle,
            chat,
            summarize,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state != SessionState::Idle
    }

    pub fn messages(&self) -> &[Message] {
        self.conversation.messages()
    }

    pub fn len(&self) -> usize {
        self.conversation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversation.is_empty()
    }

    /// Submit a chat turn. The user message is appended before the network
    /// call begins; the reply is appended as one assistant message carrying
    /// whatever sources the history accumulated. Empty input and duplicate
    /// submission are no-ops.
    pub async fn submit_chat(&mut self, input: &str) {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return;
        }
        if self.is_busy() {
            debug!("Chat submission blocked: request already in flight");
            return;
        }

        self.conversation.push_user(trimmed);
        self.state = SessionState::AwaitingChatResponse;

        match self.chat.execute(self.conversation.messages()).await {
            Ok(reply) => {
                self.conversation
                    .push(Message::assistant(reply.content).with_sources(reply.sources));
            }
            Err(e) => error!("Chat request failed: {e}"),
        }

        self.state = SessionState::Idle;
    }

    /// Submit a URL batch pasted as free text (one URL per line). Nothing
    /// is appended until the summary arrives; the resulting assistant
    /// message is tagged with the input URLs as its sources.
    pub async fn submit_urls(&mut self, text: &str) {
        let batch = UrlBatch::parse(text);
        if batch.is_empty() {
            return;
        }
        if self.is_busy() {
            debug!("URL submission blocked: request already in flight");
            return;
        }

        self.state = SessionState::AwaitingUrlSummary;

        match self.summarize.execute(batch.urls()).await {
            Ok(summary) => {
                self.conversation
                    .push(Message::assistant(summary).with_sources(batch.into_urls()));
            }
            Err(e) => error!("URL processing failed: {e}"),
        }

        self.state = SessionState::Idle;
    }

    /// Plain-text rendering of the whole conversation, sources listed under
    /// each attributed message.
    pub fn render_transcript(&self) -> String {
        let mut out = String::new();
        for message in self.conversation.messages() {
            out.push_str(&render_message(message));
        }
        out
    }
}

/// Render one message: role-tagged content, then a labeled source list when
/// attributions are present.
pub fn render_message(message: &Message) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}] {}", message.role(), message.content());
    if let Some(sources) = message.sources() {
        if !sources.is_empty() {
            out.push_str("Sources:\n");
            for source in sources {
                let _ = writeln!(out, "  - {source}");
            }
        }
    }
    out
}
