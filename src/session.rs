//! In-memory conversation state.
//!
//! The message list is append-only until cleared. Each accepted submission
//! appends exactly one user message and, once the transport settles, exactly
//! one assistant message; while a submission is outstanding, further submits
//! are refused. Clearing bumps an epoch counter so that a request still in
//! flight when the chat was cleared settles into nothing instead of
//! appending to the fresh conversation.

use crate::api::GenerateOutcome;
use crate::types::{ChatMessage, Role, Tool};
use time::OffsetDateTime;

/// Advisory composer budget shown next to the character counter. Input
/// beyond it is still representable and sendable.
pub const INPUT_SOFT_LIMIT: usize = 2000;

const ERROR_PREFIX: &str = "Error: ";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    epoch: u64,
    pending: bool,
}

impl Conversation {
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// True while a submission is awaiting its settlement.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Append the user's message and hand back the epoch the eventual
    /// settlement must present. Returns `None` without a side effect for
    /// whitespace-only input, or while an earlier submission is still
    /// outstanding; the caller must not issue a transport call in either
    /// case.
    pub fn submit(&mut self, input: &str, tool: Tool) -> Option<u64> {
        let trimmed = input.trim();
        if trimmed.is_empty() || self.pending {
            return None;
        }
        self.pending = true;
        self.messages.push(ChatMessage {
            role: Role::User,
            content: trimmed.to_string(),
            created_at: Some(OffsetDateTime::now_utc()),
            tool,
        });
        Some(self.epoch)
    }

    /// Append the assistant's reply for a submission made at `epoch`. A
    /// failure settles as a visible error-prefixed message. Returns false
    /// (and appends nothing) when the chat was cleared in the meantime.
    pub fn settle(&mut self, epoch: u64, tool: Tool, outcome: GenerateOutcome) -> bool {
        if epoch != self.epoch {
            return false;
        }
        self.pending = false;
        let content = match outcome {
            GenerateOutcome::Output(text) => text,
            GenerateOutcome::Failure(message) => format!("{ERROR_PREFIX}{message}"),
        };
        self.messages.push(ChatMessage {
            role: Role::Assistant,
            content,
            created_at: Some(OffsetDateTime::now_utc()),
            tool,
        });
        true
    }

    /// Empty the list unconditionally. Idempotent; always invalidates any
    /// outstanding request.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.epoch = self.epoch.wrapping_add(1);
        self.pending = false;
    }

    /// Content of the most recent user message, used by the regenerate
    /// action on assistant bubbles.
    pub fn last_user_prompt(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|msg| msg.role == Role::User)
            .map(|msg| msg.content.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(text: &str) -> GenerateOutcome {
        GenerateOutcome::Output(text.to_string())
    }

    #[test]
    fn submission_appends_one_user_then_one_assistant_message() {
        let mut convo = Conversation::default();
        let epoch = convo.submit("  hello there  ", Tool::Writer).unwrap();
        assert_eq!(convo.messages().len(), 1);
        assert_eq!(convo.messages()[0].role, Role::User);
        assert_eq!(convo.messages()[0].content, "hello there");

        assert!(convo.settle(epoch, Tool::Writer, output("hi")));
        assert_eq!(convo.messages().len(), 2);
        assert_eq!(convo.messages()[1].role, Role::Assistant);
        assert_eq!(convo.messages()[1].content, "hi");
    }

    #[test]
    fn whitespace_submission_is_a_noop() {
        let mut convo = Conversation::default();
        assert_eq!(convo.submit("", Tool::Explainer), None);
        assert_eq!(convo.submit("   \n\t ", Tool::Explainer), None);
        assert!(convo.is_empty());
    }

    #[test]
    fn submit_is_refused_while_a_request_is_outstanding() {
        let mut convo = Conversation::default();
        let epoch = convo.submit("first", Tool::Writer).unwrap();
        assert!(convo.is_pending());
        assert_eq!(convo.submit("second", Tool::Writer), None);
        assert_eq!(convo.messages().len(), 1);

        assert!(convo.settle(epoch, Tool::Writer, output("reply")));
        assert!(!convo.is_pending());
        assert!(convo.submit("third", Tool::Writer).is_some());
    }

    #[test]
    fn clear_releases_an_outstanding_submission() {
        let mut convo = Conversation::default();
        convo.submit("first", Tool::Writer).unwrap();
        convo.clear();
        assert!(!convo.is_pending());
        assert!(convo.submit("second", Tool::Writer).is_some());
    }

    #[test]
    fn failure_settles_as_error_prefixed_assistant_message() {
        let mut convo = Conversation::default();
        let epoch = convo.submit("hi", Tool::Search).unwrap();
        convo.settle(
            epoch,
            Tool::Search,
            GenerateOutcome::Failure("connection refused".to_string()),
        );
        let last = convo.messages().last().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(last.content, "Error: connection refused");
    }

    #[test]
    fn clear_is_unconditional_and_idempotent() {
        let mut convo = Conversation::default();
        let epoch = convo.submit("hi", Tool::Writer).unwrap();
        convo.settle(epoch, Tool::Writer, output("hello"));
        convo.clear();
        assert!(convo.is_empty());
        convo.clear();
        assert!(convo.is_empty());
    }

    #[test]
    fn late_settlement_after_clear_is_dropped() {
        let mut convo = Conversation::default();
        let epoch = convo.submit("hi", Tool::Writer).unwrap();
        convo.clear();
        assert!(!convo.settle(epoch, Tool::Writer, output("too late")));
        assert!(convo.is_empty());

        // A fresh submission after the clear still settles normally.
        let epoch = convo.submit("again", Tool::Writer).unwrap();
        assert!(convo.settle(epoch, Tool::Writer, output("ok")));
        assert_eq!(convo.messages().len(), 2);
    }

    #[test]
    fn last_user_prompt_skips_assistant_messages() {
        let mut convo = Conversation::default();
        let epoch = convo.submit("first", Tool::Rephraser).unwrap();
        convo.settle(epoch, Tool::Rephraser, output("reply"));
        assert_eq!(convo.last_user_prompt(), Some("first"));

        let epoch = convo.submit("second", Tool::Rephraser).unwrap();
        convo.settle(epoch, Tool::Rephraser, output("reply"));
        assert_eq!(convo.last_user_prompt(), Some("second"));
    }

    #[test]
    fn oversized_input_is_still_accepted() {
        let mut convo = Conversation::default();
        let long = "x".repeat(INPUT_SOFT_LIMIT + 500);
        assert!(convo.submit(&long, Tool::Writer).is_some());
        assert_eq!(convo.messages()[0].content.len(), INPUT_SOFT_LIMIT + 500);
    }
}
