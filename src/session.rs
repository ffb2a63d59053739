//! Session-scoped chat history
//!
//! A session owns an append-only log of chat turns. Turns are never mutated
//! or removed; the log lives exactly as long as the session that created it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a chat turn's author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A question submitted by the user
    User,
    /// An answer returned by the knowledge base
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single turn in the conversation
///
/// Immutable once created; owned exclusively by the [`ChatHistory`] that
/// recorded it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Who authored this turn
    pub role: Role,
    /// The turn's text
    pub text: String,
}

impl ChatTurn {
    /// Creates a new user turn
    ///
    /// # Examples
    ///
    /// ```
    /// use kbchat::session::{ChatTurn, Role};
    ///
    /// let turn = ChatTurn::user("What is S3?");
    /// assert_eq!(turn.role, Role::User);
    /// ```
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    /// Creates a new assistant turn
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}

/// Ordered, append-only log of chat turns for one session
///
/// Turns are stored oldest first and the log grows without bound for the
/// lifetime of the session. After a completed question/answer exchange the
/// length is even (one user turn followed by one assistant turn); it is odd
/// only between submitting a question and receiving its answer.
#[derive(Debug, Clone)]
pub struct ChatHistory {
    turns: Vec<ChatTurn>,
    started_at: DateTime<Utc>,
}

impl ChatHistory {
    /// Creates an empty history stamped with the session start time
    pub fn new() -> Self {
        Self {
            turns: Vec::new(),
            started_at: Utc::now(),
        }
    }

    /// Appends a user turn
    pub fn push_user(&mut self, text: impl Into<String>) {
        self.turns.push(ChatTurn::user(text));
    }

    /// Appends an assistant turn
    pub fn push_assistant(&mut self, text: impl Into<String>) {
        self.turns.push(ChatTurn::assistant(text));
    }

    /// All turns recorded so far, oldest first
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// Number of turns recorded so far
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether any turns have been recorded
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// When this session's history was created
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

impl Default for ChatHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_display() {
        assert_eq!(Role::User.to_string(), "user");
        assert_eq!(Role::Assistant.to_string(), "assistant");
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            "\"assistant\""
        );
    }

    #[test]
    fn test_chat_turn_user() {
        let turn = ChatTurn::user("Hello");
        assert_eq!(turn.role, Role::User);
        assert_eq!(turn.text, "Hello");
    }

    #[test]
    fn test_chat_turn_assistant() {
        let turn = ChatTurn::assistant("Hi there");
        assert_eq!(turn.role, Role::Assistant);
        assert_eq!(turn.text, "Hi there");
    }

    #[test]
    fn test_history_starts_empty() {
        let history = ChatHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
    }

    #[test]
    fn test_history_append_order() {
        let mut history = ChatHistory::new();
        history.push_user("What is S3?");
        history.push_assistant("S3 is object storage.");

        assert_eq!(history.len(), 2);
        assert_eq!(history.turns()[0].role, Role::User);
        assert_eq!(history.turns()[0].text, "What is S3?");
        assert_eq!(history.turns()[1].role, Role::Assistant);
        assert_eq!(history.turns()[1].text, "S3 is object storage.");
    }

    #[test]
    fn test_history_grows_by_two_per_exchange() {
        let mut history = ChatHistory::new();
        for i in 0..3 {
            let before = history.len();
            history.push_user(format!("question {}", i));
            assert_eq!(history.len() % 2, 1);
            history.push_assistant(format!("answer {}", i));
            assert_eq!(history.len(), before + 2);
            assert_eq!(history.len() % 2, 0);
        }
    }

    #[test]
    fn test_history_preserves_earlier_turns() {
        let mut history = ChatHistory::new();
        history.push_user("first");
        history.push_assistant("second");
        history.push_user("third");

        assert_eq!(history.turns()[0].text, "first");
        assert_eq!(history.turns()[2].text, "third");
    }
}
