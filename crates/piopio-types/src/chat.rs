//! Conversation turn types.

use crate::llm::{Message, MessageRole};

/// Maximum number of turns kept per session.
///
/// The system instruction is not counted; it is injected at call time.
pub const MAX_SESSION_TURNS: usize = 12;

/// One message exchanged in a conversation, tagged with its speaker role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: MessageRole,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

impl From<Turn> for Message {
    fn from(turn: Turn) -> Self {
        Message {
            role: turn.role,
            content: turn.content,
        }
    }
}

/// Keep only the most recent `MAX_SESSION_TURNS` turns, dropping the oldest.
pub fn truncate_window(turns: &mut Vec<Turn>) {
    if turns.len() > MAX_SESSION_TURNS {
        let excess = turns.len() - MAX_SESSION_TURNS;
        turns.drain(..excess);
    }
}
