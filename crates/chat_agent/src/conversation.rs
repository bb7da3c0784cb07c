//! Conversation transcript: ordered turns exchanged in one session

use serde::{Deserialize, Serialize};

/// Author of a [`Turn`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message in a conversation, immutable once appended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    /// Create a user turn
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant turn
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Ordered sequence of turns; insertion order is chronological order.
///
/// Grows monotonically within a session and is reset only by an explicit
/// [`Conversation::clear`]. Role alternation is not enforced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    /// Create an empty conversation
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// All turns in chronological order
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// The most recent turn, if any
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Remove all turns
    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_preserves_order() {
        let mut conv = Conversation::new();
        conv.push(Turn::user("first"));
        conv.push(Turn::assistant("second"));
        conv.push(Turn::user("third"));

        let contents: Vec<&str> = conv.turns().iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_alternation_not_enforced() {
        let mut conv = Conversation::new();
        conv.push(Turn::user("one"));
        conv.push(Turn::user("two"));

        assert_eq!(conv.len(), 2);
        assert_eq!(conv.turns()[1].role, Role::User);
    }

    #[test]
    fn test_clear_empties_conversation() {
        let mut conv = Conversation::new();
        conv.push(Turn::user("hello"));
        conv.push(Turn::assistant("hi"));
        conv.clear();

        assert!(conv.is_empty());
        assert!(conv.last().is_none());
    }

    #[test]
    fn test_role_wire_tags() {
        let turn = Turn::user("hello");
        let value = serde_json::to_value(&turn).unwrap();
        assert_eq!(value["role"], "user");

        let turn = Turn::assistant("hi");
        let value = serde_json::to_value(&turn).unwrap();
        assert_eq!(value["role"], "assistant");
    }
}
