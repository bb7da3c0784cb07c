//! Chat session: conversation state plus the inference client

use tracing::debug;

use crate::conversation::{Conversation, Turn};
use crate::model::ChatClient;

/// One chat session: a conversation transcript and the client that answers it.
///
/// `respond` takes `&mut self`, so overlapping submissions within a session
/// are unrepresentable.
pub struct ChatSession {
    client: ChatClient,
    conversation: Conversation,
}

impl ChatSession {
    /// Create a session with an empty conversation
    pub fn new(client: ChatClient) -> Self {
        Self {
            client,
            conversation: Conversation::new(),
        }
    }

    /// Submit one user message.
    ///
    /// Appends the user turn, awaits a single completion, appends the
    /// assistant turn, and returns it. Remote failures surface as the
    /// assistant turn's text; this never fails.
    pub async fn respond(&mut self, user_message: &str) -> Turn {
        self.conversation.push(Turn::user(user_message));

        let reply = self.client.ask(&self.conversation).await;
        debug!(turns = self.conversation.len() + 1, "appending assistant turn");

        let turn = Turn::assistant(reply);
        self.conversation.push(turn.clone());
        turn
    }

    /// Reset the conversation to empty. No confirmation, no undo.
    pub fn clear(&mut self) {
        self.conversation.clear();
    }

    /// Get the current transcript
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::Role;
    use crate::error::{ChatError, Result};
    use crate::model::{InferenceBackend, ModelConfig, MODEL_ERROR_PREFIX, PARSE_FALLBACK};
    use async_openai::error::OpenAIError;
    use async_trait::async_trait;

    enum Script {
        Reply(&'static str),
        Malformed,
        Fail(&'static str),
    }

    #[async_trait]
    impl InferenceBackend for Script {
        async fn complete(&self, _turns: &[Turn]) -> Result<Option<String>> {
            match self {
                Script::Reply(text) => Ok(Some(text.to_string())),
                Script::Malformed => Ok(None),
                Script::Fail(msg) => Err(ChatError::Api(OpenAIError::InvalidArgument(
                    msg.to_string(),
                ))),
            }
        }
    }

    fn session_with(script: Script) -> ChatSession {
        ChatSession::new(ChatClient::with_backend(
            ModelConfig::default(),
            Box::new(script),
        ))
    }

    #[tokio::test]
    async fn test_submit_to_empty_conversation_yields_two_turns() {
        let mut session = session_with(Script::Reply("hi, how can I help?"));
        let reply = session.respond("hello").await;

        let turns = session.conversation().turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, Role::User);
        assert_eq!(turns[0].content, "hello");
        assert_eq!(turns[1].role, Role::Assistant);
        assert_eq!(turns[1], reply);
    }

    #[tokio::test]
    async fn test_remote_error_becomes_assistant_turn() {
        let mut session = session_with(Script::Fail("quota exceeded"));
        let reply = session.respond("hello").await;

        assert_eq!(reply.role, Role::Assistant);
        assert!(reply.content.starts_with(MODEL_ERROR_PREFIX));
        // Conversation remains usable afterward
        assert_eq!(session.conversation().len(), 2);
    }

    #[tokio::test]
    async fn test_malformed_response_becomes_fallback_turn() {
        let mut session = session_with(Script::Malformed);
        let reply = session.respond("hello").await;

        assert_eq!(reply.content, PARSE_FALLBACK);
    }

    #[tokio::test]
    async fn test_clear_empties_conversation_regardless_of_state() {
        let mut session = session_with(Script::Reply("ok"));
        session.respond("one").await;
        session.respond("two").await;
        assert_eq!(session.conversation().len(), 4);

        session.clear();
        assert!(session.conversation().is_empty());

        session.clear();
        assert!(session.conversation().is_empty());
    }

    #[tokio::test]
    async fn test_successive_submissions_preserve_order() {
        let mut session = session_with(Script::Reply("ack"));
        session.respond("first").await;
        session.respond("second").await;

        let contents: Vec<&str> = session
            .conversation()
            .turns()
            .iter()
            .map(|t| t.content.as_str())
            .collect();
        assert_eq!(contents, vec!["first", "ack", "second", "ack"]);
    }
}
