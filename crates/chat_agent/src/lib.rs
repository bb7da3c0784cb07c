//! chat_agent: conversation state and hosted-model inference client
//!
//! This library provides:
//! - Conversation transcript types (ordered user/assistant turns)
//! - An OpenAI-compatible chat-completion client with degrade-to-text
//!   failure handling
//! - A session wrapper tying one transcript to one client
//!
//! # Example
//!
//! ```no_run
//! use chat_agent::{ChatClient, ChatSession, ModelConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ModelConfig::default().with_api_token("hf_...");
//!     let mut session = ChatSession::new(ChatClient::new(config));
//!
//!     let reply = session.respond("Hello!").await;
//!     println!("{}", reply.content);
//! }
//! ```

// Core modules
pub mod error;

// Conversation state
pub mod conversation;

// Inference client
pub mod model;

// Session orchestration
pub mod session;

// Re-export commonly used types
pub use conversation::{Conversation, Role, Turn};
pub use error::{ChatError, Result};
pub use model::{
    ChatClient, InferenceBackend, ModelConfig, OpenAiBackend, MODEL_ERROR_PREFIX, PARSE_FALLBACK,
};
pub use session::ChatSession;
