//! Model client module for AI inference
//!
//! This module provides:
//! - `client`: OpenAI-compatible chat-completion client

mod client;

pub use client::{
    ChatClient, InferenceBackend, ModelConfig, OpenAiBackend, MODEL_ERROR_PREFIX, PARSE_FALLBACK,
};
