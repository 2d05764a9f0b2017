//! Medassist: a medical-assistant chat service backed by the Groq API.
//!
//! An axum HTTP server forwards user messages to a chat-completion model,
//! accumulates per-conversation context, and post-processes replies with a
//! keyword-based specialist classifier gated by a symptom-trigger check.

pub mod api;
pub mod classifier;
pub mod config;
pub mod conversation;
pub mod error;
pub mod llm;
pub mod orchestrator;

pub use error::{Error, Result};
