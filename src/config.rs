//! Configuration loading and validation.

use crate::error::{ConfigError, Result};

use std::net::SocketAddr;
use std::time::Duration;

/// Default Groq model used for replies.
const DEFAULT_MODEL: &str = "meta-llama/llama-4-scout-17b-16e-instruct";

/// Default OpenAI-compatible API base.
const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Medassist configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub bind: SocketAddr,

    /// Outbound Groq API configuration.
    pub groq: GroqConfig,

    /// Conversation context store bounds.
    pub context: ContextConfig,
}

/// Groq chat-completion configuration.
#[derive(Debug, Clone)]
pub struct GroqConfig {
    /// Bearer token for the API. Absent means every call fails and the
    /// orchestrator serves its fallback reply.
    pub api_key: Option<String>,

    /// API base URL (overridable for tests and proxies).
    pub base_url: String,

    /// Model identifier sent with every request.
    pub model: String,

    /// Output token bound per reply.
    pub max_tokens: u32,

    /// Sampling temperature.
    pub temperature: f32,
}

/// Context store bounds.
#[derive(Debug, Clone, Copy)]
pub struct ContextConfig {
    /// Maximum number of live conversations.
    pub max_conversations: u64,

    /// Conversations idle longer than this are evicted.
    pub idle_ttl: Duration,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            max_conversations: 10_000,
            idle_ttl: Duration::from_secs(60 * 60),
        }
    }
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// A missing `GROQ_API_KEY` is a warning, not an error: the server still
    /// starts and every provider call falls through to the fallback reply.
    pub fn load() -> Result<Self> {
        let port: u16 = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("PORT is not a valid port: {raw}")))?,
            Err(_) => 3000,
        };
        let bind = SocketAddr::from(([0, 0, 0, 0], port));

        let api_key = std::env::var("GROQ_API_KEY").ok().filter(|k| !k.is_empty());
        if api_key.is_none() {
            tracing::warn!("GROQ_API_KEY is not configured; replies will use the fallback text");
        }

        let groq = GroqConfig {
            api_key,
            base_url: std::env::var("MEDASSIST_API_BASE")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
            model: std::env::var("MEDASSIST_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into()),
            max_tokens: 200,
            temperature: 0.7,
        };

        let mut context = ContextConfig::default();
        if let Ok(raw) = std::env::var("MEDASSIST_MAX_CONVERSATIONS") {
            context.max_conversations = raw.parse().map_err(|_| {
                ConfigError::Invalid(format!("MEDASSIST_MAX_CONVERSATIONS is not a number: {raw}"))
            })?;
        }
        if let Ok(raw) = std::env::var("MEDASSIST_CONTEXT_TTL_SECS") {
            let secs: u64 = raw.parse().map_err(|_| {
                ConfigError::Invalid(format!("MEDASSIST_CONTEXT_TTL_SECS is not a number: {raw}"))
            })?;
            context.idle_ttl = Duration::from_secs(secs);
        }

        Ok(Self { bind, groq, context })
    }
}
