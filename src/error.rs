//! Top-level error types for medassist.

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error enum wrapping domain-specific errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Configuration loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Errors from the outbound chat-completion call.
///
/// These are recovered inside the orchestrator (fallback reply); they never
/// surface to HTTP callers as failures.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("GROQ_API_KEY is not configured")]
    MissingApiKey,

    #[error("provider request failed: {0}")]
    Request(String),

    #[error("authentication rejected by provider: {0}")]
    AuthenticationFailed(String),

    #[error("provider rate limit exceeded")]
    RateLimited,

    #[error("provider API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("unexpected provider response: {0}")]
    UnexpectedResponse(String),
}
