//! Per-conversation context: bounded store and id assignment.
//!
//! The store keeps the accumulated prompt history for each conversation id.
//! Unlike the rest of the request path it is the only shared mutable state in
//! the process, so entries are `Arc<Mutex<_>>`: holding the entry lock across
//! the provider call serializes concurrent requests for the same conversation
//! id. Entries are evicted after an idle TTL and the store is capacity-bounded.

use crate::classifier::Specialty;
use crate::config::ContextConfig;
use crate::llm::{ChatMessage, ChatRole};

use rand::Rng as _;
use rand::distr::Alphanumeric;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Conversation identifier: opaque caller-supplied or generated token.
pub type ConversationId = String;

/// Accumulated state for one conversation.
///
/// Only assistant turns are retained; the user's side of the exchange is
/// carried implicitly by each new request. Intentional asymmetry, kept for
/// compatibility with the original service.
#[derive(Debug, Default)]
pub struct ConversationContext {
    /// Prior turns, oldest first.
    pub turns: Vec<ChatMessage>,

    /// Last specialty surfaced to this conversation, if any.
    pub last_specialist: Option<Specialty>,
}

impl ConversationContext {
    /// Append the assistant's reply to the stored history.
    ///
    /// No dedup: calling twice appends twice.
    pub fn append_assistant_turn(&mut self, text: impl Into<String>) {
        self.turns.push(ChatMessage {
            role: ChatRole::Assistant,
            content: text.into(),
        });
    }
}

/// Bounded, idle-TTL-evicting map from conversation id to context.
#[derive(Clone)]
pub struct ContextStore {
    cache: moka::future::Cache<ConversationId, Arc<Mutex<ConversationContext>>>,
}

impl ContextStore {
    pub fn new(config: ContextConfig) -> Self {
        let cache = moka::future::Cache::builder()
            .max_capacity(config.max_conversations)
            .time_to_idle(config.idle_ttl)
            .build();
        Self { cache }
    }

    /// Look up the context for an id, creating an empty one on first use.
    /// Never fails.
    pub async fn get(&self, id: &str) -> Arc<Mutex<ConversationContext>> {
        self.cache
            .get_with(id.to_string(), async { Arc::new(Mutex::new(ConversationContext::default())) })
            .await
    }
}

/// Generate a fresh opaque conversation id.
///
/// Two independent random alphanumeric components, concatenated. Collision
/// probability is negligible at this length.
pub fn new_conversation_id() -> ConversationId {
    let component = || {
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(13)
            .map(char::from)
            .collect::<String>()
            .to_lowercase()
    };
    format!("{}{}", component(), component())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> ContextStore {
        ContextStore::new(ContextConfig::default())
    }

    #[tokio::test]
    async fn test_get_creates_empty_context() {
        let store = test_store();
        let context = store.get("conv-1").await;
        assert!(context.lock().await.turns.is_empty());
        assert!(context.lock().await.last_specialist.is_none());
    }

    #[tokio::test]
    async fn test_same_id_returns_same_context() {
        let store = test_store();
        store.get("conv-1").await.lock().await.append_assistant_turn("Bonjour !");

        let context = store.get("conv-1").await;
        let guard = context.lock().await;
        assert_eq!(guard.turns.len(), 1);
        assert_eq!(guard.turns[0].role, ChatRole::Assistant);
        assert_eq!(guard.turns[0].content, "Bonjour !");
    }

    #[tokio::test]
    async fn test_distinct_ids_are_isolated() {
        let store = test_store();
        store.get("a").await.lock().await.append_assistant_turn("pour a");

        assert!(store.get("b").await.lock().await.turns.is_empty());
    }

    #[tokio::test]
    async fn test_append_twice_appends_twice() {
        let store = test_store();
        let context = store.get("conv-1").await;
        let mut guard = context.lock().await;
        guard.append_assistant_turn("une fois");
        guard.append_assistant_turn("une fois");
        assert_eq!(guard.turns.len(), 2);
    }

    #[test]
    fn test_new_conversation_id_shape() {
        let id = new_conversation_id();
        assert_eq!(id.len(), 26);
        assert!(id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_new_conversation_ids_are_distinct() {
        let a = new_conversation_id();
        let b = new_conversation_id();
        assert_ne!(a, b);
    }
}
