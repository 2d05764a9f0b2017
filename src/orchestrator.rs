//! Recommendation orchestration: prompt assembly, provider call, referral gating.

use crate::classifier::{self, SpecialistInfo, Specialty};
use crate::conversation::ContextStore;
use crate::llm::{ChatMessage, CompletionBackend};

use std::sync::Arc;

/// Persona instruction sent as the first turn of every prompt.
const SYSTEM_PROMPT: &str = "Tu es un assistant médical empathique et direct.\n\
Règles importantes :\n\
- Sois concis et naturel\n\
- Évite les réponses trop longues\n\
- Concentre-toi sur la conversation\n\
- Réponds de manière humaine, comme le ferait un professionnel de santé attentif\n\
- Ne recommande un spécialiste que si c'est vraiment nécessaire\n\
- Utilise un langage simple et chaleureux";

/// Reply served whenever the provider call fails.
pub const FALLBACK_REPLY: &str = "Je suis à l'écoute. Pouvez-vous m'en dire plus ?";

/// Result of one orchestration call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Assistant reply text (model output or the fallback).
    pub response: String,

    /// Gated specialist referral, if one was surfaced.
    pub specialist: Option<SpecialistInfo>,
}

/// Drives one chat exchange: context lookup, provider call, classification.
pub struct Orchestrator {
    backend: Arc<dyn CompletionBackend>,
    contexts: ContextStore,
}

impl Orchestrator {
    pub fn new(backend: Arc<dyn CompletionBackend>, contexts: ContextStore) -> Self {
        Self { backend, contexts }
    }

    /// Produce a reply and an optional specialist referral for one message.
    ///
    /// Total from the caller's perspective: provider failures are converted
    /// into the fallback reply, never propagated. The context entry lock is
    /// held across the provider call, so concurrent requests for the same
    /// conversation id are serialized.
    pub async fn recommend(&self, conversation_id: &str, user_message: &str) -> Outcome {
        let entry = self.contexts.get(conversation_id).await;
        let mut context = entry.lock().await;

        let mut messages = Vec::with_capacity(context.turns.len() + 2);
        messages.push(ChatMessage::system(SYSTEM_PROMPT));
        messages.extend(context.turns.iter().cloned());
        messages.push(ChatMessage::user(user_message));

        let reply = match self.backend.complete(&messages).await {
            Ok(reply) => reply,
            Err(error) => {
                tracing::warn!(
                    %error,
                    conversation = conversation_id,
                    "provider call failed, serving fallback reply"
                );
                return Outcome {
                    response: FALLBACK_REPLY.into(),
                    specialist: None,
                };
            }
        };

        // Only the assistant side of the exchange is retained; the user turn
        // rides along with each new request.
        context.append_assistant_turn(reply.clone());

        // Classifier match is necessary but not sufficient: the generic
        // symptom-trigger gate must also pass before a referral is surfaced.
        let specialist = classifier::classify(user_message)
            .filter(|_| classifier::has_symptom_trigger(user_message));

        if let Some(specialty) = specialist {
            context.last_specialist = Some(specialty);
        }

        Outcome {
            response: reply,
            specialist: specialist.map(Specialty::info),
        }
    }
}
