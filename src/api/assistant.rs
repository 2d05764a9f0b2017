//! The medical-assistant chat endpoint.

use super::state::ApiState;
use crate::classifier::SpecialistInfo;
use crate::conversation::new_conversation_id;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AssistantRequest {
    message: String,
    #[serde(default)]
    conversation_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AssistantResponse {
    response: String,
    specialist_info: Option<SpecialistInfo>,
    conversation_id: String,
}

#[derive(Debug, Serialize)]
pub(super) struct ErrorResponse {
    error: String,
}

/// Unexpected internal failure, rendered as HTTP 500 with a generic message.
///
/// Provider failures never take this path: the orchestrator converts them
/// into its fallback reply and the endpoint still answers 200.
pub(super) struct ApiError(anyhow::Error);

impl<E: Into<anyhow::Error>> From<E> for ApiError {
    fn from(error: E) -> Self {
        Self(error.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "assistant endpoint failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Une erreur est survenue lors de la communication avec l'IA".into(),
            }),
        )
            .into_response()
    }
}

/// `POST /api/medical-assistant`
///
/// Assigns a fresh conversation id when the caller supplies none (or an
/// empty one) and echoes the id back so the widget can round-trip it.
pub(super) async fn medical_assistant(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<AssistantRequest>,
) -> Result<Json<AssistantResponse>, ApiError> {
    let conversation_id = request
        .conversation_id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(new_conversation_id);

    let outcome = state
        .orchestrator
        .recommend(&conversation_id, &request.message)
        .await;

    Ok(Json(AssistantResponse {
        response: outcome.response,
        specialist_info: outcome.specialist,
        conversation_id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ContextConfig, GroqConfig};
    use crate::conversation::ContextStore;
    use crate::llm::GroqClient;
    use crate::orchestrator::{FALLBACK_REPLY, Orchestrator};

    /// A state whose backend has no API key: every provider call fails, so
    /// the endpoint must serve the fallback reply while still answering Ok.
    fn keyless_state() -> Arc<ApiState> {
        let groq = GroqConfig {
            api_key: None,
            base_url: "https://api.groq.com/openai/v1".into(),
            model: "test".into(),
            max_tokens: 200,
            temperature: 0.7,
        };
        let orchestrator = Orchestrator::new(
            Arc::new(GroqClient::new(groq)),
            ContextStore::new(ContextConfig::default()),
        );
        Arc::new(ApiState::new(orchestrator))
    }

    #[tokio::test]
    async fn test_missing_id_gets_fresh_one_and_failure_still_answers_ok() {
        let result = medical_assistant(
            State(keyless_state()),
            Json(AssistantRequest {
                message: "j'ai mal aux dents".into(),
                conversation_id: None,
            }),
        )
        .await;

        let Ok(Json(response)) = result else {
            panic!("endpoint must not fail on a provider error");
        };
        assert!(!response.conversation_id.is_empty());
        assert_eq!(response.response, FALLBACK_REPLY);
        assert!(response.specialist_info.is_none());
    }

    #[tokio::test]
    async fn test_supplied_conversation_id_is_echoed_back() {
        let result = medical_assistant(
            State(keyless_state()),
            Json(AssistantRequest {
                message: "bonjour".into(),
                conversation_id: Some("abc123".into()),
            }),
        )
        .await;

        let Ok(Json(response)) = result else {
            panic!("endpoint must not fail on a provider error");
        };
        assert_eq!(response.conversation_id, "abc123");
    }

    #[test]
    fn test_request_accepts_missing_conversation_id() {
        let request: AssistantRequest =
            serde_json::from_str(r#"{ "message": "bonjour" }"#).unwrap();
        assert_eq!(request.message, "bonjour");
        assert!(request.conversation_id.is_none());
    }

    #[test]
    fn test_request_accepts_camel_case_conversation_id() {
        let request: AssistantRequest =
            serde_json::from_str(r#"{ "message": "bonjour", "conversationId": "abc123" }"#)
                .unwrap();
        assert_eq!(request.conversation_id.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_response_wire_shape_with_referral() {
        let response = AssistantResponse {
            response: "Consultez un dentiste.".into(),
            specialist_info: Some(crate::classifier::Specialty::Dentist.info()),
            conversation_id: "abc".into(),
        };
        let json = serde_json::to_value(response).unwrap();
        assert_eq!(json["specialistInfo"]["type"], "Dentiste");
        assert_eq!(json["conversationId"], "abc");
    }

    #[test]
    fn test_response_wire_shape_without_referral() {
        let response = AssistantResponse {
            response: "Je vous écoute.".into(),
            specialist_info: None,
            conversation_id: "abc".into(),
        };
        let json = serde_json::to_value(response).unwrap();
        assert!(json["specialistInfo"].is_null());
    }
}
