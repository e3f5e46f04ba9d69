use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{error, info, warn};
use url::Url;

use crate::actors::messages::ChatRequest;
use crate::actors::traits::ChatBackend;
use crate::config::AgentConfig;
use crate::error::AppError;

/// Reply shown when the backend answers without any text.
pub const FALLBACK_REPLY: &str = "Lo siento, no pude procesar tu mensaje en este momento.";

#[derive(Debug, Deserialize)]
struct ChatResponseBody {
    response: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Generation backend reached over HTTP.
///
/// Posts a JSON [`ChatRequest`] and reads `{"response": "..."}` back. Error
/// responses may carry `{"error": "..."}`, which is surfaced to the caller.
#[derive(Debug, Clone)]
pub struct HttpChatBackend {
    client: Client,
    endpoint: Url,
    auth_token: Option<String>,
}

impl HttpChatBackend {
    /// Builds a client from the agent configuration.
    pub fn new(config: &AgentConfig) -> Result<Self, AppError> {
        let endpoint = Url::parse(&config.backend_url)?;
        let client = Client::builder().timeout(config.request_timeout()).build()?;

        Ok(Self {
            client,
            endpoint,
            auth_token: config.auth_token.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn build_request(&self, request: &ChatRequest) -> reqwest::RequestBuilder {
        let builder = self.client.post(self.endpoint.clone()).json(request);
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn generate(&self, request: ChatRequest) -> Result<String, AppError> {
        info!(
            mode = %request.mode,
            history_len = request.conversation_history.len(),
            "Sending message to backend"
        );

        let res = self.build_request(&request).send().await?;
        let status = res.status();

        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .unwrap_or(body);
            error!("Backend request failed with status {}: {}", status, detail);
            return Err(AppError::Backend(format!(
                "Request failed with status {}: {}",
                status, detail
            )));
        }

        let body: ChatResponseBody = res.json().await?;

        match body.response.filter(|r| !r.trim().is_empty()) {
            Some(text) => Ok(text),
            None => {
                warn!("Backend returned an empty response");
                Ok(FALLBACK_REPLY.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::analysis::Role;
    use crate::actors::messages::HistoryEntry;
    use crate::mode::Mode;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn setup_backend(server: &MockServer, auth_token: Option<&str>) -> HttpChatBackend {
        let config = AgentConfig {
            backend_url: format!("{}/api/ai-chat", server.uri()),
            auth_token: auth_token.map(str::to_string),
            request_timeout_secs: 1,
            ..AgentConfig::default()
        };
        HttpChatBackend::new(&config).unwrap()
    }

    fn sample_request() -> ChatRequest {
        ChatRequest {
            message: "hola".to_string(),
            mode: Mode::PromptAuthoring,
            persistent_context: true,
            conversation_history: vec![HistoryEntry {
                role: Role::User,
                content: "crear un prompt".to_string(),
            }],
            user_name: Some("Ana".to_string()),
        }
    }

    #[tokio::test]
    async fn test_generate_sends_camel_case_body() {
        // 1. Arrange
        let mock_server = MockServer::start().await;
        let backend = setup_backend(&mock_server, Some("secret"));

        Mock::given(method("POST"))
            .and(path("/api/ai-chat"))
            .and(header("authorization", "Bearer secret"))
            .and(body_partial_json(json!({
                "message": "hola",
                "mode": "prompt_authoring",
                "persistentContext": true,
                "conversationHistory": [{"role": "user", "content": "crear un prompt"}],
                "userName": "Ana"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "¡Hola, Ana!"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        // 2. Act
        let result = backend.generate(sample_request()).await;

        // 3. Assert
        assert_eq!(result.unwrap(), "¡Hola, Ana!");
    }

    #[tokio::test]
    async fn test_generate_maps_error_field() {
        let mock_server = MockServer::start().await;
        let backend = setup_backend(&mock_server, None);

        Mock::given(method("POST"))
            .and(path("/api/ai-chat"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"error": "model overloaded"})),
            )
            .mount(&mock_server)
            .await;

        let result = backend.generate(sample_request()).await;

        match result {
            Err(AppError::Backend(msg)) => {
                assert!(msg.contains("500"), "{}", msg);
                assert!(msg.contains("model overloaded"), "{}", msg);
            }
            other => panic!("Expected Backend error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_generate_keeps_plain_error_body() {
        let mock_server = MockServer::start().await;
        let backend = setup_backend(&mock_server, None);

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&mock_server)
            .await;

        let err = backend.generate(sample_request()).await.unwrap_err();
        assert!(matches!(err, AppError::Backend(ref msg) if msg.contains("bad gateway")));
    }

    #[tokio::test]
    async fn test_generate_empty_response_uses_fallback() {
        let mock_server = MockServer::start().await;
        let backend = setup_backend(&mock_server, None);

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "  "})))
            .mount(&mock_server)
            .await;

        let result = backend.generate(sample_request()).await;
        assert_eq!(result.unwrap(), FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_generate_missing_response_uses_fallback() {
        let mock_server = MockServer::start().await;
        let backend = setup_backend(&mock_server, None);

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&mock_server)
            .await;

        let result = backend.generate(sample_request()).await;
        assert_eq!(result.unwrap(), FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_generate_times_out() {
        let mock_server = MockServer::start().await;
        let backend = setup_backend(&mock_server, None);

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"response": "tarde"}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&mock_server)
            .await;

        let result = backend.generate(sample_request()).await;
        assert!(matches!(result, Err(AppError::Timeout(_))));
    }

    #[test]
    fn test_new_rejects_invalid_url() {
        let config = AgentConfig {
            backend_url: "not a url".to_string(),
            ..AgentConfig::default()
        };
        assert!(matches!(HttpChatBackend::new(&config), Err(AppError::Config(_))));
    }
}
