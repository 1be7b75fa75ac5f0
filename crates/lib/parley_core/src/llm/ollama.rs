//! Ollama text-generation client.
//!
//! Calls the non-streaming `/api/generate` endpoint with a single prompt and
//! returns the `response` field of the reply.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::config::OllamaConfig;
use super::{GenerationError, TextGenerator};

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Client for a locally hosted Ollama server.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: Client,
    url: String,
    model: String,
}

impl OllamaClient {
    /// Build a client from configuration.
    pub fn new(config: &OllamaConfig) -> Result<Self, GenerationError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            url: config.generate_url(),
            model: config.model.clone(),
        })
    }

    async fn query(&self, prompt: &str) -> Result<String, GenerationError> {
        let resp = self
            .http
            .post(&self.url)
            .json(&GenerateRequest {
                model: &self.model,
                prompt,
                stream: false,
            })
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(GenerationError::Provider { status, body });
        }

        let data: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| GenerationError::Parse(e.to_string()))?;

        Ok(data.response.trim().to_string())
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        info!(model = %self.model, prompt, "sending prompt to Ollama");
        match self.query(prompt).await {
            Ok(reply) => {
                info!(reply = %reply, "model response");
                Ok(reply)
            }
            Err(e) => {
                error!("error querying Ollama: {e}");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::Json;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::post;
    use serde_json::{Value, json};

    use super::*;

    /// Serve `app` on an ephemeral port and return a config pointing at it.
    async fn serve(app: Router) -> OllamaConfig {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });
        OllamaConfig {
            base_url: format!("http://{addr}"),
            model: "test-model".into(),
            timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn generate_sends_non_streaming_request_and_trims_reply() {
        let app = Router::new().route(
            "/api/generate",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["model"], "test-model");
                assert_eq!(body["stream"], false);
                let prompt = body["prompt"].as_str().unwrap_or_default().to_string();
                Json(json!({ "response": format!("  echo: {prompt}\n"), "done": true }))
            }),
        );
        let client = OllamaClient::new(&serve(app).await).expect("client");

        let reply = client.generate("hello").await.expect("generate");
        assert_eq!(reply, "echo: hello");
    }

    #[tokio::test]
    async fn non_success_status_is_provider_error() {
        let app = Router::new().route(
            "/api/generate",
            post(|| async { (StatusCode::NOT_FOUND, "model 'test-model' not found") }),
        );
        let client = OllamaClient::new(&serve(app).await).expect("client");

        match client.generate("hello").await {
            Err(GenerationError::Provider { status, body }) => {
                assert_eq!(status, 404);
                assert!(body.contains("not found"));
            }
            other => panic!("expected provider error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_response_field_is_parse_error() {
        let app = Router::new().route(
            "/api/generate",
            post(|| async { Json(json!({ "done": true })) }),
        );
        let client = OllamaClient::new(&serve(app).await).expect("client");

        let err = client.generate("hello").await.unwrap_err();
        assert!(matches!(err, GenerationError::Parse(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn unreachable_server_is_http_error() {
        // Bind and immediately drop to get a port nothing listens on.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .and_then(|l| l.local_addr())
            .expect("free port")
            .port();
        let config = OllamaConfig {
            base_url: format!("http://127.0.0.1:{port}"),
            model: "test-model".into(),
            timeout: Duration::from_secs(5),
        };
        let client = OllamaClient::new(&config).expect("client");

        let err = client.generate("hello").await.unwrap_err();
        assert!(matches!(err, GenerationError::Http(_)), "got {err:?}");
    }
}
