//! Secondary (generative) model capability
//!
//! The generative model is an opaque collaborator: prompt in, free text out,
//! or a [`SecondaryFailure`]. Failures are plain values so callers branch on
//! them instead of catching anything.

use crate::config::SecondaryConfig;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use toxiscan_core::{Error, Result};

/// Why a secondary call produced no usable completion
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SecondaryFailure {
    /// The call did not finish in time
    #[error("secondary model timed out after {0:?}")]
    Timeout(Duration),

    /// Connection or HTTP-level failure
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend answered with something we cannot read
    #[error("malformed response: {0}")]
    Malformed(String),

    /// No backend is available
    #[error("secondary model unavailable: {0}")]
    Unavailable(String),
}

impl SecondaryFailure {
    /// Short label used for metrics
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Timeout(_) => "timeout",
            Self::Transport(_) => "transport",
            Self::Malformed(_) => "malformed",
            Self::Unavailable(_) => "unavailable",
        }
    }
}

/// Prompt-in, text-out generative capability
#[async_trait]
pub trait SecondaryModel: Send + Sync {
    /// Produce a free-text completion for `prompt`
    async fn complete(&self, prompt: &str) -> std::result::Result<String, SecondaryFailure>;

    /// Backend name for logging
    fn name(&self) -> &str;
}

/// Render the fixed classification prompt around `text`.
///
/// The system turn asks for exactly `TOXICA` or `NAO_TOXICA`.
pub fn build_prompt(text: &str) -> String {
    format!(
        "<|system|>\n\
         Voce e um classificador de toxicidade. Analise a mensagem e responda apenas TOXICA ou NAO_TOXICA.</s>\n\
         <|user|>\n\
         Classifique: {}</s>\n\
         <|assistant|>\n",
        text
    )
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
}

/// OpenAI-compatible `/completions` backend
pub struct HttpCompletionModel {
    client: reqwest::Client,
    url: String,
    model: String,
    api_key: Option<String>,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    timeout: Duration,
}

impl HttpCompletionModel {
    /// Build a backend from configuration
    pub fn from_config(config: &SecondaryConfig) -> Result<Self> {
        let timeout = config.timeout();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::backend(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: format!("{}/completions", config.endpoint.trim_end_matches('/')),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            top_p: config.top_p,
            timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SecondaryModel for HttpCompletionModel {
    async fn complete(&self, prompt: &str) -> std::result::Result<String, SecondaryFailure> {
        let body = CompletionRequest {
            model: &self.model,
            prompt,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            top_p: self.top_p,
        };

        let mut request = self.client.post(&self.url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                SecondaryFailure::Timeout(self.timeout)
            } else {
                SecondaryFailure::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SecondaryFailure::Transport(format!(
                "backend returned {}",
                status
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| SecondaryFailure::Malformed(e.to_string()))?;

        extract_completion(&payload)
    }

    fn name(&self) -> &str {
        &self.model
    }
}

/// Pull the generated text out of a completions payload.
///
/// Accepts both the `text` shape and the chat `message.content` shape.
pub fn extract_completion(
    payload: &serde_json::Value,
) -> std::result::Result<String, SecondaryFailure> {
    let choice = payload
        .get("choices")
        .and_then(|choices| choices.get(0))
        .ok_or_else(|| SecondaryFailure::Malformed("response has no choices".to_string()))?;

    choice
        .get("text")
        .or_else(|| choice.get("message").and_then(|m| m.get("content")))
        .and_then(|text| text.as_str())
        .map(|text| text.trim().to_string())
        .ok_or_else(|| SecondaryFailure::Malformed("choice has no text".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    /// Answer a single HTTP request with `status` and `body`.
    ///
    /// Returns the base URL and a handle yielding the raw request.
    async fn serve_once(
        status: &'static str,
        content_type: &'static str,
        body: &'static str,
    ) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                content_type,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            request
        });

        (format!("http://{}/v1", addr), handle)
    }

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];

        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let headers = String::from_utf8_lossy(&buf[..end]).to_lowercase();
                let body_len = headers
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + body_len {
                    break;
                }
            }
        }

        String::from_utf8_lossy(&buf).into_owned()
    }

    fn model_for(endpoint: String) -> HttpCompletionModel {
        let config = SecondaryConfig {
            endpoint,
            api_key: Some("sk-test".to_string()),
            timeout_ms: 5_000,
            ..SecondaryConfig::default()
        };
        HttpCompletionModel::from_config(&config).unwrap()
    }

    #[test]
    fn test_prompt_embeds_message() {
        let prompt = build_prompt("Bom dia!");
        assert!(prompt.starts_with("<|system|>\n"));
        assert!(prompt.contains("responda apenas TOXICA ou NAO_TOXICA"));
        assert!(prompt.contains("<|user|>\nClassifique: Bom dia!</s>\n"));
        assert!(prompt.ends_with("<|assistant|>\n"));
    }

    #[test]
    fn test_extract_text_completion() {
        let payload = json!({"choices": [{"text": "  NAO_TOXICA\n", "index": 0}]});
        assert_eq!(extract_completion(&payload).unwrap(), "NAO_TOXICA");
    }

    #[test]
    fn test_extract_chat_completion() {
        let payload = json!({
            "choices": [{"message": {"role": "assistant", "content": "TOXICA"}}]
        });
        assert_eq!(extract_completion(&payload).unwrap(), "TOXICA");
    }

    #[test]
    fn test_extract_malformed() {
        assert!(matches!(
            extract_completion(&json!({"error": "overloaded"})),
            Err(SecondaryFailure::Malformed(_))
        ));
        assert!(matches!(
            extract_completion(&json!({"choices": [{"text": 3}]})),
            Err(SecondaryFailure::Malformed(_))
        ));
    }

    #[test]
    fn test_http_model_url() {
        let config = SecondaryConfig {
            endpoint: "http://localhost:8000/v1/".to_string(),
            ..SecondaryConfig::default()
        };
        let model = HttpCompletionModel::from_config(&config).unwrap();
        assert_eq!(model.url(), "http://localhost:8000/v1/completions");
    }

    #[tokio::test]
    async fn test_served_completion() {
        let (endpoint, server) = serve_once(
            "200 OK",
            "application/json",
            r#"{"choices": [{"text": " NAO_TOXICA\n", "index": 0}]}"#,
        )
        .await;

        let completion = model_for(endpoint).complete("Classifique: oi").await;
        assert_eq!(completion, Ok("NAO_TOXICA".to_string()));

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /v1/completions HTTP/1.1"));
        assert!(request.to_lowercase().contains("authorization: bearer sk-test"));
        assert!(request.contains(r#""max_tokens":20"#));
        assert!(request.contains("Classifique: oi"));
    }

    #[tokio::test]
    async fn test_server_error_is_transport_failure() {
        let (endpoint, server) = serve_once(
            "500 Internal Server Error",
            "application/json",
            r#"{"error": "boom"}"#,
        )
        .await;

        let err = model_for(endpoint).complete("x").await.unwrap_err();
        assert!(matches!(err, SecondaryFailure::Transport(ref msg) if msg.contains("500")));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_non_json_body_is_malformed() {
        let (endpoint, server) = serve_once("200 OK", "text/plain", "upstream exploded").await;

        let err = model_for(endpoint).complete("x").await.unwrap_err();
        assert!(matches!(err, SecondaryFailure::Malformed(_)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_json_without_choices_is_malformed() {
        let (endpoint, server) =
            serve_once("200 OK", "application/json", r#"{"object": "list"}"#).await;

        let err = model_for(endpoint).complete("x").await.unwrap_err();
        assert!(matches!(err, SecondaryFailure::Malformed(_)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_failure() {
        let config = SecondaryConfig {
            endpoint: "http://127.0.0.1:9".to_string(),
            timeout_ms: 2_000,
            ..SecondaryConfig::default()
        };
        let model = HttpCompletionModel::from_config(&config).unwrap();

        let err = model.complete("x").await.unwrap_err();
        assert!(matches!(
            err,
            SecondaryFailure::Transport(_) | SecondaryFailure::Timeout(_)
        ));
    }
}
