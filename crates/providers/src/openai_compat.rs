//! OpenAI-compatible adapter.
//!
//! Works with OpenAI, Azure-hosted gateways, Ollama, vLLM, and any other
//! endpoint that follows the OpenAI chat completions contract.

use std::time::Duration;

use serde_json::Value;

use nandi_domain::chat::{ChatMessage, Role};
use nandi_domain::config::ProviderConfig;
use nandi_domain::error::{Error, Result};

use crate::traits::{CompletionProvider, CompletionRequest};
use crate::util::{from_reqwest, resolve_api_key};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Adapter struct
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A completion adapter for any OpenAI-compatible API endpoint.
pub struct OpenAiCompatProvider {
    id: String,
    base_url: String,
    api_key: String,
    auth_header: String,
    auth_prefix: String,
    default_model: Option<String>,
    client: reqwest::Client,
}

impl OpenAiCompatProvider {
    /// Create a new provider from the deserialized provider config.
    pub fn from_config(cfg: &ProviderConfig, timeout: Duration) -> Result<Self> {
        let api_key = resolve_api_key(&cfg.auth)?;

        let auth_header = cfg
            .auth
            .header
            .clone()
            .unwrap_or_else(|| "Authorization".into());
        let auth_prefix = cfg.auth.prefix.clone().unwrap_or_else(|| "Bearer ".into());

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(from_reqwest)?;

        Ok(Self {
            id: cfg.id.clone(),
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            api_key,
            auth_header,
            auth_prefix,
            default_model: cfg.default_model.clone(),
            client,
        })
    }

    fn authed_post(&self, url: &str) -> reqwest::RequestBuilder {
        let header_value = format!("{}{}", self.auth_prefix, self.api_key);
        self.client
            .post(url)
            .header(&self.auth_header, &header_value)
            .header("Content-Type", "application/json")
    }

    fn build_chat_body(&self, req: &CompletionRequest) -> Value {
        let messages: Vec<Value> = req.messages.iter().map(msg_to_openai).collect();

        let model = req
            .model
            .clone()
            .or_else(|| self.default_model.clone())
            .unwrap_or_else(|| "gpt-4".into());

        let mut body = serde_json::json!({
            "model": model,
            "messages": messages,
        });
        if let Some(temp) = req.temperature {
            body["temperature"] = serde_json::json!(temp);
        }
        if let Some(max) = req.max_tokens {
            body["max_tokens"] = serde_json::json!(max);
        }
        body
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Wire format helpers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn role_to_str(role: Role) -> &'static str {
    match role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
    }
}

fn msg_to_openai(msg: &ChatMessage) -> Value {
    serde_json::json!({
        "role": role_to_str(msg.role),
        "content": msg.content,
    })
}

fn parse_chat_response(provider: &str, body: &Value) -> Result<String> {
    let content = body
        .get("choices")
        .and_then(|c| c.as_array())
        .and_then(|a| a.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|v| v.as_str());

    match content {
        Some(text) => Ok(text.to_string()),
        None => Err(Error::Provider {
            provider: provider.into(),
            message: "no message content in response".into(),
        }),
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Trait implementation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[async_trait::async_trait]
impl CompletionProvider for OpenAiCompatProvider {
    async fn complete(&self, req: &CompletionRequest) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = self.build_chat_body(req);

        tracing::debug!(provider = %self.id, url = %url, "openai_compat chat request");

        let resp = self
            .authed_post(&url)
            .json(&body)
            .send()
            .await
            .map_err(from_reqwest)?;

        let status = resp.status();
        let resp_text = resp.text().await.map_err(from_reqwest)?;

        if !status.is_success() {
            return Err(Error::Provider {
                provider: self.id.clone(),
                message: format!("HTTP {} - {}", status.as_u16(), resp_text),
            });
        }

        let resp_json: Value = serde_json::from_str(&resp_text)?;
        parse_chat_response(&self.id, &resp_json)
    }

    fn provider_id(&self) -> &str {
        &self.id
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;
    use nandi_domain::config::AuthConfig;

    fn test_provider() -> OpenAiCompatProvider {
        let cfg = ProviderConfig {
            id: "test".into(),
            base_url: "https://api.example.com/v1/".into(),
            auth: AuthConfig {
                key: Some("sk-test".into()),
                ..Default::default()
            },
            default_model: Some("gpt-4".into()),
        };
        OpenAiCompatProvider::from_config(&cfg, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let provider = test_provider();
        assert_eq!(provider.base_url, "https://api.example.com/v1");
    }

    #[test]
    fn chat_body_carries_messages_and_sampling_params() {
        let provider = test_provider();
        let req = CompletionRequest {
            messages: vec![
                ChatMessage::system("You are Karma."),
                ChatMessage::user("What goes around?"),
            ],
            temperature: Some(0.7),
            max_tokens: Some(1024),
            model: None,
        };
        let body = provider.build_chat_body(&req);
        assert_eq!(body["model"], "gpt-4");
        assert_eq!(body["temperature"], 0.7);
        assert_eq!(body["max_tokens"], 1024);
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[1]["content"], "What goes around?");
    }

    #[test]
    fn request_model_overrides_provider_default() {
        let provider = test_provider();
        let req = CompletionRequest {
            model: Some("gpt-4o-mini".into()),
            ..Default::default()
        };
        let body = provider.build_chat_body(&req);
        assert_eq!(body["model"], "gpt-4o-mini");
    }

    #[test]
    fn parse_chat_response_extracts_content() {
        let body = serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "Peace."}}]
        });
        assert_eq!(parse_chat_response("test", &body).unwrap(), "Peace.");
    }

    #[test]
    fn parse_chat_response_rejects_missing_choices() {
        let body = serde_json::json!({"error": {"message": "rate limited"}});
        let err = parse_chat_response("test", &body).unwrap_err();
        assert!(matches!(err, Error::Provider { .. }));
    }

    #[test]
    fn missing_api_key_fails_construction() {
        let cfg = ProviderConfig {
            id: "test".into(),
            base_url: "https://api.example.com/v1".into(),
            auth: AuthConfig::default(),
            default_model: None,
        };
        assert!(OpenAiCompatProvider::from_config(&cfg, Duration::from_secs(5)).is_err());
    }
}
