//! The chat pipeline.
//!
//! One linear happy path with a fallback split: cache probe (stateless
//! requests only), prompt assembly, provider call, quality-tag parse,
//! cache store. Every failure — missing provider, network error, bad
//! payload — resolves to a persona fallback response; `generate` never
//! returns an error to the transport layer.

use std::sync::Arc;

use nandi_domain::chat::{ChatMessage, ChatRequest, ChatResponse, Persona};
use nandi_domain::error::{Error, Result};
use nandi_prompts::PromptCatalog;
use nandi_providers::{CompletionProvider, CompletionRequest};

use crate::runtime::cache::ResponseCache;
use crate::runtime::quality::QualityParser;

/// Persona whose prompt and fallback stand in when the requested persona
/// has no catalog entry.
const DEFAULT_PERSONA: Persona = Persona::Karma;

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 1024;

/// Score and reason attached to fallback responses. Generation failure
/// never penalizes the user's quality score.
const FALLBACK_SCORE: i32 = 7;
const FALLBACK_REASON: &str = "Good question showing interest in spiritual growth";

pub struct ChatEngine {
    catalog: Arc<PromptCatalog>,
    cache: Arc<ResponseCache>,
    provider: Option<Arc<dyn CompletionProvider>>,
    parser: QualityParser,
    default_model: String,
}

impl ChatEngine {
    pub fn new(
        catalog: Arc<PromptCatalog>,
        cache: Arc<ResponseCache>,
        provider: Option<Arc<dyn CompletionProvider>>,
        default_model: impl Into<String>,
    ) -> Self {
        Self {
            catalog,
            cache,
            provider,
            parser: QualityParser::new(),
            default_model: default_model.into(),
        }
    }

    pub fn cache(&self) -> &Arc<ResponseCache> {
        &self.cache
    }

    /// Run the full pipeline for one request. Never fails.
    pub async fn generate(&self, request: &ChatRequest) -> ChatResponse {
        let request_id = uuid::Uuid::new_v4();
        let stateless = request.context.as_deref().map_or(true, |c| c.is_empty());
        tracing::info!(
            %request_id,
            persona = %request.persona,
            stateless,
            session_id = request.session_id.as_deref().unwrap_or(""),
            "processing chat request"
        );

        // Contextual requests depend on history, so only stateless ones
        // may be answered from (or stored into) the cache.
        if stateless {
            if let Some(cached) = self.cache.get(request.persona, &request.message) {
                tracing::info!(%request_id, "returning cached response");
                return cached;
            }
        }

        match self.complete(request).await {
            Ok(raw) => {
                let signal = self.parser.parse(&raw);
                tracing::info!(
                    %request_id,
                    quality_score = signal.score,
                    "generated response"
                );
                let response = ChatResponse::new(signal.cleaned, signal.score, signal.reason);
                if stateless {
                    self.cache
                        .put(request.persona, &request.message, response.clone());
                }
                response
            }
            Err(e) => {
                tracing::warn!(%request_id, error = %e, "generation failed, using fallback");
                self.fallback(request.persona, &e)
            }
        }
    }

    /// Assemble the upstream request and call the provider.
    async fn complete(&self, request: &ChatRequest) -> Result<String> {
        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| Error::Config("no completion provider configured".into()))?;

        let mut system_prompt = self.catalog.persona_prompt(request.persona.as_str());
        if system_prompt.is_empty() {
            tracing::warn!(
                persona = %request.persona,
                "no prompt for persona, using the default persona's voice"
            );
            system_prompt = self.catalog.persona_prompt(DEFAULT_PERSONA.as_str());
        }
        let quality_prompt = self.catalog.quality_prompt();

        let mut messages = vec![ChatMessage::system(format!(
            "{system_prompt}{quality_prompt}"
        ))];
        if let Some(context) = &request.context {
            messages.extend(context.iter().cloned());
        }
        messages.push(ChatMessage::user(request.message.clone()));

        let req = CompletionRequest {
            messages,
            temperature: Some(TEMPERATURE),
            max_tokens: Some(MAX_TOKENS),
            model: Some(self.default_model.clone()),
        };
        provider.complete(&req).await
    }

    /// Build the persona fallback response for a failed generation.
    fn fallback(&self, persona: Persona, cause: &Error) -> ChatResponse {
        let mut text = self.catalog.fallback_response(persona.as_str());
        if text.is_empty() {
            text = self.catalog.fallback_response(DEFAULT_PERSONA.as_str());
        }
        let message =
            format!("{text} (Note: Using fallback response due to API error: {cause})");
        ChatResponse::new(message, FALLBACK_SCORE, FALLBACK_REASON)
    }
}
