//! Completion provider adapters.
//!
//! The chat pipeline talks to upstream LLM APIs through the
//! [`CompletionProvider`] trait. This crate ships the OpenAI-compatible
//! HTTP adapter, a capped-exponential-backoff retry decorator, and the
//! composition helper that builds the configured provider chain.

pub mod openai_compat;
pub mod retry;
pub mod traits;
mod util;

use std::sync::Arc;
use std::time::Duration;

use nandi_domain::config::LlmConfig;

pub use openai_compat::OpenAiCompatProvider;
pub use retry::RetryProvider;
pub use traits::{CompletionProvider, CompletionRequest};

/// Build the completion provider from config: the first configured
/// endpoint, wrapped in the retry decorator.
///
/// Returns `None` when no provider is configured or the adapter fails to
/// initialize — the gateway boots anyway and chat requests resolve to
/// fallback responses until credentials are fixed.
pub fn build_provider(cfg: &LlmConfig) -> Option<Arc<dyn CompletionProvider>> {
    let provider_cfg = cfg.providers.first()?;
    let timeout = Duration::from_millis(cfg.default_timeout_ms);

    match OpenAiCompatProvider::from_config(provider_cfg, timeout) {
        Ok(provider) => {
            tracing::info!(provider = %provider_cfg.id, "completion provider ready");
            Some(Arc::new(RetryProvider::new(
                Arc::new(provider),
                cfg.max_retries,
            )))
        }
        Err(e) => {
            tracing::warn!(
                provider = %provider_cfg.id,
                error = %e,
                "completion provider failed to initialize — chat will fall back"
            );
            None
        }
    }
}
