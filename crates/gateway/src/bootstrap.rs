//! AppState construction and background-task spawning.
//!
//! `serve` and the config subcommands share this boot path so the wiring
//! lives in one place: validate config, load the prompt catalog, build
//! the cache and provider chain, hash the API token.

use std::sync::Arc;
use std::time::Duration;

use sha2::{Digest, Sha256};

use nandi_domain::config::{Config, ConfigSeverity, Environment};
use nandi_prompts::PromptCatalog;

use crate::runtime::cache::ResponseCache;
use crate::runtime::chat::ChatEngine;
use crate::state::AppState;

/// Validate config, initialize every subsystem and return a fully-wired
/// [`AppState`].
pub fn build_app_state(config: Arc<Config>) -> anyhow::Result<AppState> {
    // ── Config validation ────────────────────────────────────────────
    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            ConfigSeverity::Warning => tracing::warn!("config: {issue}"),
            ConfigSeverity::Error => tracing::error!("config: {issue}"),
        }
    }
    if issues.iter().any(|i| i.severity == ConfigSeverity::Error) {
        anyhow::bail!(
            "config validation failed with {} error(s)",
            issues
                .iter()
                .filter(|i| i.severity == ConfigSeverity::Error)
                .count()
        );
    }

    // ── Prompt catalog ───────────────────────────────────────────────
    let catalog = Arc::new(PromptCatalog::load(&config.prompts.path));

    // ── Response cache ───────────────────────────────────────────────
    let cache_enabled = config.environment != Environment::Development;
    let cache = Arc::new(ResponseCache::new(
        Duration::from_secs(config.cache.ttl_minutes * 60),
        cache_enabled,
    ));
    if cache_enabled {
        tracing::info!(ttl_minutes = config.cache.ttl_minutes, "response cache ready");
    } else {
        tracing::info!("response cache disabled (development environment)");
    }

    // ── Completion provider ──────────────────────────────────────────
    let provider = nandi_providers::build_provider(&config.llm);
    if provider.is_none() {
        tracing::info!(
            "no completion provider available — chat requests will receive fallback responses"
        );
    }

    // ── Chat engine ──────────────────────────────────────────────────
    let chat = Arc::new(ChatEngine::new(
        catalog.clone(),
        cache,
        provider,
        config.llm.default_model.clone(),
    ));

    // ── API token (read once, hash for constant-time comparison) ────
    let api_token_hash = {
        let env_var = &config.server.api_token_env;
        match std::env::var(env_var).ok().filter(|t| !t.is_empty()) {
            Some(token) => {
                tracing::info!(source = %format!("env:{env_var}"), "API bearer-token auth enabled");
                Some(Sha256::digest(token.as_bytes()).to_vec())
            }
            None => {
                tracing::warn!(
                    "API bearer-token auth DISABLED — set the {env_var} env var to enable it"
                );
                None
            }
        }
    };

    Ok(AppState {
        config,
        catalog,
        chat,
        api_token_hash,
    })
}

/// Spawn the long-running background tasks.
///
/// Call this **after** [`build_app_state`] when running the HTTP server.
pub fn spawn_background_tasks(state: &AppState) {
    // ── Periodic cache expiry sweep ──────────────────────────────────
    {
        let cache = state.chat.cache().clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(60));
            loop {
                interval.tick().await;
                cache.cleanup();
            }
        });
    }
    tracing::info!("background tasks spawned");
}
