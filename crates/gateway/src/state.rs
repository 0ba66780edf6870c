use std::sync::Arc;

use nandi_domain::config::Config;
use nandi_prompts::PromptCatalog;

use crate::runtime::chat::ChatEngine;

/// Shared application state passed to all API handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Hot-reloadable persona prompt catalog.
    pub catalog: Arc<PromptCatalog>,
    /// The chat pipeline: cache, prompt assembly, provider call, fallback.
    pub chat: Arc<ChatEngine>,
    /// SHA-256 hash of the API bearer token (read once at startup).
    /// `None` = dev mode (no auth enforced).
    pub api_token_hash: Option<Vec<u8>>,
}
