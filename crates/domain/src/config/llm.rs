use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Completion provider system
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Model requested for every completion unless a provider overrides it.
    #[serde(default = "d_default_model")]
    pub default_model: String,
    /// Per-request timeout applied by the HTTP client.
    #[serde(default = "d_120000u")]
    pub default_timeout_ms: u64,
    /// Total attempts made by the retry decorator (1 = no retries).
    #[serde(default = "d_3")]
    pub max_retries: u32,
    /// Registered providers. The gateway uses the first entry; an empty
    /// list boots fine and every chat resolves to a fallback response.
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            default_model: d_default_model(),
            default_timeout_ms: 120_000,
            max_retries: 3,
            providers: Vec::new(),
        }
    }
}

/// A single OpenAI-compatible completion endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub id: String,
    pub base_url: String,
    #[serde(default)]
    pub auth: AuthConfig,
    /// Overrides `llm.default_model` for this provider.
    #[serde(default)]
    pub default_model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthConfig {
    /// Header name (e.g. "Authorization", "x-api-key").
    #[serde(default)]
    pub header: Option<String>,
    /// Header value prefix (e.g. "Bearer ").
    #[serde(default)]
    pub prefix: Option<String>,
    /// Env var containing the key.
    #[serde(default)]
    pub env: Option<String>,
    /// Direct key (for config-only setups; prefer env).
    #[serde(default)]
    pub key: Option<String>,
}

// ── serde default helpers ───────────────────────────────────────────

fn d_default_model() -> String {
    "gpt-4".into()
}
fn d_120000u() -> u64 {
    120_000
}
fn d_3() -> u32 {
    3
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
