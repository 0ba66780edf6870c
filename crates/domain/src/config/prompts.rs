use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Prompt catalog source
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptsConfig {
    /// Path to the JSON document holding persona prompts, the quality
    /// evaluation block, and per-persona fallback text.
    #[serde(default = "d_prompts_path")]
    pub path: PathBuf,
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            path: d_prompts_path(),
        }
    }
}

fn d_prompts_path() -> PathBuf {
    PathBuf::from("prompts.json")
}
