use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

use nandi_domain::error::Result;

use crate::set::PromptSet;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Prompt catalog
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// In-memory prompt catalog backed by a JSON file.
///
/// The current [`PromptSet`] lives behind an `Arc`; readers clone the
/// `Arc` under a short read lock and never observe a partially-updated
/// set. `refresh()` builds the replacement set off-lock and swaps it in
/// with a single write.
pub struct PromptCatalog {
    prompts_path: PathBuf,
    set: RwLock<Arc<PromptSet>>,
}

impl PromptCatalog {
    /// Load the catalog from `path`.
    ///
    /// A missing or corrupt file degrades to an empty set: lookups return
    /// empty strings and the chat pipeline falls back to its default
    /// persona behavior. Startup never fails on prompt problems.
    pub fn load(path: &Path) -> Self {
        let set = match Self::read_set(path) {
            Ok(set) => {
                tracing::info!(
                    personas = set.personas.len(),
                    fallbacks = set.fallbacks.len(),
                    path = %path.display(),
                    "prompt catalog loaded"
                );
                set
            }
            Err(e) => {
                tracing::error!(
                    path = %path.display(),
                    error = %e,
                    "failed to load prompts, starting with an empty catalog"
                );
                PromptSet::default()
            }
        };
        Self {
            prompts_path: path.to_path_buf(),
            set: RwLock::new(Arc::new(set)),
        }
    }

    fn read_set(path: &Path) -> Result<PromptSet> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn snapshot(&self) -> Arc<PromptSet> {
        self.set.read().clone()
    }

    /// The system prompt for a persona, or empty when unknown/unloaded.
    pub fn persona_prompt(&self, persona: &str) -> String {
        self.snapshot()
            .personas
            .get(persona)
            .map(|p| p.system_prompt.clone())
            .unwrap_or_default()
    }

    /// The shared quality-evaluation instruction block.
    pub fn quality_prompt(&self) -> String {
        self.snapshot().quality.evaluation_prompt.clone()
    }

    /// The canned fallback text for a persona, or empty when absent.
    pub fn fallback_response(&self, persona: &str) -> String {
        self.snapshot()
            .fallbacks
            .get(persona)
            .cloned()
            .unwrap_or_default()
    }

    /// Reload the catalog from disk, atomically replacing the snapshot.
    ///
    /// On failure the previous snapshot stays in place and the error is
    /// returned so the administrative caller can report it.
    pub fn refresh(&self) -> Result<()> {
        let set = Self::read_set(&self.prompts_path)?;
        let personas = set.personas.len();
        *self.set.write() = Arc::new(set);
        tracing::info!(personas, path = %self.prompts_path.display(), "prompt catalog reloaded");
        Ok(())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
