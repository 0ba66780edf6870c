//! Persona prompt catalog.
//!
//! Loads persona system prompts, the quality evaluation block, and
//! per-persona fallback text from a JSON document, and serves them to the
//! chat pipeline. The whole set is held as an immutable snapshot that
//! `refresh()` replaces atomically, so concurrent readers always see a
//! fully-old or fully-new catalog.

mod catalog;
mod set;

pub use catalog::PromptCatalog;
pub use set::{PersonaPrompt, PromptSet, QualityPrompt};
