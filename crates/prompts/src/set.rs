use serde::Deserialize;
use std::collections::HashMap;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Prompt document shape
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One parsed prompts document.
///
/// Every section defaults to empty so a sparse or missing document
/// degrades to empty-string lookups instead of a parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PromptSet {
    #[serde(default)]
    pub personas: HashMap<String, PersonaPrompt>,
    #[serde(default)]
    pub quality: QualityPrompt,
    #[serde(default)]
    pub fallbacks: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonaPrompt {
    #[serde(default)]
    pub system_prompt: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QualityPrompt {
    #[serde(default)]
    pub evaluation_prompt: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_parses_to_empty_set() {
        let set: PromptSet = serde_json::from_str("{}").unwrap();
        assert!(set.personas.is_empty());
        assert!(set.fallbacks.is_empty());
        assert!(set.quality.evaluation_prompt.is_empty());
    }

    #[test]
    fn full_document_parses() {
        let raw = r#"{
            "personas": {
                "karma": {"system_prompt": "You are Karma."},
                "dharma": {"system_prompt": "You are Dharma."}
            },
            "quality": {"evaluation_prompt": "Rate the question."},
            "fallbacks": {"karma": "The threads are tangled."}
        }"#;
        let set: PromptSet = serde_json::from_str(raw).unwrap();
        assert_eq!(set.personas.len(), 2);
        assert_eq!(set.personas["karma"].system_prompt, "You are Karma.");
        assert_eq!(set.quality.evaluation_prompt, "Rate the question.");
        assert_eq!(set.fallbacks["karma"], "The threads are tangled.");
    }

    #[test]
    fn unknown_sections_are_ignored() {
        let raw = r#"{"personas": {}, "extra": {"ignored": true}}"#;
        let set: PromptSet = serde_json::from_str(raw).unwrap();
        assert!(set.personas.is_empty());
    }
}
