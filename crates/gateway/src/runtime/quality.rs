//! Extraction of the embedded quality tag from model output.
//!
//! The quality-evaluation prompt instructs the model to append a marker
//! of the shape `[QUALITY:<score>:<reason>]` to its reply. The parser
//! pulls score and reason from the first marker and strips every marker
//! from the text shown to the user.

use regex::Regex;

/// Score reported when no tag is found.
pub const DEFAULT_SCORE: i32 = 5;
/// Reason reported when no tag is found.
pub const DEFAULT_REASON: &str = "Question quality could not be evaluated";

const QUALITY_TAG: &str = r"\[QUALITY:(\d+):([^\]]+)\]";

/// The quality signal recovered from one model reply.
#[derive(Debug, Clone, PartialEq)]
pub struct QualitySignal {
    /// Self-reported score. Taken from the tag as-is; the 1-10 range is a
    /// prompt-side convention the provider may not honor.
    pub score: i32,
    pub reason: String,
    /// Reply text with every tag removed and the ends trimmed.
    pub cleaned: String,
}

pub struct QualityParser {
    tag: Regex,
}

impl QualityParser {
    pub fn new() -> Self {
        Self {
            tag: Regex::new(QUALITY_TAG).expect("quality tag pattern is valid"),
        }
    }

    /// Parse one raw model reply.
    ///
    /// The first tag supplies score and reason; all tags are stripped from
    /// the cleaned text so later occurrences never leak to the client.
    pub fn parse(&self, raw: &str) -> QualitySignal {
        match self.tag.captures(raw) {
            Some(caps) => {
                let score = caps[1].parse().unwrap_or(DEFAULT_SCORE);
                let reason = caps[2].trim().to_string();
                let cleaned = self.tag.replace_all(raw, "").trim().to_string();
                QualitySignal {
                    score,
                    reason,
                    cleaned,
                }
            }
            None => QualitySignal {
                score: DEFAULT_SCORE,
                reason: DEFAULT_REASON.to_string(),
                cleaned: raw.trim().to_string(),
            },
        }
    }
}

impl Default for QualityParser {
    fn default() -> Self {
        Self::new()
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
