use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Personas
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One of the fixed AI guides a client can converse with.
///
/// Each persona selects a system prompt and a fallback string from the
/// prompt catalog. The set is fixed at compile time; prompt *text* is
/// configuration and can be hot-reloaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    Karma,
    Dharma,
    Atma,
}

impl Persona {
    /// Stable identifier used for catalog lookups and cache keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Persona::Karma => "karma",
            Persona::Dharma => "dharma",
            Persona::Atma => "atma",
        }
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Conversation messages
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A message in the conversation (provider-agnostic).
///
/// Request context carries only `user`/`assistant` turns; the `system`
/// role is minted by the gateway when assembling the upstream request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self { role: Role::System, content: text.into() }
    }
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: Role::User, content: text.into() }
    }
    pub fn assistant(text: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: text.into() }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Request / Response shapes
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// An inbound chat request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// The user's message.
    pub message: String,
    /// Selected persona.
    pub persona: Persona,
    /// Client session identifier (logging/telemetry only).
    #[serde(default)]
    pub session_id: Option<String>,
    /// Previous turns, ordered oldest to newest. A request that carries
    /// context is stateful and bypasses the response cache.
    #[serde(default)]
    pub context: Option<Vec<ChatMessage>>,
}

/// An outbound chat response.
///
/// `id` and `timestamp` are minted when the response is first computed;
/// a cache hit replays the stored response unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub message: String,
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub quality_score: i32,
    pub score_reason: String,
}

impl ChatResponse {
    /// Mint a response with a fresh id and the current UTC timestamp.
    pub fn new(
        message: impl Into<String>,
        quality_score: i32,
        score_reason: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            quality_score,
            score_reason: score_reason.into(),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
