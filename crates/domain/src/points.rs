use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::chat::Persona;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Session telemetry
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Telemetry for a finished chat session, reported by the client.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionMetrics {
    /// Persona used in the session.
    pub persona: Persona,
    /// Session duration in seconds.
    pub duration_seconds: u64,
    /// Number of messages sent in the session.
    pub message_count: u32,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Points
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Result of a points calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsBreakdown {
    /// Points earned in this session.
    pub points_earned: u32,
    /// Total accumulated points (baseline offset, no persisted ledger).
    pub total_points: u32,
    /// Per-category points: `base`, `duration`, `streak`.
    pub breakdown: BTreeMap<String, u32>,
}

/// Constants behind the points formula, exposed verbatim to clients.
///
/// `quality_multipliers` and `milestone_bonuses` are not consumed by the
/// calculation itself yet; clients display them and the server reserves
/// them for future rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointsConstants {
    pub base_points_per_question: u32,
    pub time_points_per_minute: u32,
    pub quality_multipliers: BTreeMap<String, f64>,
    pub streak_bonus: u32,
    pub milestone_bonuses: BTreeMap<String, u32>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_metrics_accepts_camel_case_fields() {
        let json = r#"{"persona": "dharma", "durationSeconds": 720, "messageCount": 12}"#;
        let metrics: SessionMetrics = serde_json::from_str(json).unwrap();
        assert_eq!(metrics.persona, Persona::Dharma);
        assert_eq!(metrics.duration_seconds, 720);
        assert_eq!(metrics.message_count, 12);
    }

    #[test]
    fn points_breakdown_serializes_camel_case() {
        let breakdown = PointsBreakdown {
            points_earned: 77,
            total_points: 1077,
            breakdown: BTreeMap::from([
                ("base".to_string(), 60),
                ("duration".to_string(), 12),
                ("streak".to_string(), 5),
            ]),
        };
        let value = serde_json::to_value(&breakdown).unwrap();
        assert_eq!(value["pointsEarned"], 77);
        assert_eq!(value["totalPoints"], 1077);
        assert_eq!(value["breakdown"]["base"], 60);
    }

    #[test]
    fn points_constants_keep_snake_case_keys() {
        let constants = PointsConstants {
            base_points_per_question: 5,
            time_points_per_minute: 1,
            quality_multipliers: BTreeMap::new(),
            streak_bonus: 5,
            milestone_bonuses: BTreeMap::new(),
        };
        let value = serde_json::to_value(&constants).unwrap();
        assert!(value.get("base_points_per_question").is_some());
        assert!(value.get("milestone_bonuses").is_some());
    }
}
