//! Karma points engine.
//!
//! Pure conversion of session telemetry into a points breakdown. There is
//! no persisted ledger: `total_points` is a fixed baseline plus the
//! session's earnings, and the streak bonus is a flat constant rather
//! than a product of tracked multi-session streaks.

use std::collections::BTreeMap;

use nandi_domain::points::{PointsBreakdown, PointsConstants, SessionMetrics};

/// Points awarded per question asked in a session.
pub const BASE_POINTS_PER_QUESTION: u32 = 5;
/// Points per completed minute of session time.
pub const TIME_POINTS_PER_MINUTE: u32 = 1;
/// Cap on duration points per session.
pub const MAX_DURATION_POINTS: u32 = 30;
/// Flat bonus granted to every session.
pub const STREAK_BONUS: u32 = 5;
/// Baseline standing in for a per-user accumulated total.
pub const TOTAL_POINTS_BASELINE: u32 = 1000;

/// Calculate the points earned from one session.
pub fn calculate(metrics: &SessionMetrics) -> PointsBreakdown {
    let message_points = BASE_POINTS_PER_QUESTION.saturating_mul(metrics.message_count);
    let duration_points =
        (metrics.duration_seconds / 60).min(MAX_DURATION_POINTS as u64) as u32;
    let points_earned = message_points
        .saturating_add(duration_points)
        .saturating_add(STREAK_BONUS);

    let breakdown = BTreeMap::from([
        ("base".to_string(), message_points),
        ("duration".to_string(), duration_points),
        ("streak".to_string(), STREAK_BONUS),
    ]);

    PointsBreakdown {
        points_earned,
        total_points: TOTAL_POINTS_BASELINE.saturating_add(points_earned),
        breakdown,
    }
}

/// The constants behind the formula, exposed read-only to clients.
///
/// `quality_multipliers` and `milestone_bonuses` are reserved for future
/// rules and returned verbatim even though `calculate` ignores them.
pub fn calculation_constants() -> PointsConstants {
    PointsConstants {
        base_points_per_question: BASE_POINTS_PER_QUESTION,
        time_points_per_minute: TIME_POINTS_PER_MINUTE,
        quality_multipliers: BTreeMap::from([
            ("low".to_string(), 0.5),
            ("medium".to_string(), 1.0),
            ("high".to_string(), 1.5),
        ]),
        streak_bonus: STREAK_BONUS,
        milestone_bonuses: BTreeMap::from([
            ("5_questions".to_string(), 10),
            ("10_questions".to_string(), 20),
            ("25_questions".to_string(), 50),
        ]),
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;
    use nandi_domain::chat::Persona;

    fn metrics(duration_seconds: u64, message_count: u32) -> SessionMetrics {
        SessionMetrics {
            persona: Persona::Dharma,
            duration_seconds,
            message_count,
        }
    }

    #[test]
    fn twelve_minutes_twelve_messages() {
        let result = calculate(&metrics(720, 12));
        assert_eq!(result.breakdown["base"], 60);
        assert_eq!(result.breakdown["duration"], 12);
        assert_eq!(result.breakdown["streak"], 5);
        assert_eq!(result.points_earned, 77);
        assert_eq!(result.total_points, 1077);
    }

    #[test]
    fn duration_points_cap_at_thirty() {
        let result = calculate(&metrics(3600, 0));
        assert_eq!(result.breakdown["duration"], 30);
        assert_eq!(result.points_earned, 35);
    }

    #[test]
    fn only_completed_minutes_count() {
        let result = calculate(&metrics(119, 0));
        assert_eq!(result.breakdown["duration"], 1);
    }

    #[test]
    fn empty_session_still_earns_the_streak_bonus() {
        let result = calculate(&metrics(0, 0));
        assert_eq!(result.points_earned, 5);
        assert_eq!(result.total_points, 1005);
    }

    #[test]
    fn breakdown_carries_exactly_three_categories() {
        let result = calculate(&metrics(60, 1));
        let keys: Vec<_> = result.breakdown.keys().cloned().collect();
        assert_eq!(keys, ["base", "duration", "streak"]);
    }

    #[test]
    fn constants_are_returned_verbatim() {
        let constants = calculation_constants();
        assert_eq!(constants.base_points_per_question, 5);
        assert_eq!(constants.time_points_per_minute, 1);
        assert_eq!(constants.streak_bonus, 5);
        assert_eq!(constants.quality_multipliers["low"], 0.5);
        assert_eq!(constants.quality_multipliers["medium"], 1.0);
        assert_eq!(constants.quality_multipliers["high"], 1.5);
        assert_eq!(constants.milestone_bonuses["5_questions"], 10);
        assert_eq!(constants.milestone_bonuses["10_questions"], 20);
        assert_eq!(constants.milestone_bonuses["25_questions"], 50);
    }

    #[test]
    fn huge_inputs_saturate_instead_of_overflowing() {
        let result = calculate(&metrics(u64::MAX, u32::MAX));
        assert_eq!(result.breakdown["duration"], 30);
        assert_eq!(result.points_earned, u32::MAX);
    }
}
