//! Per-factor scoring for the initiative-need decision.
//!
//! Score = w₁·Pause + w₂·ShortMessages + w₃·LowInterest + w₄·HighEnergy + w₅·Success
//!
//! Where:
//!   Pause          = 1 if the user has been silent past the pause threshold
//!   ShortMessages  = min(short_message_counter / saturation, 1)
//!   LowInterest    = 1 if topic interest is below the low-interest line
//!   HighEnergy     = 1 if energy is above the high-energy line
//!   Success        = successful_initiatives / (initiative_count + 1)

use serde::Serialize;

use crate::config::{InitiativeConfig, InitiativeWeights};
use crate::emotion::EmotionalState;

/// Raw factor values, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct InitiativeFactors {
    /// Long pause indicator.
    pub pause_duration: f64,
    /// Saturating short-message run.
    pub short_messages: f64,
    /// Low topic interest indicator.
    pub low_interest: f64,
    /// High energy indicator.
    pub high_energy: f64,
    /// Historical success ratio.
    pub initiative_success: f64,
}

impl InitiativeFactors {
    /// Weighted sum of the factors.
    ///
    /// Summed in declaration order so threshold comparisons are reproducible.
    #[must_use]
    pub fn weighted_score(&self, weights: &InitiativeWeights) -> f64 {
        let mut score = 0.0;
        score += self.pause_duration * weights.pause_duration;
        score += self.short_messages * weights.short_messages;
        score += self.low_interest * weights.low_interest;
        score += self.high_energy * weights.high_energy;
        score += self.initiative_success * weights.initiative_success;
        score
    }
}

/// Inputs to the factor computation that are not part of the emotional state.
#[derive(Debug, Clone, Copy)]
pub struct ScoringInputs {
    /// Whether the current silence counts as a long pause.
    pub long_pause: bool,
    /// Consecutive short messages.
    pub short_message_counter: u32,
    /// Initiatives the user answered at length.
    pub successful_initiatives: u32,
    /// All initiatives with a recorded outcome.
    pub initiative_count: u32,
}

/// Compute every factor for the current turn.
#[must_use]
pub fn compute_factors(
    inputs: ScoringInputs,
    emotion: &EmotionalState,
    config: &InitiativeConfig,
) -> InitiativeFactors {
    InitiativeFactors {
        pause_duration: indicator(inputs.long_pause),
        short_messages: (f64::from(inputs.short_message_counter)
            / f64::from(config.short_message_saturation.max(1)))
        .min(1.0),
        low_interest: indicator(emotion.topic_interest < config.low_interest_below),
        high_energy: indicator(emotion.energy > config.high_energy_above),
        initiative_success: f64::from(inputs.successful_initiatives)
            / (f64::from(inputs.initiative_count) + 1.0),
    }
}

fn indicator(flag: bool) -> f64 {
    if flag { 1.0 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Mood;

    fn inputs(long_pause: bool, short: u32, ok: u32, count: u32) -> ScoringInputs {
        ScoringInputs {
            long_pause,
            short_message_counter: short,
            successful_initiatives: ok,
            initiative_count: count,
        }
    }

    #[test]
    fn all_factors_off_scores_zero() {
        let emotion = EmotionalState::new(Mood::Good, 50, 0, 50);
        let f = compute_factors(inputs(false, 0, 0, 0), &emotion, &InitiativeConfig::default());
        assert_eq!(f, InitiativeFactors::default());
        assert!(f.weighted_score(&InitiativeWeights::default()).abs() < f64::EPSILON);
    }

    #[test]
    fn short_message_factor_saturates() {
        let emotion = EmotionalState::new(Mood::Good, 50, 0, 50);
        let config = InitiativeConfig::default();
        let two = compute_factors(inputs(false, 2, 0, 0), &emotion, &config);
        assert!((two.short_messages - 2.0 / 3.0).abs() < 1e-12);
        let many = compute_factors(inputs(false, 9, 0, 0), &emotion, &config);
        assert!((many.short_messages - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn threshold_lines_are_strict() {
        let config = InitiativeConfig::default();
        let at_lines = EmotionalState::new(Mood::Good, 70, 0, 30);
        let f = compute_factors(inputs(false, 0, 0, 0), &at_lines, &config);
        assert!(f.low_interest.abs() < f64::EPSILON);
        assert!(f.high_energy.abs() < f64::EPSILON);

        let past_lines = EmotionalState::new(Mood::Good, 71, 0, 29);
        let f = compute_factors(inputs(false, 0, 0, 0), &past_lines, &config);
        assert!((f.low_interest - 1.0).abs() < f64::EPSILON);
        assert!((f.high_energy - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn success_ratio_is_damped_by_one() {
        let emotion = EmotionalState::default();
        let f = compute_factors(inputs(false, 0, 3, 3), &emotion, &InitiativeConfig::default());
        assert!((f.initiative_success - 0.75).abs() < 1e-12);
    }

    #[test]
    fn everything_on_scores_full_weight() {
        let emotion = EmotionalState::new(Mood::Good, 90, 0, 10);
        let f = compute_factors(inputs(true, 3, 0, 0), &emotion, &InitiativeConfig::default());
        let score = f.weighted_score(&InitiativeWeights::default());
        assert!((score - 0.8).abs() < 1e-9);
    }
}
