//! Score-driven difficulty curve
//!
//! Below the threshold the easy tier applies unchanged. From the threshold on,
//! the hard tier ramps linearly over `ramp_span` points and then holds.

use serde::{Deserialize, Serialize};

use crate::settings::DifficultySettings;

/// Obstacle parameters in effect for a given score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyParams {
    /// Horizontal obstacle speed (units/s)
    pub speed: f32,
    pub gap_size: f32,
    /// Seconds between spawns
    pub spawn_interval: f32,
    /// Spacing of the initial obstacle pair, in playfield widths
    pub initial_spacing_multiplier: f32,
}

/// Ramp progress in `[0, 1]` for a score at or past the threshold
pub fn ramp_factor(score: u32, settings: &DifficultySettings) -> f32 {
    let extra = score.saturating_sub(settings.threshold) as f32;
    (extra / settings.ramp_span as f32).clamp(0.0, 1.0)
}

/// Difficulty for `score`. Pure; recomputed every tick
pub fn params_for_score(score: u32, settings: &DifficultySettings) -> DifficultyParams {
    if score < settings.threshold {
        return settings.easy;
    }

    let ramp = ramp_factor(score, settings);
    let hard = &settings.hard;
    DifficultyParams {
        speed: hard.speed + settings.ramp_extra_speed * ramp,
        gap_size: (hard.gap_size - settings.ramp_gap_reduction * ramp).max(settings.min_gap),
        spawn_interval: (hard.spawn_interval - settings.ramp_interval_reduction * ramp)
            .max(settings.min_spawn_interval),
        initial_spacing_multiplier: hard.initial_spacing_multiplier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn table() -> DifficultySettings {
        DifficultySettings::default()
    }

    #[test]
    fn test_easy_below_threshold() {
        for score in [0, 1, 15, 29] {
            let p = params_for_score(score, &table());
            assert_eq!(p.speed, 80.0);
            assert_eq!(p.gap_size, 300.0);
            assert_eq!(p.spawn_interval, 4.0);
            assert_eq!(p.initial_spacing_multiplier, 1.3);
        }
    }

    #[test]
    fn test_hard_tier_starts_unramped() {
        let p = params_for_score(30, &table());
        assert_eq!(p.speed, 180.0);
        assert_eq!(p.gap_size, 200.0);
        assert_eq!(p.spawn_interval, 2.0);
        assert_eq!(p.initial_spacing_multiplier, 1.05);
    }

    #[test]
    fn test_ramp_midpoint() {
        let p = params_for_score(55, &table());
        assert!((p.speed - 220.0).abs() < 1e-4);
        assert!((p.gap_size - 175.0).abs() < 1e-4);
        assert!((p.spawn_interval - 1.6).abs() < 1e-4);
    }

    #[test]
    fn test_ramp_saturates() {
        let full = params_for_score(80, &table());
        assert!((full.speed - 260.0).abs() < 1e-4);
        assert!((full.gap_size - 150.0).abs() < 1e-4);
        assert!((full.spawn_interval - 1.2).abs() < 1e-4);
        assert_eq!(params_for_score(5000, &table()), full);
    }

    #[test]
    fn test_floors_apply() {
        let mut settings = table();
        settings.ramp_gap_reduction = 500.0;
        settings.ramp_interval_reduction = 5.0;
        let p = params_for_score(80, &settings);
        assert_eq!(p.gap_size, 60.0);
        assert_eq!(p.spawn_interval, 0.9);
    }

    #[test]
    fn test_continuous_at_threshold() {
        let at = params_for_score(30, &table());
        let just_after = params_for_score(31, &table());
        assert_eq!(at.speed, 180.0);
        // One point past the threshold moves the speed by 80/50 only
        assert!((just_after.speed - at.speed - 1.6).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn prop_hard_params_within_bounds(score in 30u32..10_000) {
            let p = params_for_score(score, &table());
            prop_assert!((180.0..=260.0).contains(&p.speed));
            prop_assert!(p.gap_size >= 60.0 && p.gap_size <= 200.0);
            prop_assert!(p.spawn_interval >= 0.9 && p.spawn_interval <= 2.0);
        }

        #[test]
        fn prop_speed_never_decreases_past_threshold(score in 30u32..200) {
            let now = params_for_score(score, &table());
            let next = params_for_score(score + 1, &table());
            prop_assert!(next.speed >= now.speed);
            prop_assert!(next.gap_size <= now.gap_size);
        }
    }
}
