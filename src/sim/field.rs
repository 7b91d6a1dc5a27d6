//! Live obstacles: spawning, scrolling, culling, scoring
//!
//! Obstacles are kept in spawn order, which is also left-to-right order since
//! every spawn lands to the right of the current rightmost obstacle.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyParams;
use super::obstacle::Obstacle;
use crate::settings::{GapMargins, Settings};

/// Ordered collection of live obstacles plus the spawn clock
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    time_since_last_spawn: f32,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live obstacles in spawn order
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn time_since_last_spawn(&self) -> f32 {
        self.time_since_last_spawn
    }

    /// Drop every obstacle and reset the spawn clock
    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.time_since_last_spawn = 0.0;
    }

    /// Replace the field with the opening pair of obstacles
    ///
    /// The first sits at the right edge of the playfield, the second one
    /// `initial_spacing_multiplier` playfield widths further out.
    pub fn populate_initial<R: Rng + ?Sized>(
        &mut self,
        params: &DifficultyParams,
        settings: &Settings,
        rng: &mut R,
    ) {
        self.clear();
        let width = settings.playfield.width;
        let spacing = (width * params.initial_spacing_multiplier).floor();
        for i in 0..2 {
            let x = width + i as f32 * spacing;
            let gap_top = sample_gap_top(params.gap_size, settings, settings.obstacles.initial_margins, rng);
            self.push(x, gap_top, params.gap_size, settings);
        }
    }

    /// Scroll every obstacle left by `speed * dt` and cull those far behind
    ///
    /// Returns the number of obstacles culled.
    pub fn advance(&mut self, dt: f32, speed: f32, cull_margin: f32) -> usize {
        let dx = -speed * dt;
        for obstacle in &mut self.obstacles {
            obstacle.advance(dx);
        }

        let before = self.obstacles.len();
        self.obstacles.retain(|o| o.trailing_edge() >= -cull_margin);
        let culled = before - self.obstacles.len();
        if culled > 0 {
            log::debug!("Culled {} obstacle(s), {} live", culled, self.obstacles.len());
        }
        culled
    }

    /// Append a prebuilt obstacle (scripted layouts, replays)
    ///
    /// It must not sit left of the current rightmost obstacle, which would
    /// break spawn-order = left-to-right order.
    pub fn push_obstacle(&mut self, obstacle: Obstacle) {
        if let Some(last) = self.obstacles.last() {
            assert!(
                obstacle.x >= last.x,
                "obstacle at x={} would precede x={}",
                obstacle.x,
                last.x
            );
        }
        self.obstacles.push(obstacle);
    }

    /// Advance the spawn clock and spawn one obstacle once the interval elapses
    ///
    /// Returns `true` if an obstacle was spawned this call.
    pub fn maybe_spawn<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        params: &DifficultyParams,
        settings: &Settings,
        rng: &mut R,
    ) -> bool {
        self.time_since_last_spawn += dt;
        if self.time_since_last_spawn < params.spawn_interval {
            return false;
        }

        let width = settings.playfield.width;
        let rightmost = self.obstacles.iter().map(|o| o.x).reduce(f32::max).unwrap_or(0.0);
        let spacing = (width * settings.obstacles.spacing_fraction).floor();
        let x = (width + settings.obstacles.spawn_lead).max(rightmost + spacing);
        let gap_top = sample_gap_top(params.gap_size, settings, settings.obstacles.spawn_margins, rng);

        self.push(x, gap_top, params.gap_size, settings);
        self.time_since_last_spawn = 0.0;
        log::debug!("Spawned obstacle at x={x} gap=[{gap_top}, {})", gap_top + params.gap_size);
        true
    }

    /// First obstacle (in spawn order) whose trailing edge is still past `x`
    pub fn next_obstacle_ahead_of(&self, x: f32) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.trailing_edge() > x)
    }

    /// Mark obstacles whose trailing edge has passed `agent_x`
    ///
    /// Each obstacle is counted at most once over its lifetime. Returns the
    /// number newly marked this call.
    pub fn collect_passed(&mut self, agent_x: f32) -> u32 {
        let mut passed = 0;
        for obstacle in self.obstacles.iter_mut().filter(|o| !o.scored) {
            if obstacle.trailing_edge() < agent_x {
                obstacle.scored = true;
                passed += 1;
            }
        }
        passed
    }

    fn push(&mut self, x: f32, gap_top: f32, gap_size: f32, settings: &Settings) {
        self.obstacles.push(Obstacle::new(
            x,
            gap_top,
            gap_size,
            settings.obstacles.width,
            settings.playfield.height,
        ));
    }
}

/// Uniform integer gap top keeping the whole gap inside the margins
fn sample_gap_top<R: Rng + ?Sized>(
    gap_size: f32,
    settings: &Settings,
    margins: GapMargins,
    rng: &mut R,
) -> f32 {
    let (lo, hi) =
        margins.gap_top_range(settings.obstacles.min_gap_y, settings.playfield.height, gap_size);
    assert!(
        hi >= lo,
        "gap of {gap_size} does not fit between margins ({lo}..={hi})"
    );
    rng.random_range(lo..=hi) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn easy() -> DifficultyParams {
        Settings::default().difficulty.easy
    }

    fn field_with(xs: &[f32]) -> ObstacleField {
        let settings = Settings::default();
        let mut field = ObstacleField::new();
        for &x in xs {
            field.push(x, 200.0, 200.0, &settings);
        }
        field
    }

    #[test]
    fn test_initial_pair_positions() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut field = ObstacleField::new();
        field.populate_initial(&easy(), &settings, &mut rng);

        let xs: Vec<f32> = field.obstacles().iter().map(|o| o.x).collect();
        assert_eq!(xs, vec![400.0, 920.0]);
        assert_eq!(field.time_since_last_spawn(), 0.0);
        for o in field.obstacles() {
            assert_eq!(o.gap_size, 300.0);
            assert!(!o.scored);
        }
    }

    #[test]
    fn test_advance_scrolls_and_culls() {
        let mut field = field_with(&[-60.0, -40.0, 200.0]);
        let culled = field.advance(0.5, 10.0, 50.0);
        // -65 + 48 = -17 survives, -45 + 48 = 3 survives
        assert_eq!(culled, 0);
        assert_eq!(field.obstacles()[0].x, -65.0);

        let culled = field.advance(4.0, 10.0, 50.0);
        // -105 + 48 = -57 is past the margin
        assert_eq!(culled, 1);
        let xs: Vec<f32> = field.obstacles().iter().map(|o| o.x).collect();
        assert_eq!(xs, vec![-85.0, 155.0]);
    }

    #[test]
    fn test_spawn_waits_for_interval() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut field = ObstacleField::new();

        assert!(!field.maybe_spawn(2.0, &easy(), &settings, &mut rng));
        assert!(!field.maybe_spawn(1.5, &easy(), &settings, &mut rng));
        assert!(field.maybe_spawn(0.5, &easy(), &settings, &mut rng));
        assert_eq!(field.len(), 1);
        assert_eq!(field.time_since_last_spawn(), 0.0);
    }

    #[test]
    fn test_spawn_position_empty_field() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut field = ObstacleField::new();
        field.maybe_spawn(4.0, &easy(), &settings, &mut rng);
        assert_eq!(field.obstacles()[0].x, 420.0);
    }

    #[test]
    fn test_spawn_position_follows_rightmost() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut field = field_with(&[100.0, 300.0]);
        field.maybe_spawn(4.0, &easy(), &settings, &mut rng);
        // max(420, 300 + 280)
        assert_eq!(field.obstacles()[2].x, 580.0);

        let mut field = field_with(&[50.0]);
        field.maybe_spawn(4.0, &easy(), &settings, &mut rng);
        // max(420, 50 + 280)
        assert_eq!(field.obstacles()[1].x, 420.0);
    }

    #[test]
    fn test_next_obstacle_ahead_of() {
        let field = field_with(&[10.0, 60.0, 300.0]);
        // First trailing edge is 58, not past 100; second is 108
        assert_eq!(field.next_obstacle_ahead_of(100.0).map(|o| o.x), Some(60.0));
        assert_eq!(field.next_obstacle_ahead_of(400.0).map(|o| o.x), None);
    }

    #[test]
    fn test_collect_passed_counts_once() {
        let mut field = field_with(&[40.0, 300.0]);
        // Trailing edge 88 is not yet past 88
        assert_eq!(field.collect_passed(88.0), 0);
        assert_eq!(field.collect_passed(100.0), 1);
        assert_eq!(field.collect_passed(100.0), 0);
        field.advance(1.0, 10.0, 50.0);
        assert_eq!(field.collect_passed(100.0), 0);
        assert!(field.obstacles()[0].scored);
        assert!(!field.obstacles()[1].scored);
    }

    #[test]
    fn test_collect_passed_same_tick_counts_each() {
        let mut field = field_with(&[0.0, 20.0, 300.0]);
        assert_eq!(field.collect_passed(100.0), 2);
    }

    #[test]
    fn test_same_seed_same_gaps() {
        let settings = Settings::default();
        let run = |seed| {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut field = ObstacleField::new();
            field.populate_initial(&easy(), &settings, &mut rng);
            for _ in 0..5 {
                field.maybe_spawn(4.0, &easy(), &settings, &mut rng);
            }
            field.obstacles().iter().map(|o| o.gap_top_y).collect::<Vec<_>>()
        };
        assert_eq!(run(99), run(99));
    }

    #[test]
    #[should_panic(expected = "does not fit between margins")]
    fn test_oversized_gap_panics_instead_of_leaving_playfield() {
        let mut settings = Settings::default();
        settings.difficulty.easy.gap_size = 550.0;
        let mut rng = Pcg32::seed_from_u64(1);
        let mut field = ObstacleField::new();
        field.populate_initial(&settings.difficulty.easy, &settings, &mut rng);
    }

    #[test]
    fn test_single_gap_top_fits_exactly() {
        let mut settings = Settings::default();
        // Initial band is 80..=80 for a 480 gap
        settings.difficulty.easy.gap_size = 480.0;
        let mut rng = Pcg32::seed_from_u64(1);
        let mut field = ObstacleField::new();
        field.populate_initial(&settings.difficulty.easy, &settings, &mut rng);
        for o in field.obstacles() {
            assert_eq!(o.gap_top_y, 80.0);
            assert_eq!(o.upper_bottom(), 560.0);
        }
    }

    proptest! {
        #[test]
        fn prop_gaps_fit_inside_margins(seed in any::<u64>(), gap in 60.0f32..300.0) {
            let settings = Settings::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let params = DifficultyParams { gap_size: gap, ..easy() };
            let mut field = ObstacleField::new();
            field.populate_initial(&params, &settings, &mut rng);
            for o in field.obstacles() {
                prop_assert!(o.gap_top_y >= 80.0);
                prop_assert!(o.upper_bottom() <= 600.0 - 40.0);
            }
            field.clear();
            field.maybe_spawn(params.spawn_interval, &params, &settings, &mut rng);
            let o = &field.obstacles()[0];
            prop_assert!(o.gap_top_y >= 70.0);
            prop_assert!(o.upper_bottom() <= 600.0 - 30.0);
            prop_assert_eq!(o.gap_top_y.fract(), 0.0);
        }
    }
}
