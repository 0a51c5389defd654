//! Simulation state, configuration surface, and read-back
//!
//! Everything the outside world touches between steps lives here. The
//! per-step pipeline itself is in `tick`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::ball::Ball;
use super::container::Container;
use super::grid::SpatialGrid;
use super::population::Population;
use crate::consts::{GRID_CELL_SIZE, MAX_BALL_RADIUS};
use crate::settings::Settings;

/// Counters from the most recent step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StepStats {
    /// Candidate pairs produced by the broad-phase
    pub candidate_pairs: usize,
    /// Ball-ball contacts that changed velocities
    pub ball_contacts: usize,
    /// Ball-wall contacts that changed velocities
    pub wall_contacts: usize,
    pub removed: usize,
    pub spawned: usize,
    /// The population died out and was reseeded with one ball
    pub revived: bool,
}

/// Container geometry for display
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContainerView {
    pub center: Vec2,
    pub radius: f32,
    pub angle: f32,
    pub gap_start: f32,
    pub gap_end: f32,
}

impl From<&Container> for ContainerView {
    fn from(container: &Container) -> Self {
        Self {
            center: container.center(),
            radius: container.radius(),
            angle: container.angle(),
            gap_start: container.gap_start(),
            gap_end: container.gap_end(),
        }
    }
}

/// Owned copy of everything a renderer needs after a step
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub time_ticks: u64,
    pub elapsed: f32,
    pub balls: Vec<Ball>,
    pub container: ContainerView,
}

/// The complete simulation
#[derive(Debug, Clone)]
pub struct Simulation {
    /// Current parameters; changes apply at the start of the next step
    pub(super) settings: Settings,
    pub(super) container: Container,
    pub(super) population: Population,
    /// Broad-phase scratch, rebuilt every step
    pub(super) grid: SpatialGrid,
    /// Candidate pair scratch, reused between steps
    pub(super) pairs: Vec<(usize, usize)>,
    pub(super) paused: bool,
    /// Steps taken since the last reset
    pub(super) time_ticks: u64,
    /// Simulated seconds since the last reset
    pub(super) elapsed: f32,
    pub(super) last_step: StepStats,
}

impl Simulation {
    /// Create a simulation with one ball at the container center
    pub fn new(settings: Settings) -> Self {
        let rng = Pcg32::seed_from_u64(settings.seed);
        Self::with_rng(settings, rng)
    }

    /// Create a simulation drawing spawn velocities from `rng`
    pub fn with_rng(settings: Settings, rng: Pcg32) -> Self {
        let center = settings.world_center();
        let container = Container::new(
            center,
            settings.container_radius,
            settings.gap_degrees,
            settings.rotation_speed,
        );
        let population = Population::new(
            center,
            settings.ball_radius,
            settings.respawn_ratio,
            (settings.min_spawn_speed, settings.max_spawn_speed),
            rng,
        );
        let grid = SpatialGrid::new(GRID_CELL_SIZE, settings.world_width, settings.world_height);

        let mut sim = Self {
            settings,
            container,
            population,
            grid,
            pairs: Vec::new(),
            paused: false,
            time_ticks: 0,
            elapsed: 0.0,
            last_step: StepStats::default(),
        };
        sim.population.spawn();
        log::info!(
            "Simulation started: {}x{} world, container r={}, gap {}°",
            sim.settings.world_width,
            sim.settings.world_height,
            sim.settings.container_radius,
            sim.settings.gap_degrees
        );
        sim
    }

    /// Discard every ball and start over with one. Rotation, timer and
    /// respawn debt return to zero; ball IDs keep counting up.
    pub fn reset(&mut self) {
        self.population.clear();
        self.population.spawn();
        self.container.reset_rotation();
        self.time_ticks = 0;
        self.elapsed = 0.0;
        self.last_step = StepStats::default();
        log::info!("Simulation reset");
    }

    // === Configuration ===

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_gravity(&mut self, gravity: f32) {
        self.settings.gravity = gravity;
    }

    pub fn set_restitution(&mut self, restitution: f32) {
        self.settings.restitution = restitution;
    }

    /// Radius for future spawns
    pub fn set_ball_radius(&mut self, radius: f32) {
        debug_assert!(radius > 0.0, "ball radius must be positive");
        debug_assert!(
            radius <= MAX_BALL_RADIUS,
            "ball radius exceeds the broad-phase limit"
        );
        self.settings.ball_radius = radius;
    }

    pub fn set_container_radius(&mut self, radius: f32) {
        debug_assert!(radius > 0.0, "container radius must be positive");
        self.settings.container_radius = radius;
    }

    pub fn set_gap_degrees(&mut self, gap_degrees: f32) {
        debug_assert!(
            (0.0..=360.0).contains(&gap_degrees),
            "gap width must be within 0..=360 degrees"
        );
        self.settings.gap_degrees = gap_degrees;
    }

    pub fn set_respawn_ratio(&mut self, ratio: f64) {
        debug_assert!(ratio >= 0.0, "respawn ratio must not be negative");
        self.settings.respawn_ratio = ratio;
    }

    /// Replace every tunable at once (bounds and seed are fixed at creation)
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.settings = Settings {
            world_width: self.settings.world_width,
            world_height: self.settings.world_height,
            seed: self.settings.seed,
            ..settings.clone()
        };
    }

    /// Drop in an extra ball with the current shared radius. Returns its ID.
    pub fn spawn_ball(&mut self, pos: Vec2, vel: Vec2) -> u32 {
        self.population.spawn_with(pos, vel)
    }

    /// Resize every live ball and all future spawns immediately
    pub fn resize_balls(&mut self, radius: f32) {
        debug_assert!(
            radius > 0.0 && radius <= MAX_BALL_RADIUS,
            "ball radius must be within the broad-phase limit"
        );
        self.settings.ball_radius = radius;
        self.population.resize_all(radius);
    }

    /// Push pending settings into the container and population
    pub(super) fn sync_settings(&mut self) {
        let s = &self.settings;
        self.container.set_radius(s.container_radius);
        self.container.set_gap_degrees(s.gap_degrees);
        self.population.set_ball_radius(s.ball_radius);
        self.population.set_respawn_ratio(s.respawn_ratio);
        self.population.set_speed_range(s.min_spawn_speed, s.max_spawn_speed);
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// While paused, `advance` leaves the state untouched
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    // === Read-back ===

    pub fn balls(&self) -> &[Ball] {
        self.population.balls()
    }

    /// Direct ball access for scripted setups (placing or stopping balls)
    pub fn balls_mut(&mut self) -> &mut [Ball] {
        self.population.balls_mut()
    }

    pub fn ball_count(&self) -> usize {
        self.population.len()
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Simulated seconds since the last reset
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn last_step(&self) -> StepStats {
        self.last_step
    }

    /// Total kinetic energy of all balls
    pub fn kinetic_energy(&self) -> f32 {
        self.balls().iter().map(Ball::kinetic_energy).sum()
    }

    /// Owned copy of the displayable state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            time_ticks: self.time_ticks,
            elapsed: self.elapsed,
            balls: self.population.balls().to_vec(),
            container: ContainerView::from(&self.container),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_spawns_one_ball_at_center() {
        let sim = Simulation::new(Settings::default());
        assert_eq!(sim.ball_count(), 1);
        assert_eq!(sim.balls()[0].pos, Vec2::new(512.0, 384.0));
        assert_eq!(sim.container().center(), Vec2::new(512.0, 384.0));
        assert_eq!(sim.container().angle(), 0.0);
    }

    #[test]
    fn test_setters_wait_for_next_step() {
        let mut sim = Simulation::new(Settings::default());
        sim.set_container_radius(250.0);
        sim.set_gap_degrees(90.0);
        assert_eq!(sim.container().radius(), 300.0);

        sim.sync_settings();
        assert_eq!(sim.container().radius(), 250.0);
        assert_eq!(sim.container().gap_degrees(), 90.0);
    }

    #[test]
    fn test_apply_settings_keeps_world_and_seed() {
        let mut sim = Simulation::new(Settings {
            seed: 5,
            ..Settings::default()
        });
        sim.apply_settings(&Settings {
            gravity: 10.0,
            world_width: 10.0,
            seed: 77,
            ..Settings::default()
        });
        assert_eq!(sim.settings().gravity, 10.0);
        assert_eq!(sim.settings().world_width, 1024.0);
        assert_eq!(sim.settings().seed, 5);
    }

    #[test]
    fn test_resize_balls_applies_now() {
        let mut sim = Simulation::new(Settings::default());
        sim.resize_balls(10.0);
        assert_eq!(sim.balls()[0].radius(), 10.0);
        assert_eq!(sim.population().ball_radius(), 10.0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "broad-phase limit")]
    fn test_oversized_ball_radius_rejected() {
        let mut sim = Simulation::new(Settings::default());
        sim.set_ball_radius(MAX_BALL_RADIUS + 1.0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "broad-phase limit")]
    fn test_oversized_resize_rejected() {
        let mut sim = Simulation::new(Settings::default());
        sim.resize_balls(MAX_BALL_RADIUS * 2.0);
    }

    #[test]
    fn test_snapshot_serializes() {
        let sim = Simulation::new(Settings::default());
        let snapshot = sim.snapshot();
        assert_eq!(snapshot.balls.len(), 1);
        assert_eq!(snapshot.container.radius, 300.0);
        assert!((snapshot.container.gap_end - 45.0_f32.to_radians()).abs() < 1e-6);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["balls"][0]["id"], 0);
        assert!(json["container"]["center"].is_array());
    }
}
