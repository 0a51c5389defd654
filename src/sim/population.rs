//! Ball population and its lifecycle
//!
//! Owns every ball plus the spawn RNG. Balls only leave the population at
//! step boundaries, so indices handed out by the broad-phase stay valid for
//! a whole step. External code should refer to balls by `id`.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use std::f32::consts::TAU;

use super::ball::{Ball, Color};
use crate::consts::MAX_BALL_RADIUS;
use crate::polar_to_cartesian;

/// Rounding slack when turning accumulated debt into whole balls
const DEBT_EPSILON: f64 = 1e-9;

/// What the lifecycle pass did during one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lifecycle {
    pub removed: usize,
    pub spawned: usize,
    /// The population went extinct and one ball was forced in
    pub revived: bool,
}

/// The live balls plus spawn parameters
#[derive(Debug, Clone)]
pub struct Population {
    balls: Vec<Ball>,
    spawn_center: Vec2,
    /// Radius given to future spawns
    ball_radius: f32,
    /// Replacement balls per removed ball
    respawn_ratio: f64,
    min_speed: f32,
    max_speed: f32,
    /// Fractional replacements owed from earlier removals
    debt: f64,
    next_id: u32,
    rng: Pcg32,
}

impl Population {
    /// Create an empty population that draws spawn velocities from `rng`
    pub fn new(
        spawn_center: Vec2,
        ball_radius: f32,
        respawn_ratio: f64,
        speed_range: (f32, f32),
        rng: Pcg32,
    ) -> Self {
        debug_assert!(speed_range.0 <= speed_range.1, "inverted speed range");
        Self {
            balls: Vec::new(),
            spawn_center,
            ball_radius,
            respawn_ratio,
            min_speed: speed_range.0,
            max_speed: speed_range.1,
            debt: 0.0,
            next_id: 0,
            rng,
        }
    }

    #[inline]
    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    #[inline]
    pub fn balls_mut(&mut self) -> &mut [Ball] {
        &mut self.balls
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.balls.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }

    #[inline]
    pub fn spawn_center(&self) -> Vec2 {
        self.spawn_center
    }

    #[inline]
    pub fn ball_radius(&self) -> f32 {
        self.ball_radius
    }

    /// Radius for future spawns; live balls keep theirs
    pub fn set_ball_radius(&mut self, radius: f32) {
        debug_assert!(radius > 0.0, "ball radius must be positive");
        debug_assert!(
            radius <= MAX_BALL_RADIUS,
            "ball radius exceeds the broad-phase limit"
        );
        self.ball_radius = radius;
    }

    /// Resize every live ball as well as future spawns
    pub fn resize_all(&mut self, radius: f32) {
        self.set_ball_radius(radius);
        for ball in &mut self.balls {
            ball.set_radius(radius);
        }
    }

    #[inline]
    pub fn respawn_ratio(&self) -> f64 {
        self.respawn_ratio
    }

    pub fn set_respawn_ratio(&mut self, ratio: f64) {
        debug_assert!(ratio >= 0.0, "respawn ratio must not be negative");
        self.respawn_ratio = ratio;
    }

    pub fn set_speed_range(&mut self, min: f32, max: f32) {
        debug_assert!(min <= max, "inverted speed range");
        self.min_speed = min;
        self.max_speed = max;
    }

    /// Replacements owed but not yet spawned (always < 1 after a step)
    #[inline]
    pub fn debt(&self) -> f64 {
        self.debt
    }

    /// Allocate a new ball ID
    fn next_ball_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Random direction in [0, 2π), random speed in [min, max]
    fn random_velocity(&mut self) -> Vec2 {
        let angle = self.rng.random_range(0.0..TAU);
        let speed = self.rng.random_range(self.min_speed..=self.max_speed);
        polar_to_cartesian(speed, angle)
    }

    /// Add a ball with the shared radius at an explicit position and velocity
    pub fn spawn_with(&mut self, pos: Vec2, vel: Vec2) -> u32 {
        let id = self.next_ball_id();
        let color = Color::random(&mut self.rng);
        self.balls.push(Ball::new(id, pos, vel, self.ball_radius, color));
        id
    }

    /// Spawn one ball at the spawn center with a random velocity
    pub fn spawn(&mut self) -> u32 {
        let vel = self.random_velocity();
        self.spawn_with(self.spawn_center, vel)
    }

    /// Drop every ball and forget any owed replacements
    pub fn clear(&mut self) {
        self.balls.clear();
        self.debt = 0.0;
    }

    /// Remove every ball fully outside `[0, width] x [0, height]`.
    /// Returns the number removed.
    pub fn remove_exited(&mut self, width: f32, height: f32) -> usize {
        let before = self.balls.len();
        self.balls.retain(|b| !b.is_outside(width, height));
        before - self.balls.len()
    }

    /// Spawn replacements for `removed` balls, carrying fractional remainders.
    /// Returns the number spawned.
    pub fn replenish(&mut self, removed: usize) -> usize {
        if removed == 0 {
            return 0;
        }

        self.debt += removed as f64 * self.respawn_ratio;
        // Repeated sums like 10 x 0.7 land just under the integer
        let to_spawn = (self.debt + DEBT_EPSILON).floor();
        self.debt = (self.debt - to_spawn).max(0.0);

        let to_spawn = to_spawn as usize;
        for _ in 0..to_spawn {
            self.spawn();
        }
        to_spawn
    }

    /// Guarantee at least one ball. Returns true if one had to be spawned.
    pub fn ensure_alive(&mut self) -> bool {
        if !self.balls.is_empty() {
            return false;
        }
        self.spawn();
        self.debt = 0.0;
        true
    }

    /// End-of-step lifecycle: remove, replenish, then the safety floor
    pub fn update(&mut self, width: f32, height: f32) -> Lifecycle {
        let removed = self.remove_exited(width, height);
        let mut spawned = self.replenish(removed);
        let revived = self.ensure_alive();
        if revived {
            spawned += 1;
            log::debug!("Population empty, spawned safety ball");
        }
        if removed > 0 {
            log::debug!(
                "Removed {} balls, spawned {} (debt {:.3}, {} alive)",
                removed,
                spawned,
                self.debt,
                self.balls.len()
            );
        }
        Lifecycle {
            removed,
            spawned,
            revived,
        }
    }
}
