//! Fixed timestep simulation tick
//!
//! Core loop that advances the simulation deterministically. One call runs
//! the whole pipeline to completion:
//! 1. Rotate the container
//! 2. Gravity and position integration
//! 3. Broad-phase rebuild and candidate pairs
//! 4. Ball-ball contacts, in broad-phase emission order
//! 5. Ball-wall contacts
//! 6. Population lifecycle (remove exited balls, respawn)

use super::ball::Ball;
use super::collision::{ball_ball_contact, ball_container_contact};
use super::response::{resolve_ball_ball, resolve_ball_wall};
use super::state::{Simulation, StepStats};

/// Advance the simulation by one fixed timestep
pub fn tick(sim: &mut Simulation, dt: f32, restitution: f32) {
    if sim.paused {
        return;
    }
    debug_assert!(dt >= 0.0, "negative timestep");

    sim.sync_settings();
    sim.container.advance(dt);

    // Container is read-only from here until the next step
    let container = &sim.container;
    let gravity = sim.settings.gravity;
    let balls = sim.population.balls_mut();

    for ball in balls.iter_mut() {
        ball.apply_gravity(gravity, dt);
        ball.integrate(dt);
    }

    sim.grid.rebuild(balls);
    sim.grid.candidate_pairs(&mut sim.pairs);

    let mut stats = StepStats {
        candidate_pairs: sim.pairs.len(),
        ..StepStats::default()
    };

    // Single pass; emission order decides multi-contact ties
    for &(a, b) in &sim.pairs {
        let (ball_a, ball_b) = pair_mut(balls, a, b);
        let contact = ball_ball_contact(ball_a, ball_b);
        if contact.hit && resolve_ball_ball(ball_a, ball_b, &contact, restitution) {
            stats.ball_contacts += 1;
        }
    }

    for ball in balls.iter_mut() {
        let contact = ball_container_contact(ball, container);
        if contact.hit && resolve_ball_wall(ball, &contact, restitution) {
            stats.wall_contacts += 1;
        }
    }

    let lifecycle = sim
        .population
        .update(sim.settings.world_width, sim.settings.world_height);
    stats.removed = lifecycle.removed;
    stats.spawned = lifecycle.spawned;
    stats.revived = lifecycle.revived;

    log::trace!(
        "Tick {}: {} candidates, {} ball contacts, {} wall contacts",
        sim.time_ticks,
        stats.candidate_pairs,
        stats.ball_contacts,
        stats.wall_contacts
    );

    sim.last_step = stats;
    sim.time_ticks += 1;
    sim.elapsed += dt;
}

/// Borrow two distinct balls mutably, in the order given
fn pair_mut(balls: &mut [Ball], a: usize, b: usize) -> (&mut Ball, &mut Ball) {
    debug_assert_ne!(a, b, "a ball cannot collide with itself");
    if a < b {
        let (lo, hi) = balls.split_at_mut(b);
        (&mut lo[a], &mut hi[0])
    } else {
        let (lo, hi) = balls.split_at_mut(a);
        (&mut hi[0], &mut lo[b])
    }
}

impl Simulation {
    /// Advance one fixed timestep with an explicit restitution
    pub fn advance(&mut self, dt: f32, restitution: f32) {
        tick(self, dt, restitution);
    }

    /// Advance one fixed timestep using the configured restitution
    pub fn step(&mut self, dt: f32) {
        let restitution = self.settings.restitution;
        tick(self, dt, restitution);
    }
}
