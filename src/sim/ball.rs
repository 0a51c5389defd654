//! Ball entity
//!
//! Balls are frictionless disks with no spin. Mass is area: m = π·r².

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Display color (ignored by physics)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Random bright color (each channel in 100..=255, opaque)
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::rgb(
            rng.random_range(100..=255),
            rng.random_range(100..=255),
            rng.random_range(100..=255),
        )
    }
}

/// A ball entity
#[derive(Debug, Clone, Serialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    radius: f32,
    /// Always π·radius²
    mass: f32,
    pub color: Color,
}

impl Ball {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, radius: f32, color: Color) -> Self {
        debug_assert!(radius > 0.0, "ball radius must be positive");
        Self {
            id,
            pos,
            vel,
            radius,
            mass: PI * radius * radius,
            color,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Change the radius, keeping mass in step
    pub fn set_radius(&mut self, radius: f32) {
        debug_assert!(radius > 0.0, "ball radius must be positive");
        self.radius = radius;
        self.mass = PI * radius * radius;
    }

    /// Gravity acts along +Y (screen down)
    #[inline]
    pub fn apply_gravity(&mut self, gravity: f32, dt: f32) {
        self.vel.y += gravity * dt;
    }

    /// Explicit Euler position step
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// True once no part of the ball remains inside `[0, width] x [0, height]`
    pub fn is_outside(&self, width: f32, height: f32) -> bool {
        self.pos.x - self.radius > width
            || self.pos.x + self.radius < 0.0
            || self.pos.y - self.radius > height
            || self.pos.y + self.radius < 0.0
    }

    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.vel.length_squared()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn ball_at(pos: Vec2, radius: f32) -> Ball {
        Ball::new(0, pos, Vec2::ZERO, radius, Color::rgb(255, 255, 255))
    }

    #[test]
    fn test_mass_is_area() {
        let ball = ball_at(Vec2::ZERO, 7.5);
        assert!((ball.mass() - PI * 56.25).abs() < 1e-3);
    }

    #[test]
    fn test_gravity_then_integrate() {
        let mut ball = ball_at(Vec2::new(10.0, 10.0), 5.0);
        ball.vel = Vec2::new(60.0, 0.0);
        ball.apply_gravity(980.0, 0.5);
        ball.integrate(0.5);
        assert_eq!(ball.vel, Vec2::new(60.0, 490.0));
        assert_eq!(ball.pos, Vec2::new(40.0, 255.0));
    }

    #[test]
    fn test_outside_right_edge() {
        let width = 1024.0;
        let gone = ball_at(Vec2::new(width + 10.1, 300.0), 10.0);
        assert!(gone.is_outside(width, 768.0));

        // Touching the edge from inside is still in play
        let touching = ball_at(Vec2::new(width - 10.0, 300.0), 10.0);
        assert!(!touching.is_outside(width, 768.0));

        // Straddling the edge is still in play
        let straddling = ball_at(Vec2::new(width + 5.0, 300.0), 10.0);
        assert!(!straddling.is_outside(width, 768.0));
    }

    #[test]
    fn test_outside_each_edge() {
        let (w, h) = (100.0, 80.0);
        assert!(ball_at(Vec2::new(-6.0, 40.0), 5.0).is_outside(w, h));
        assert!(ball_at(Vec2::new(50.0, -6.0), 5.0).is_outside(w, h));
        assert!(ball_at(Vec2::new(50.0, 86.0), 5.0).is_outside(w, h));
        assert!(!ball_at(Vec2::new(50.0, 84.0), 5.0).is_outside(w, h));
    }

    #[test]
    fn test_random_color_is_bright() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..100 {
            let c = Color::random(&mut rng);
            assert!(c.r >= 100 && c.g >= 100 && c.b >= 100);
            assert_eq!(c.a, 255);
        }
    }

    proptest! {
        #[test]
        fn mass_tracks_radius(initial in 0.1f32..50.0, resized in 0.1f32..50.0) {
            let mut ball = ball_at(Vec2::ZERO, initial);
            prop_assert!((ball.mass() - PI * initial * initial).abs() <= 1e-4 * ball.mass());
            ball.set_radius(resized);
            prop_assert_eq!(ball.radius(), resized);
            prop_assert!((ball.mass() - PI * resized * resized).abs() <= 1e-4 * ball.mass());
        }
    }
}
