//! Rotating circular container with a single escape gap
//!
//! The wall is a circle around `center`. The gap is an angular window that
//! starts at the current rotation angle and spans `gap_degrees`:
//! - gap start: rotation angle (radians, in [0, 2π))
//! - gap end: gap start + gap width (NOT wrapped, so renderers can draw the
//!   open arc directly)

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::{angle_in_range, normalize_angle, polar_to_cartesian};

/// The shared container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Container {
    center: Vec2,
    radius: f32,
    /// Angular width of the gap (degrees, 0..=360)
    gap_degrees: f32,
    /// Rotation rate (degrees per second)
    rotation_speed: f32,
    /// Current rotation (radians, normalized to [0, 2π))
    angle: f32,
}

impl Container {
    pub fn new(center: Vec2, radius: f32, gap_degrees: f32, rotation_speed: f32) -> Self {
        Self {
            center,
            radius,
            gap_degrees,
            rotation_speed,
            angle: 0.0,
        }
    }

    /// Rotate by `rotation_speed * dt` degrees
    pub fn advance(&mut self, dt: f32) {
        let delta = (self.rotation_speed * dt).to_radians();
        self.angle = normalize_angle(self.angle + delta);
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f32) {
        debug_assert!(radius > 0.0, "container radius must be positive");
        self.radius = radius;
    }

    #[inline]
    pub fn gap_degrees(&self) -> f32 {
        self.gap_degrees
    }

    pub fn set_gap_degrees(&mut self, gap_degrees: f32) {
        debug_assert!(
            (0.0..=360.0).contains(&gap_degrees),
            "gap width must be within 0..=360 degrees"
        );
        self.gap_degrees = gap_degrees;
    }

    #[inline]
    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed
    }

    /// Current rotation angle (radians)
    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Return to the initial orientation
    pub fn reset_rotation(&mut self) {
        self.angle = 0.0;
    }

    /// Gap start angle (radians)
    #[inline]
    pub fn gap_start(&self) -> f32 {
        self.angle
    }

    /// Gap end angle (radians, may exceed 2π)
    #[inline]
    pub fn gap_end(&self) -> f32 {
        self.angle + self.gap_degrees.to_radians()
    }

    /// Check if an angle (radians, any range) falls inside the gap
    pub fn angle_in_gap(&self, angle: f32) -> bool {
        if self.gap_degrees <= 0.0 {
            // Closed container
            false
        } else if self.gap_degrees >= 360.0 {
            // No wall left
            true
        } else {
            angle_in_range(angle, self.gap_start(), self.gap_end())
        }
    }

    /// Angle of a point around the container center
    #[inline]
    pub fn angle_of(&self, point: Vec2) -> f32 {
        let delta = point - self.center;
        delta.y.atan2(delta.x)
    }

    /// Check if a point lies in the gap's angular window
    pub fn point_in_gap(&self, point: Vec2) -> bool {
        self.angle_in_gap(self.angle_of(point))
    }

    /// Check if a point is strictly inside the container circle
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.center.distance(point) < self.radius
    }

    /// The solid part of the wall as (start, end) angles, end > start.
    ///
    /// Runs from the gap end all the way around to the gap start.
    pub fn wall_arc(&self) -> (f32, f32) {
        (self.gap_end(), self.gap_start() + TAU)
    }

    /// Sample points along the solid wall (for rendering or debugging)
    pub fn sample_wall(&self, num_points: usize) -> Vec<Vec2> {
        let (start, end) = self.wall_arc();
        let span = end - start;

        (0..num_points)
            .map(|i| {
                let t = i as f32 / (num_points - 1).max(1) as f32;
                self.center + polar_to_cartesian(self.radius, start + t * span)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn container(gap_degrees: f32) -> Container {
        Container::new(Vec2::new(512.0, 384.0), 300.0, gap_degrees, 36.0)
    }

    #[test]
    fn test_advance_rotates_at_fixed_rate() {
        let mut c = container(45.0);
        c.advance(1.0);
        assert!((c.angle() - 36.0_f32.to_radians()).abs() < 1e-5);
        assert!((c.gap_end() - 81.0_f32.to_radians()).abs() < 1e-5);
    }

    #[test]
    fn test_advance_wraps_full_turn() {
        let mut c = container(45.0);
        // 11 seconds = 396 degrees
        for _ in 0..11 {
            c.advance(1.0);
        }
        assert!(c.angle() >= 0.0 && c.angle() < TAU);
        assert!((c.angle() - 36.0_f32.to_radians()).abs() < 1e-4);
    }

    #[test]
    fn test_gap_end_not_wrapped() {
        let mut c = container(20.0);
        // Rotate to 350 degrees
        c.advance(350.0 / 36.0);
        assert!(c.gap_end() > TAU);
        assert!(c.angle_in_gap(355.0_f32.to_radians()));
        assert!(c.angle_in_gap(5.0_f32.to_radians()));
        assert!(!c.angle_in_gap(PI));
    }

    #[test]
    fn test_zero_gap_is_closed() {
        let c = container(0.0);
        assert!(!c.angle_in_gap(0.0));
        assert!(!c.angle_in_gap(PI));
    }

    #[test]
    fn test_full_gap_is_open() {
        let c = container(360.0);
        assert!(c.angle_in_gap(0.0));
        assert!(c.angle_in_gap(PI));
    }

    #[test]
    fn test_point_queries() {
        let c = container(90.0);
        // Gap covers 0..90 degrees, y grows downward
        let in_gap = c.center() + polar_to_cartesian(100.0, PI / 4.0);
        let on_wall = c.center() + polar_to_cartesian(100.0, PI);
        assert!(c.point_in_gap(in_gap));
        assert!(!c.point_in_gap(on_wall));
        assert!(c.contains_point(on_wall));
        assert!(!c.contains_point(c.center() + Vec2::new(301.0, 0.0)));
    }

    #[test]
    fn test_wall_arc_complements_gap() {
        let c = container(45.0);
        let (start, end) = c.wall_arc();
        assert!((end - start - (TAU - 45.0_f32.to_radians())).abs() < 1e-5);

        let points = c.sample_wall(16);
        assert_eq!(points.len(), 16);
        for p in &points {
            assert!((p.distance(c.center()) - 300.0).abs() < 1e-2);
        }
        // Endpoints touch the gap edges, interior points are on the wall
        for p in &points[1..points.len() - 1] {
            assert!(!c.point_in_gap(*p));
        }
    }
}
