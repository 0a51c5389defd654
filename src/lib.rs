//! Marble Bounce - balls under gravity in a rotating, gapped circular container
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, broad/narrow phase, response, lifecycle)
//! - `settings`: Tunable parameters and their validation
//!
//! Vector math is `glam::Vec2` plus the angle helpers below.

pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};
pub use sim::{Ball, Color, Container, Simulation, Snapshot, StepStats};

use glam::Vec2;
use std::f32::consts::TAU;

/// Simulation configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;

    /// Simulation bounds (balls fully outside are removed)
    pub const WORLD_WIDTH: f32 = 1024.0;
    pub const WORLD_HEIGHT: f32 = 768.0;

    /// Container defaults
    pub const CONTAINER_RADIUS: f32 = 300.0;
    /// 12.5% of the circumference
    pub const CONTAINER_GAP_DEGREES: f32 = 0.125 * 360.0;
    /// One full turn every 10 seconds
    pub const CONTAINER_ROTATION_SPEED: f32 = 36.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 7.5;
    /// Radius the broad-phase grid is tuned around (25px diameter)
    pub const NOMINAL_BALL_RADIUS: f32 = 12.5;
    pub const BALL_MIN_SPEED: f32 = 50.0;
    pub const BALL_MAX_SPEED: f32 = 200.0;

    /// Broad-phase cell edge: two nominal ball diameters
    pub const GRID_CELL_SIZE: f32 = 2.0 * (2.0 * NOMINAL_BALL_RADIUS);
    /// Overlapping balls must land in the same or adjacent cells, so no
    /// diameter may exceed one cell edge
    pub const MAX_BALL_RADIUS: f32 = GRID_CELL_SIZE / 2.0;

    /// 9.8 m/s² at 100 px/m
    pub const GRAVITY: f32 = 980.0;
    /// Perfectly elastic
    pub const RESTITUTION: f32 = 1.0;
    /// Replacement balls per removed ball
    pub const RESPAWN_RATIO: f64 = 2.0;
}

/// Normalize angle to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to exactly TAU
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Check whether `angle` lies in the closed range `[start, end]`.
///
/// All three angles are wrapped to [0, 2π) first. When the wrapped start is
/// past the wrapped end the range crosses 0 and membership becomes
/// `angle >= start || angle <= end`.
pub fn angle_in_range(angle: f32, start: f32, end: f32) -> bool {
    let angle = normalize_angle(angle);
    let start = normalize_angle(start);
    let end = normalize_angle(end);

    if start <= end {
        angle >= start && angle <= end
    } else {
        angle >= start || angle <= end
    }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}

/// Rotate a vector counter-clockwise by `angle` radians
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(v)
}
