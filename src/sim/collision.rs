//! Narrow-phase collision detection
//!
//! Exact contact tests for ball pairs and for a ball against the container
//! wall. Pure functions: nothing here mutates a ball.

use glam::Vec2;

use super::ball::Ball;
use super::container::Container;

/// Result of a contact test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Whether the shapes overlap
    pub hit: bool,
    /// Unit contact normal (ball pairs: from A toward B; walls: outward from
    /// the container center)
    pub normal: Vec2,
    /// Overlap depth, >= 0 when hit
    pub penetration: f32,
}

impl Contact {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check overlap between two balls.
///
/// Exactly coincident centers have no usable normal and count as a miss.
pub fn ball_ball_contact(a: &Ball, b: &Ball) -> Contact {
    let delta = b.pos - a.pos;
    let dist_sq = delta.length_squared();
    let combined = a.radius() + b.radius();

    if dist_sq > 0.0 && dist_sq < combined * combined {
        let dist = dist_sq.sqrt();
        return Contact {
            hit: true,
            normal: delta / dist,
            penetration: combined - dist,
        };
    }

    Contact::miss()
}

/// Check whether a ball pokes through the container wall.
///
/// A ball whose angular position falls inside the gap passes through the
/// aperture untouched.
pub fn ball_container_contact(ball: &Ball, container: &Container) -> Contact {
    let delta = ball.pos - container.center();
    let dist = delta.length();
    let inner_radius = container.radius() - ball.radius();

    if dist <= inner_radius {
        return Contact::miss();
    }

    let angle = delta.y.atan2(delta.x);
    if container.angle_in_gap(angle) {
        return Contact::miss();
    }

    Contact {
        hit: true,
        normal: delta.normalize_or_zero(),
        penetration: dist - inner_radius,
    }
}
