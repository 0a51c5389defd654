//! Collision response
//!
//! Impulse-style velocity updates along the contact normal, followed by a
//! positional push that removes the overlap. Tangential velocity is never
//! touched (no friction).

use glam::Vec2;

use super::ball::Ball;
use super::collision::Contact;

/// Reflect velocity off a surface with restitution `r`.
///
/// v' = v - (1 + r)(v·n)n. With r = 1 this is the mirror reflection
/// v - 2(v·n)n.
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2, restitution: f32) -> Vec2 {
    velocity - (1.0 + restitution) * velocity.dot(normal) * normal
}

/// Resolve a contact between two balls. Returns false if it was skipped.
///
/// The normal must point from `a` toward `b`. Pairs already separating along
/// the normal are left alone.
pub fn resolve_ball_ball(a: &mut Ball, b: &mut Ball, contact: &Contact, restitution: f32) -> bool {
    if !contact.hit {
        return false;
    }

    let n = contact.normal;
    if (b.vel - a.vel).dot(n) >= 0.0 {
        return false;
    }

    let m1 = a.mass();
    let m2 = b.mass();
    let total = m1 + m2;

    let v1n = a.vel.dot(n);
    let v2n = b.vel.dot(n);

    // 1-D collision along the normal. At r = 1 this reduces to
    // v1n' = ((m1 - m2) v1n + 2 m2 v2n) / (m1 + m2)
    let momentum = m1 * v1n + m2 * v2n;
    let v1n_new = (momentum + m2 * restitution * (v2n - v1n)) / total;
    let v2n_new = (momentum + m1 * restitution * (v1n - v2n)) / total;

    a.vel += n * (v1n_new - v1n);
    b.vel += n * (v2n_new - v2n);

    // Heavier balls move less
    let sep_a = contact.penetration * m2 / total;
    let sep_b = contact.penetration * m1 / total;
    a.pos -= n * sep_a;
    b.pos += n * sep_b;

    true
}

/// Resolve a contact with the container wall. Returns false if it was skipped.
///
/// The normal points outward; balls already heading inward are left alone.
pub fn resolve_ball_wall(ball: &mut Ball, contact: &Contact, restitution: f32) -> bool {
    if !contact.hit {
        return false;
    }

    let n = contact.normal;
    if ball.vel.dot(n) < 0.0 {
        return false;
    }

    ball.vel = reflect_velocity(ball.vel, n, restitution);
    ball.pos -= n * contact.penetration;

    true
}
