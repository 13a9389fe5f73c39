//! Collision detection and response
//!
//! Wall reflection with restitution, and equal-mass elastic collisions between
//! pairs of disks.

use glam::Vec2;

use super::body::{Arena, Body};
use crate::clamp_band;

/// Which walls a body touched during reflection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHits {
    /// Left or right wall
    pub side: bool,
    pub bottom: bool,
    pub top: bool,
}

impl WallHits {
    pub fn any(&self) -> bool {
        self.side || self.bottom || self.top
    }
}

/// Reflect a body off the arena walls.
///
/// Touching a wall negates the normal velocity component, scales it by the
/// body's restitution and clamps the center back inside. Side walls are checked
/// first, then bottom, then top.
pub fn reflect_walls(body: &mut Body, arena: &Arena) -> WallHits {
    let r = body.radius;
    let mut hits = WallHits::default();

    if body.pos.x - r <= 0.0 || body.pos.x + r >= arena.width {
        body.vel.x = -body.vel.x * body.restitution;
        body.pos.x = clamp_band(body.pos.x, r, arena.width - r);
        hits.side = true;
    }

    if body.pos.y + r >= arena.height {
        body.vel.y = -body.vel.y * body.restitution;
        body.pos.y = arena.height - r;
        hits.bottom = true;
    }

    if body.pos.y - r <= 0.0 {
        body.vel.y = -body.vel.y * body.restitution;
        body.pos.y = r;
        hits.top = true;
    }

    hits
}

/// Clamp a body's center into `[r, W - r] x [r, H - r]` without touching velocity
pub fn contain(body: &mut Body, arena: &Arena) {
    let r = body.radius;
    body.pos.x = clamp_band(body.pos.x, r, arena.width - r);
    body.pos.y = clamp_band(body.pos.y, r, arena.height - r);
}

/// A resolved contact between two bodies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit vector from the first body's center toward the second's
    pub normal: Vec2,
    /// Distance each body was pushed along the normal
    pub correction: f32,
}

/// Angle of the line of centers, from `a` toward `b`.
///
/// Coincident centers have no defined direction; they are separated along +x.
#[inline]
fn collision_angle(delta: Vec2) -> f32 {
    if delta == Vec2::ZERO {
        0.0
    } else {
        delta.y.atan2(delta.x)
    }
}

/// Resolve a possible collision between two bodies.
///
/// Overlapping bodies swap the velocity components along their line of centers
/// (tangential components are kept) and are pushed apart by half the overlap
/// each, leaving them exactly touching.
pub fn resolve_pair(a: &mut Body, b: &mut Body) -> Option<Contact> {
    let delta = b.pos - a.pos;
    let distance = delta.length();
    let reach = a.radius + b.radius;

    if distance >= reach {
        return None;
    }

    let normal = Vec2::from_angle(collision_angle(delta));
    let tangent = normal.perp();

    // Rotate into the collision frame
    let (a_n, a_t) = (a.vel.dot(normal), a.vel.dot(tangent));
    let (b_n, b_t) = (b.vel.dot(normal), b.vel.dot(tangent));

    // Swap normal components, rotate back
    a.vel = normal * b_n + tangent * a_t;
    b.vel = normal * a_n + tangent * b_t;

    let correction = (reach - distance) / 2.0;
    a.pos -= normal * correction;
    b.pos += normal * correction;

    Some(Contact { normal, correction })
}

/// Resolve every overlapping pair `(i, j)`, `i < j`, sequentially in slice order.
///
/// A body caught in several overlaps is corrected once per pair. Returns the
/// number of contacts resolved.
pub fn resolve_collisions(bodies: &mut [Body]) -> usize {
    let mut contacts = 0;
    for i in 0..bodies.len() {
        let (head, tail) = bodies.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            if let Some(contact) = resolve_pair(a, b) {
                log::trace!(
                    "Contact {} <-> {}: normal ({:.3}, {:.3}), push {:.3}",
                    a.id,
                    b.id,
                    contact.normal.x,
                    contact.normal.y,
                    contact.correction
                );
                contacts += 1;
            }
        }
    }
    contacts
}
