//! Body entity and arena bounds

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::settings::Color;

/// Rectangular arena spanning `[0, width] x [0, height]`, y pointing down
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Result<Self> {
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(Error::InvalidArena { width, height });
        }
        Ok(Self { width, height })
    }

    /// Whether a body of this radius can sit inside the arena at all
    pub fn fits(&self, radius: f32) -> bool {
        radius * 2.0 <= self.width && radius * 2.0 <= self.height
    }

    /// Reject bodies that could never satisfy wall containment
    pub fn check_fits(&self, radius: f32) -> Result<()> {
        if self.fits(radius) {
            Ok(())
        } else {
            Err(Error::BodyTooLarge {
                radius,
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// A circular disk
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Body {
    /// Assigned by the store on insertion (0 until then)
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
    /// Fraction of normal velocity kept on a wall bounce
    pub restitution: f32,
}

impl Body {
    /// Create a body with an explicit velocity.
    ///
    /// Errors if the radius is not a positive finite number, restitution lies
    /// outside (0, 1], or position/velocity are not finite.
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, color: Color, restitution: f32) -> Result<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(Error::InvalidRadius(radius));
        }
        if !(restitution > 0.0 && restitution <= 1.0) {
            return Err(Error::InvalidRestitution(restitution));
        }
        if !pos.is_finite() {
            return Err(Error::NonFinite("position"));
        }
        if !vel.is_finite() {
            return Err(Error::NonFinite("velocity"));
        }
        Ok(Self {
            id: 0,
            pos,
            vel,
            radius,
            color,
            restitution,
        })
    }

    /// Create a body with a random velocity (see [`random_velocity`])
    pub fn spawn<R: Rng + ?Sized>(
        pos: Vec2,
        radius: f32,
        color: Color,
        restitution: f32,
        max_speed: f32,
        rng: &mut R,
    ) -> Result<Self> {
        Self::new(pos, random_velocity(rng, max_speed), radius, color, restitution)
    }

    /// Squared speed (proportional to kinetic energy for unit mass)
    #[inline]
    pub fn speed_squared(&self) -> f32 {
        self.vel.length_squared()
    }

    /// Advance one unit timestep
    #[inline]
    pub fn integrate(&mut self) {
        self.pos += self.vel;
    }
}

/// Velocity with each component drawn uniformly from `[-max_speed, max_speed)`.
/// A non-positive or non-finite speed yields zero velocity.
pub fn random_velocity<R: Rng + ?Sized>(rng: &mut R, max_speed: f32) -> Vec2 {
    if !max_speed.is_finite() || max_speed <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        rng.random_range(-max_speed..max_speed),
        rng.random_range(-max_speed..max_speed),
    )
}
