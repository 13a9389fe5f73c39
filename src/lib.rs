//! Bounce Box - disks bouncing around a rectangular arena
//!
//! Core modules:
//! - `sim`: Simulation core (bodies, store, step, session)
//! - `settings`: Data-driven simulation configuration
//! - `error`: Construction-time errors
//! - `renderer`: Canvas 2D drawing (wasm32 only)

pub mod error;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use settings::{Color, SimConfig};

/// Simulation configuration constants
pub mod consts {
    /// Default arena dimensions (pixels)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Maximum number of live bodies before the oldest is evicted
    pub const POPULATION_CAP: usize = 15;

    /// Fraction of normal velocity kept after a wall bounce
    pub const RESTITUTION: f32 = 0.8;

    /// Each velocity component is drawn from [-MAX_SPEED, MAX_SPEED)
    pub const MAX_SPEED: f32 = 4.0;

    /// Radius range for bodies added at runtime
    pub const SPAWN_RADIUS_MIN: f32 = 15.0;
    pub const SPAWN_RADIUS_MAX: f32 = 30.0;

    /// Reset layout: x = RESET_ORIGIN + RESET_STEP_X * i, y = RESET_ORIGIN + RESET_STEP_Y * (i % RESET_ROWS)
    pub const RESET_ORIGIN: f32 = 100.0;
    pub const RESET_STEP_X: f32 = 100.0;
    pub const RESET_STEP_Y: f32 = 50.0;
    pub const RESET_ROWS: usize = 3;

    /// Renderer defaults
    pub const TRAIL_FADE: f32 = 0.1;
    pub const GLOW_BLUR: f32 = 10.0;
}

/// Clamp `value` into `[lo, hi]` without panicking when the band is inverted.
///
/// An inverted band (body wider than the arena) collapses onto `lo`.
#[inline]
pub fn clamp_band(value: f32, lo: f32, hi: f32) -> f32 {
    value.min(hi).max(lo)
}
