//! Simulation configuration
//!
//! Read as JSON from LocalStorage on the web, or from a file natively.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

/// Display color of a body. Serialized as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const BLUE: Color = Color::rgb(0x00, 0x66, 0xFF);
    pub const RED: Color = Color::rgb(0xFF, 0x00, 0x00);
    pub const GREEN: Color = Color::rgb(0x00, 0xFF, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` hex string (leading `#` optional, case-insensitive)
    pub fn from_hex(s: &str) -> Result<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| Error::InvalidColor(s.to_string()))
        };
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// CSS color string, e.g. `#0066FF`
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Color::from_hex(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> String {
        c.to_hex()
    }
}

/// Default palette used for seeding and click-spawned bodies
pub const DEFAULT_PALETTE: [Color; 4] = [Color::WHITE, Color::BLUE, Color::RED, Color::GREEN];

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Population ===
    /// Oldest bodies are evicted once the store grows past this
    pub population_cap: usize,

    // === Physics ===
    /// Wall bounce coefficient applied to every body
    pub restitution: f32,
    /// Velocity components are drawn from [-max_speed, max_speed)
    pub max_speed: f32,

    // === Spawning ===
    pub spawn_radius_min: f32,
    pub spawn_radius_max: f32,
    pub palette: Vec<Color>,
    /// RNG seed; `None` draws one from entropy
    pub seed: Option<u64>,

    // === Rendering ===
    /// Alpha of the black overlay drawn each frame (lower = longer trails)
    pub trail_fade: f32,
    /// Shadow blur of the body outline glow
    pub glow_blur: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            population_cap: POPULATION_CAP,

            restitution: RESTITUTION,
            max_speed: MAX_SPEED,

            spawn_radius_min: SPAWN_RADIUS_MIN,
            spawn_radius_max: SPAWN_RADIUS_MAX,
            palette: DEFAULT_PALETTE.to_vec(),
            seed: None,

            trail_fade: TRAIL_FADE,
            glow_blur: GLOW_BLUR,
        }
    }
}

impl SimConfig {
    /// Check every field, rejecting configs the simulation could not honor
    pub fn validate(&self) -> Result<()> {
        if !(self.arena_width.is_finite() && self.arena_width > 0.0)
            || !(self.arena_height.is_finite() && self.arena_height > 0.0)
        {
            return Err(Error::InvalidArena {
                width: self.arena_width,
                height: self.arena_height,
            });
        }
        if self.population_cap == 0 {
            return Err(Error::InvalidConfig("population_cap must be >= 1".into()));
        }
        if !(self.restitution > 0.0 && self.restitution <= 1.0) {
            return Err(Error::InvalidRestitution(self.restitution));
        }
        if !self.max_speed.is_finite() || self.max_speed < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "max_speed must be finite and >= 0, got {}",
                self.max_speed
            )));
        }
        if !(self.spawn_radius_min.is_finite() && self.spawn_radius_min > 0.0) {
            return Err(Error::InvalidRadius(self.spawn_radius_min));
        }
        if !self.spawn_radius_max.is_finite() || self.spawn_radius_max <= self.spawn_radius_min {
            return Err(Error::InvalidConfig(format!(
                "spawn radius range [{}, {}) is empty",
                self.spawn_radius_min, self.spawn_radius_max
            )));
        }
        if self.spawn_radius_max * 2.0 > self.arena_width.min(self.arena_height) {
            return Err(Error::BodyTooLarge {
                radius: self.spawn_radius_max,
                width: self.arena_width,
                height: self.arena_height,
            });
        }
        if self.palette.is_empty() {
            return Err(Error::InvalidConfig("palette must not be empty".into()));
        }
        if !(0.0..=1.0).contains(&self.trail_fade) {
            return Err(Error::InvalidConfig(format!(
                "trail_fade must lie in [0, 1], got {}",
                self.trail_fade
            )));
        }
        if !self.glow_blur.is_finite() || self.glow_blur < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "glow_blur must be finite and >= 0, got {}",
                self.glow_blur
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "bounce_box_config";

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored config: {}", e),
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }
}
