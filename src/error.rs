//! Error types
//!
//! The tick loop is total; everything here is raised while building arenas,
//! bodies, configs or sessions.

use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Arena width or height is not a positive finite number.
    #[error("invalid arena {width}x{height}: dimensions must be finite and > 0")]
    InvalidArena { width: f32, height: f32 },

    #[error("invalid radius {0}: must be finite and > 0")]
    InvalidRadius(f32),

    #[error("invalid restitution {0}: must lie in (0, 1]")]
    InvalidRestitution(f32),

    /// Position or velocity contains NaN/inf.
    #[error("non-finite {0}")]
    NonFinite(&'static str),

    /// A body whose diameter exceeds the arena on some axis can never be contained.
    #[error("body of radius {radius} does not fit a {width}x{height} arena")]
    BodyTooLarge { radius: f32, width: f32, height: f32 },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid color {0:?}: expected #RRGGBB")]
    InvalidColor(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_is_informative() {
        let msg = Error::InvalidRadius(-1.0).to_string();
        assert!(msg.contains("radius"));
        assert!(msg.contains("-1"));

        let msg = Error::BodyTooLarge {
            radius: 40.0,
            width: 50.0,
            height: 600.0,
        }
        .to_string();
        assert!(msg.contains("50x600"));
    }
}
