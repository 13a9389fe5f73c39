//! Canvas 2D rendering
//!
//! Reads the session's bodies after each step; the simulation core never
//! depends on anything here.

pub mod canvas;

pub use canvas::CanvasRenderer;
