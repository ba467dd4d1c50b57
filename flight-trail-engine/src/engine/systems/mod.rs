//! Runtime overlays.

/// Native-only text overlay with frame rate and flight progress.
pub mod hud;
