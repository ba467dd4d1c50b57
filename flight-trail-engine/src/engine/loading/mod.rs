//! Asynchronous resolution of the flight manifest and the glTF models.
//!
//! Animation never waits on anything here: the driver ticks from the first
//! frame and picks up the path and vehicle as they arrive.

/// Flight manifest loading with fallback to the built-in loop.
pub mod manifest_loader;

/// Per-role glTF requests resolved into loaded scenes or placeholders.
pub mod model_loader;

pub mod progress;
