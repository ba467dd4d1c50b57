//! Flight motion core: path interpolation, pose sampling, trail building
//! and the per-frame animation driver.
//!
//! Everything here is plain data with no ECS access, so it can be driven
//! from bevy systems or exercised directly in tests.

/// Animation driver state machine owning loop progress.
///
/// Sequences pose sampling and trail admission once per frame.
pub mod driver;

/// Error taxonomy for path validation and trail allocation failures.
pub mod error;

/// Per-frame pose derivation from the path tangent.
///
/// Exposes both orientation conventions and the model pitch correction.
pub mod motion;

/// Catmull-Rom flight path over a fixed waypoint list.
pub mod path;

/// Distance-gated trail points and dashed line geometry.
pub mod trail;
