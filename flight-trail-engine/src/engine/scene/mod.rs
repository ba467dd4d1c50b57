//! Flight scene: entities, per-frame animation and teardown.

/// Driver resource, marker components and scene spawning.
pub mod flight_scene;

/// Session teardown on host request or app exit.
pub mod lifecycle;

pub mod shadows;

/// Trail mesh construction and upload.
pub mod trail_render;

pub mod vehicle;
