//! Flight trail engine.
//!
//! A pure flight core (path, motion, trail, driver) wrapped by Bevy systems
//! that load assets, animate the vehicle and render the dashed trail.

pub mod assets;
pub mod core;
pub mod flight;
pub mod loading;
pub mod scene;
pub mod shaders;
pub mod systems;
