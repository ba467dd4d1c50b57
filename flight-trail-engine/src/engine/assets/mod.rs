//! Externally sourced content: the flight manifest, glTF model slots and
//! the procedural placeholders used when a model cannot be loaded.

pub mod flight_manifest;
pub mod model_slot;
pub mod placeholder;
