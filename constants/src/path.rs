/// Flight manifest loaded at startup, relative to the asset root.
pub const FLIGHT_MANIFEST_PATH: &str = "flight/default.flight.json";

/// Extension registered for flight manifests.
pub const FLIGHT_MANIFEST_EXTENSION: &str = "flight.json";

pub const TERRAIN_MODEL_PATH: &str = "models/terrain.glb";
pub const VEHICLE_MODEL_PATH: &str = "models/aircraft.glb";

pub const TRAIL_SHADER_PATH: &str = "shaders/trail.wgsl";
