use bevy::color::{Color, LinearRgba};

pub const TRAIL_COLOUR: LinearRgba = LinearRgba::new(1.0, 0.85, 0.3, 1.0);
pub const TRAIL_DASH_SIZE: f32 = 0.6;
pub const TRAIL_GAP_SIZE: f32 = 0.3;
/// Alpha at the oldest end of the trail; the head is fully opaque.
pub const TRAIL_TAIL_ALPHA: f32 = 0.05;

pub const TERRAIN_COLOUR: Color = Color::srgb(0.32, 0.45, 0.28);
pub const VEHICLE_COLOUR: Color = Color::srgb(0.85, 0.2, 0.15);

/// Side length of the placeholder terrain plane.
pub const TERRAIN_PLACEHOLDER_SIZE: f32 = 60.0;
/// Quads per side of the placeholder terrain plane.
pub const TERRAIN_PLACEHOLDER_RESOLUTION: u32 = 48;
/// Maximum vertical jitter of the placeholder terrain.
pub const TERRAIN_PLACEHOLDER_RELIEF: f32 = 0.6;
pub const TERRAIN_PLACEHOLDER_SEED: u64 = 0x5eed_7e44;

pub const VEHICLE_FUSELAGE_LENGTH: f32 = 2.0;
pub const VEHICLE_FUSELAGE_RADIUS: f32 = 0.35;
pub const VEHICLE_WINGSPAN: f32 = 2.4;

pub const CAMERA_OFFSET: [f32; 3] = [-28.0, 26.0, 34.0];
