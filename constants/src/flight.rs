use std::f32::consts::FRAC_PI_2;

/// Fraction of the full loop the aircraft advances per frame.
pub const PROGRESS_STEP: f32 = 0.0008;

/// Minimum straight-line travel (world units) before a new trail vertex is recorded.
pub const TRAIL_ADMISSION_THRESHOLD: f32 = 0.5;

/// Cap used by the `MostRecent` retention policy when a manifest does not name one.
pub const TRAIL_MAX_POINTS: usize = 4096;

/// Pitch about the model's local X that brings its authored nose onto local
/// -Z. The procedural placeholder is already authored nose-forward.
pub const MODEL_PITCH_CORRECTION: f32 = 0.0;

/// Pitch for models authored with the nose along +Y.
pub const NOSE_UP_PITCH_CORRECTION: f32 = -FRAC_PI_2;

/// Pitch for models authored with the nose along -Y.
pub const NOSE_DOWN_PITCH_CORRECTION: f32 = FRAC_PI_2;

/// Squared length below which a tangent or rotation axis counts as degenerate.
pub const DEGENERATE_EPSILON: f32 = 1.0e-8;

/// Knot spacing below which a Catmull-Rom interval is treated as coincident.
pub const KNOT_EPSILON: f32 = 1.0e-4;

/// Default flight altitude above the terrain origin.
pub const CRUISE_ALTITUDE: f32 = 6.0;
