use bevy::math::{Mat3, Quat, Vec3};
use constants::flight::{DEGENERATE_EPSILON, MODEL_PITCH_CORRECTION};
use serde::{Deserialize, Serialize};

use super::path::PathModel;

/// Local axis of the travel frame that points in the direction of travel.
pub const VEHICLE_FORWARD: Vec3 = Vec3::NEG_Z;
pub const WORLD_UP: Vec3 = Vec3::Y;

/// How the heading rotation onto the tangent is constructed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrientationMode {
    /// Look along the tangent with world-up as the up hint.
    #[default]
    LookAt,
    /// Rotate world-up onto the tangent about their common normal, then
    /// twist about the tangent until the frame's up faces world-up.
    AxisAngle,
}

/// Orientation convention plus the fixed pitch that maps the model's
/// authored nose onto [`VEHICLE_FORWARD`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientationConfig {
    #[serde(default)]
    pub mode: OrientationMode,
    /// Radians about the model's local X, applied before the heading.
    #[serde(default = "default_model_pitch")]
    pub model_pitch: f32,
}

fn default_model_pitch() -> f32 {
    MODEL_PITCH_CORRECTION
}

impl OrientationConfig {
    pub fn look_at() -> Self {
        Self {
            mode: OrientationMode::LookAt,
            model_pitch: MODEL_PITCH_CORRECTION,
        }
    }

    pub fn axis_angle() -> Self {
        Self {
            mode: OrientationMode::AxisAngle,
            model_pitch: MODEL_PITCH_CORRECTION,
        }
    }

    pub fn with_model_pitch(mut self, radians: f32) -> Self {
        self.model_pitch = radians;
        self
    }

    pub fn model_correction(&self) -> Quat {
        Quat::from_rotation_x(self.model_pitch)
    }

    /// Model-space axis that ends up along the tangent.
    pub fn model_nose(&self) -> Vec3 {
        self.model_correction().inverse() * VEHICLE_FORWARD
    }

    /// Model-space axis that ends up facing world-up.
    pub fn model_up(&self) -> Vec3 {
        self.model_correction().inverse() * WORLD_UP
    }
}

impl Default for OrientationConfig {
    fn default() -> Self {
        Self::look_at()
    }
}

/// Position and orientation of the vehicle for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    /// Travel frame: [`VEHICLE_FORWARD`] along the tangent, +Y toward world-up.
    pub heading: Quat,
    /// `heading` with the model correction applied; what the vehicle renders with.
    pub orientation: Quat,
}

impl Pose {
    pub fn forward(&self) -> Vec3 {
        self.heading * VEHICLE_FORWARD
    }

    pub fn up(&self) -> Vec3 {
        self.heading * WORLD_UP
    }
}

/// Samples poses along a [`PathModel`], carrying the last valid tangent and
/// heading across frames so degenerate samples never yield NaN.
#[derive(Debug, Clone)]
pub struct MotionSampler {
    config: OrientationConfig,
    last_tangent: Option<Vec3>,
    last_heading: Quat,
}

impl MotionSampler {
    pub fn new(config: OrientationConfig) -> Self {
        Self {
            config,
            last_tangent: None,
            last_heading: Quat::IDENTITY,
        }
    }

    pub fn config(&self) -> OrientationConfig {
        self.config
    }

    pub fn sample(&mut self, path: &PathModel, t: f32) -> Pose {
        let position = path.position_at(t);

        let tangent = path.tangent_at(t);
        let tangent = if tangent == Vec3::ZERO {
            self.last_tangent
        } else {
            self.last_tangent = Some(tangent);
            Some(tangent)
        };

        if let Some(heading) = tangent.and_then(|tangent| heading(tangent, self.config.mode)) {
            self.last_heading = heading;
        }

        let orientation = (self.last_heading * self.config.model_correction()).normalize();
        Pose {
            position,
            heading: self.last_heading,
            orientation,
        }
    }

    /// Forgets carried state, e.g. when the path is replaced.
    pub fn reset(&mut self) {
        self.last_tangent = None;
        self.last_heading = Quat::IDENTITY;
    }
}

/// Rotation taking [`VEHICLE_FORWARD`] onto `tangent` with local +Y as close
/// to [`WORLD_UP`] as the tangent allows. `None` when the tangent is zero or
/// parallel to [`WORLD_UP`].
pub fn heading(tangent: Vec3, mode: OrientationMode) -> Option<Quat> {
    let tangent = tangent.try_normalize()?;
    if tangent.cross(WORLD_UP).length_squared() < DEGENERATE_EPSILON {
        return None;
    }

    let heading = match mode {
        OrientationMode::LookAt => look_rotation(tangent, WORLD_UP),
        OrientationMode::AxisAngle => {
            let axis = WORLD_UP.cross(tangent).normalize();
            let angle = WORLD_UP.dot(tangent).clamp(-1.0, 1.0).acos();
            let raw = Quat::from_axis_angle(axis, angle)
                * Quat::from_rotation_arc(VEHICLE_FORWARD, WORLD_UP);
            level_about(tangent, raw)
        }
    };

    let heading = heading.normalize();
    heading.is_finite().then_some(heading)
}

/// Full model orientation for `tangent`: the heading with the model
/// correction applied.
pub fn orient(tangent: Vec3, config: OrientationConfig) -> Option<Quat> {
    heading(tangent, config.mode).map(|heading| (heading * config.model_correction()).normalize())
}

/// Same basis `Transform::looking_to` builds: local -Z onto `direction`.
fn look_rotation(direction: Vec3, up: Vec3) -> Quat {
    let back = -direction;
    let right = up.cross(back).normalize();
    let up = back.cross(right);
    Quat::from_mat3(&Mat3::from_cols(right, up, back))
}

/// Twists `rotation` about `tangent` so its local +Y lines up with world-up
/// projected off the tangent. `tangent` stays fixed.
fn level_about(tangent: Vec3, rotation: Quat) -> Quat {
    let up = rotation * WORLD_UP;
    let target = (WORLD_UP - tangent * tangent.dot(WORLD_UP)).normalize();
    let roll = tangent.dot(up.cross(target)).atan2(up.dot(target));
    Quat::from_axis_angle(tangent, roll) * rotation
}
