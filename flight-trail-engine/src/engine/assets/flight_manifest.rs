use bevy::prelude::*;
use constants::flight::{CRUISE_ALTITUDE, PROGRESS_STEP, TRAIL_ADMISSION_THRESHOLD};
use constants::path::{TERRAIN_MODEL_PATH, VEHICLE_MODEL_PATH};
use serde::{Deserialize, Serialize};

use crate::engine::assets::model_slot::ModelRole;
use crate::engine::flight::driver::DriverConfig;
use crate::engine::flight::error::FlightError;
use crate::engine::flight::motion::OrientationConfig;
use crate::engine::flight::path::{CurveKind, PathModel};
use crate::engine::flight::trail::TrailRetention;

/// Flight description loaded from a `*.flight.json` file.
///
/// Every field except `waypoints` may be omitted. An empty or missing
/// waypoint list selects the built-in loop.
#[derive(Asset, Debug, Clone, PartialEq, Serialize, Deserialize, TypePath, Resource)]
pub struct FlightManifest {
    #[serde(default)]
    pub waypoints: Vec<[f32; 3]>,
    #[serde(default = "default_closed")]
    pub closed: bool,
    #[serde(default)]
    pub curve: CurveKind,
    #[serde(default = "default_terrain_model")]
    pub terrain_model: String,
    #[serde(default = "default_vehicle_model")]
    pub vehicle_model: String,
    #[serde(default = "default_progress_step")]
    pub progress_step: f32,
    #[serde(default = "default_admission_threshold")]
    pub admission_threshold: f32,
    #[serde(default)]
    pub retention: TrailRetention,
    #[serde(default)]
    pub orientation: OrientationConfig,
}

fn default_closed() -> bool {
    true
}

fn default_terrain_model() -> String {
    TERRAIN_MODEL_PATH.to_string()
}

fn default_vehicle_model() -> String {
    VEHICLE_MODEL_PATH.to_string()
}

fn default_progress_step() -> f32 {
    PROGRESS_STEP
}

fn default_admission_threshold() -> f32 {
    TRAIL_ADMISSION_THRESHOLD
}

/// Eight-point loop over the placeholder terrain.
pub fn default_waypoints() -> Vec<[f32; 3]> {
    let h = CRUISE_ALTITUDE;
    vec![
        [-18.0, h, 0.0],
        [-12.0, h + 2.0, -12.0],
        [0.0, h + 3.0, -16.0],
        [12.0, h + 1.0, -12.0],
        [18.0, h - 1.0, 0.0],
        [12.0, h, 12.0],
        [0.0, h + 2.0, 16.0],
        [-12.0, h + 1.0, 12.0],
    ]
}

impl FlightManifest {
    /// Builds the path, substituting the built-in loop when no waypoints
    /// were given.
    pub fn build_path(&self) -> Result<PathModel, FlightError> {
        let waypoints = if self.waypoints.is_empty() {
            default_waypoints()
        } else {
            self.waypoints.clone()
        };
        PathModel::new(
            waypoints.into_iter().map(Vec3::from_array).collect(),
            self.closed,
            self.curve,
        )
    }

    pub fn driver_config(&self) -> DriverConfig {
        DriverConfig {
            progress_step: self.progress_step,
            admission_threshold: self.admission_threshold,
            retention: self.retention,
            orientation: self.orientation,
        }
    }

    pub fn model_source(&self, role: ModelRole) -> &str {
        match role {
            ModelRole::Terrain => &self.terrain_model,
            ModelRole::Vehicle => &self.vehicle_model,
        }
    }
}

impl Default for FlightManifest {
    fn default() -> Self {
        Self {
            waypoints: default_waypoints(),
            closed: default_closed(),
            curve: CurveKind::default(),
            terrain_model: default_terrain_model(),
            vehicle_model: default_vehicle_model(),
            progress_step: default_progress_step(),
            admission_threshold: default_admission_threshold(),
            retention: TrailRetention::default(),
            orientation: OrientationConfig::default(),
        }
    }
}
