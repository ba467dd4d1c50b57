use bevy::prelude::*;

use crate::engine::assets::model_slot::{MeshSource, ModelRole};

#[derive(Resource, Default, Debug)]
pub struct LoadingProgress {
    pub manifest_loaded: bool,
    /// Set when the built-in flight replaced a missing or invalid manifest.
    pub manifest_fallback: bool,
    pub terrain: Option<MeshSource>,
    pub vehicle: Option<MeshSource>,
}

impl LoadingProgress {
    pub fn record_model(&mut self, role: ModelRole, source: MeshSource) {
        match role {
            ModelRole::Terrain => self.terrain = Some(source),
            ModelRole::Vehicle => self.vehicle = Some(source),
        }
    }

    pub fn models_resolved(&self) -> bool {
        self.terrain.is_some() && self.vehicle.is_some()
    }
}
