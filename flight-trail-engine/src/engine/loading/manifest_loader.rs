use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::path::FLIGHT_MANIFEST_PATH;

use crate::engine::assets::flight_manifest::FlightManifest;
use crate::engine::core::app_state::AppState;
use crate::engine::flight::driver::AnimationDriver;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::flight_scene::FlightDriver;

#[derive(Resource, Default)]
pub struct ManifestLoader {
    handle: Option<Handle<FlightManifest>>,
}

// Start the loading process
pub fn start_loading(mut manifest_loader: ResMut<ManifestLoader>, asset_server: Res<AssetServer>) {
    manifest_loader.handle = Some(asset_server.load(FLIGHT_MANIFEST_PATH));
}

/// Waits for the manifest, configures the driver from it and moves to
/// `Running`. A manifest that fails to load is replaced by the default.
pub fn load_manifest_system(
    mut loading_progress: ResMut<LoadingProgress>,
    manifest_loader: Res<ManifestLoader>,
    mut driver: ResMut<FlightDriver>,
    mut commands: Commands,
    mut next_state: ResMut<NextState<AppState>>,
    asset_server: Res<AssetServer>,
    manifests: Res<Assets<FlightManifest>>,
) {
    if loading_progress.manifest_loaded {
        return;
    }
    let Some(handle) = &manifest_loader.handle else {
        return;
    };

    let manifest = match asset_server.get_load_state(handle) {
        Some(LoadState::Loaded) => match manifests.get(handle) {
            Some(manifest) => {
                info!("✓ Flight manifest loaded from {FLIGHT_MANIFEST_PATH}");
                manifest.clone()
            }
            None => return,
        },
        Some(LoadState::Failed(err)) => {
            warn!("Flight manifest {FLIGHT_MANIFEST_PATH} failed to load ({err}), using built-in flight");
            loading_progress.manifest_fallback = true;
            FlightManifest::default()
        }
        Some(_) => return,
        None => {
            warn!("Flight manifest {FLIGHT_MANIFEST_PATH} is not tracked, using built-in flight");
            loading_progress.manifest_fallback = true;
            FlightManifest::default()
        }
    };

    if !install_manifest(&manifest, &mut driver) {
        loading_progress.manifest_fallback = true;
    }
    commands.insert_resource(manifest);
    loading_progress.manifest_loaded = true;

    info!("→ Transitioning to Running state");
    next_state.set(AppState::Running);
}

/// Applies the manifest's settings and path to the driver. An invalid path
/// is replaced by the built-in loop; returns false when that happened.
pub fn install_manifest(manifest: &FlightManifest, driver: &mut AnimationDriver) -> bool {
    driver.apply_config(manifest.driver_config());

    let (path, used_manifest) = match manifest.build_path() {
        Ok(path) => (Ok(path), true),
        Err(err) => {
            warn!("Flight path rejected ({err}), using built-in loop");
            (FlightManifest::default().build_path(), false)
        }
    };

    match path {
        Ok(path) => {
            info!(
                "Flight path ready: {} waypoints, {:.1} units per loop",
                path.waypoints().len(),
                path.approximate_length(512)
            );
            driver.set_path(path);
        }
        Err(err) => error!("Built-in flight path rejected: {err}"),
    }
    used_manifest
}
