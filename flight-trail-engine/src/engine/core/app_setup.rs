use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::path::FLIGHT_MANIFEST_EXTENSION;

// Crate engine modules
use crate::engine::assets::flight_manifest::FlightManifest;
use crate::engine::core::app_state::AppState;
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::manifest_loader::{ManifestLoader, load_manifest_system, start_loading};
use crate::engine::loading::model_loader::resolve_model_requests;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::flight_scene::{
    FlightDriver, spawn_camera, spawn_flight_scene, spawn_lighting, start_flight,
};
use crate::engine::scene::lifecycle::{DisposeFlight, dispose_flight, dispose_on_exit};
use crate::engine::scene::trail_render::sync_trail_mesh;
use crate::engine::scene::vehicle::advance_flight;
use crate::engine::shaders::TrailMaterial;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::hud::{hud_text_update_system, spawn_hud};

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers FlightManifest as a loadable asset type from *.flight.json files.
        .add_plugins(JsonAssetPlugin::<FlightManifest>::new(&[
            FLIGHT_MANIFEST_EXTENSION,
        ]))
        // The trail is unlit and never part of a shadow or depth prepass.
        .add_plugins(MaterialPlugin::<TrailMaterial> {
            prepass_enabled: false,
            shadows_enabled: false,
            ..default()
        });

    // Initialise resources early
    app.init_resource::<LoadingProgress>()
        .init_resource::<ManifestLoader>()
        .init_resource::<FlightDriver>()
        .add_event::<DisposeFlight>();

    // State-based system scheduling
    app.add_systems(Startup, (setup, start_loading, start_flight).chain())
        .add_systems(
            Update,
            load_manifest_system.run_if(in_state(AppState::Loading)),
        )
        .add_systems(OnEnter(AppState::Running), spawn_flight_scene);

    // Animation runs in every state so progress never waits on loading.
    app.add_systems(
        Update,
        (
            resolve_model_requests.run_if(in_state(AppState::Running)),
            advance_flight,
            sync_trail_mesh,
        )
            .chain(),
    );

    // Teardown runs last so an exit requested this frame still disposes.
    app.add_systems(Last, (dispose_on_exit, dispose_flight).chain());

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Update, hud_text_update_system);
    }

    app
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands) {
    spawn_lighting(&mut commands);
    spawn_camera(&mut commands);

    #[cfg(not(target_arch = "wasm32"))]
    {
        spawn_hud(&mut commands);
    }
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
