/// Scene graph for one flight session: lighting, camera and role entities
use bevy::prelude::*;
use constants::render_settings::CAMERA_OFFSET;

use crate::engine::assets::flight_manifest::FlightManifest;
use crate::engine::assets::model_slot::ModelRole;
use crate::engine::flight::driver::AnimationDriver;
use crate::engine::loading::model_loader::ModelRequest;
use crate::engine::scene::trail_render::spawn_trail;
use crate::engine::shaders::TrailMaterial;

/// The session's single animation driver.
#[derive(Resource, Default, Debug, Deref, DerefMut)]
pub struct FlightDriver(pub AnimationDriver);

/// Top-level entity owned by the flight session. Despawned on dispose.
#[derive(Component)]
pub struct FlightNode;

#[derive(Component)]
pub struct VehicleNode;

#[derive(Component)]
pub struct TerrainNode;

pub fn start_flight(mut driver: ResMut<FlightDriver>) {
    if driver.start() {
        info!("Flight driver started");
    }
}

pub fn spawn_lighting(commands: &mut Commands) {
    commands.insert_resource(AmbientLight {
        brightness: 250.0,
        ..default()
    });
    commands.spawn((
        Name::new("sun"),
        DirectionalLight {
            shadows_enabled: true,
            illuminance: 8_000.0,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::ZYX,
            0.0,
            1.0,
            -std::f32::consts::FRAC_PI_4,
        )),
    ));
}

pub fn spawn_camera(commands: &mut Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(Vec3::from_array(CAMERA_OFFSET))
            .looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Spawns both model roles and the trail once the manifest is known.
pub fn spawn_flight_scene(
    mut commands: Commands,
    manifest: Res<FlightManifest>,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut trail_materials: ResMut<Assets<TrailMaterial>>,
) {
    let terrain = ModelRole::Terrain;
    commands.spawn((
        Name::new(terrain.label()),
        FlightNode,
        TerrainNode,
        terrain,
        terrain.shadow_policy(),
        Transform::default(),
        Visibility::default(),
        ModelRequest::new(terrain, manifest.model_source(terrain), &asset_server),
    ));

    let vehicle = ModelRole::Vehicle;
    commands.spawn((
        Name::new(vehicle.label()),
        FlightNode,
        VehicleNode,
        vehicle,
        vehicle.shadow_policy(),
        Transform::default(),
        Visibility::default(),
        ModelRequest::new(vehicle, manifest.model_source(vehicle), &asset_server),
    ));

    spawn_trail(&mut commands, &mut meshes, &mut trail_materials);
}
