use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::render_settings::{TERRAIN_COLOUR, VEHICLE_COLOUR};

use crate::engine::assets::model_slot::{LoadStatus, ModelRole, ModelSlot, SlotOutcome};
use crate::engine::assets::placeholder::{default_terrain_mesh, vehicle_parts};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::flight_scene::FlightDriver;
use crate::engine::scene::shadows::apply_shadow_policy_on_ready;

/// In-flight glTF request attached to a role entity until it resolves.
#[derive(Component)]
pub struct ModelRequest {
    pub slot: ModelSlot,
    pub handle: Handle<Scene>,
}

impl ModelRequest {
    pub fn new(role: ModelRole, source: &str, asset_server: &AssetServer) -> Self {
        let handle = asset_server.load(GltfAssetLabel::Scene(0).from_asset(source.to_string()));
        info!("Loading {} model from {source}", role.label());
        Self {
            slot: ModelSlot::new(role, source),
            handle,
        }
    }
}

/// Maps the asset server's view of a handle onto a slot status.
pub fn load_status(state: Option<LoadState>) -> LoadStatus {
    match state {
        Some(LoadState::Loaded) => LoadStatus::Loaded,
        Some(LoadState::Failed(err)) => LoadStatus::Failed(err.to_string()),
        Some(_) => LoadStatus::InFlight,
        None => LoadStatus::Failed("asset is not tracked by the asset server".to_string()),
    }
}

/// Resolves pending model requests into either the loaded scene or a
/// placeholder. Does nothing once the session has been disposed.
pub fn resolve_model_requests(
    mut commands: Commands,
    mut requests: Query<(Entity, &mut ModelRequest)>,
    asset_server: Res<AssetServer>,
    mut driver: ResMut<FlightDriver>,
    mut loading_progress: ResMut<LoadingProgress>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if driver.is_disposed() {
        return;
    }

    for (entity, mut request) in &mut requests {
        let status = load_status(asset_server.get_load_state(&request.handle));
        let Some(outcome) = request.slot.observe(status) else {
            continue;
        };
        let role = request.slot.role();

        match &outcome {
            SlotOutcome::Loaded => {
                info!("✓ {} model loaded from {}", role.label(), request.slot.source());
                commands
                    .entity(entity)
                    .insert(SceneRoot(request.handle.clone()))
                    .observe(apply_shadow_policy_on_ready);
            }
            SlotOutcome::Placeholder { reason } => {
                warn!(
                    "{} model {} failed to load ({reason}), using placeholder",
                    role.label(),
                    request.slot.source()
                );
                spawn_placeholder(&mut commands, entity, role, &mut meshes, &mut materials);
            }
        }

        commands
            .entity(entity)
            .insert(outcome.mesh_source())
            .remove::<ModelRequest>();
        loading_progress.record_model(role, outcome.mesh_source());

        if role == ModelRole::Vehicle {
            driver.attach_vehicle();
        }
    }
}

/// Spawns the procedural model for `role` as children of `entity`, with the
/// role's shadow flags on every part.
pub fn spawn_placeholder(
    commands: &mut Commands,
    entity: Entity,
    role: ModelRole,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let policy = role.shadow_policy();
    let (colour, parts) = match role {
        ModelRole::Terrain => (
            TERRAIN_COLOUR,
            vec![("terrain placeholder", default_terrain_mesh(), Transform::IDENTITY)],
        ),
        ModelRole::Vehicle => (
            VEHICLE_COLOUR,
            vehicle_parts()
                .into_iter()
                .map(|part| (part.name, part.mesh, part.transform))
                .collect(),
        ),
    };

    let material = materials.add(StandardMaterial {
        base_color: colour,
        perceptual_roughness: 0.8,
        ..default()
    });

    commands.entity(entity).with_children(|parent| {
        for (name, mesh, transform) in parts {
            let mut part = parent.spawn((
                Name::new(name),
                Mesh3d(meshes.add(mesh)),
                MeshMaterial3d(material.clone()),
                transform,
            ));
            policy.apply(&mut part);
        }
    });
}
