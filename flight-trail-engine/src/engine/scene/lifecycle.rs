use bevy::prelude::*;

use crate::engine::scene::flight_scene::{FlightDriver, FlightNode};
use crate::engine::scene::trail_render::TrailNode;

/// Host request to tear the flight session down.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct DisposeFlight;

pub fn dispose_on_exit(mut exits: EventReader<AppExit>, mut dispose: EventWriter<DisposeFlight>) {
    if exits.read().next().is_some() {
        dispose.write(DisposeFlight);
    }
}

/// Stops the driver, then despawns every session entity and frees the trail
/// mesh. Repeated requests are no-ops.
pub fn dispose_flight(
    mut requests: EventReader<DisposeFlight>,
    mut driver: ResMut<FlightDriver>,
    nodes: Query<Entity, With<FlightNode>>,
    trails: Query<&Mesh3d, With<TrailNode>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut commands: Commands,
) {
    if requests.read().count() == 0 {
        return;
    }
    if !driver.dispose() {
        return;
    }

    for mesh in &trails {
        meshes.remove(&mesh.0);
    }
    let mut despawned = 0;
    for entity in &nodes {
        commands.entity(entity).despawn();
        despawned += 1;
    }
    info!("Flight disposed, {despawned} scene nodes removed");
}
