use bevy::asset::RenderAssetUsages;
use bevy::pbr::{NotShadowCaster, NotShadowReceiver};
use bevy::prelude::*;
use bevy::render::mesh::{MeshVertexAttribute, PrimitiveTopology};
use bevy::render::render_resource::VertexFormat;

use crate::engine::flight::trail::TrailGeometry;
use crate::engine::scene::flight_scene::{FlightDriver, FlightNode};
use crate::engine::shaders::TrailMaterial;

/// Cumulative arc length per trail vertex, read by the dash pattern.
pub const ATTRIBUTE_LINE_DISTANCE: MeshVertexAttribute =
    MeshVertexAttribute::new("LineDistance", 988_540_917, VertexFormat::Float32);

#[derive(Component)]
pub struct TrailNode;

/// Line strip over the trail geometry. Strips need two vertices, so shorter
/// trails produce a collapsed segment that stays hidden.
pub fn trail_mesh(geometry: &TrailGeometry) -> Mesh {
    let (positions, distances) = if geometry.vertex_count() >= 2 {
        (geometry.position_attribute(), geometry.line_distances.clone())
    } else {
        let anchor = geometry.position_attribute().first().copied().unwrap_or([0.0; 3]);
        (vec![anchor; 2], vec![0.0; 2])
    };

    let mut mesh = Mesh::new(PrimitiveTopology::LineStrip, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(ATTRIBUTE_LINE_DISTANCE, distances);
    mesh
}

pub fn trail_visibility(geometry: &TrailGeometry) -> Visibility {
    if geometry.vertex_count() >= 2 {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}

pub fn spawn_trail(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<TrailMaterial>,
) {
    let empty = TrailGeometry::default();
    commands.spawn((
        Name::new("trail"),
        FlightNode,
        TrailNode,
        Mesh3d(meshes.add(trail_mesh(&empty))),
        MeshMaterial3d(materials.add(TrailMaterial::default())),
        Transform::IDENTITY,
        trail_visibility(&empty),
        NotShadowCaster,
        NotShadowReceiver,
    ));
}

/// Uploads the trail geometry whenever the builder's revision changes.
pub fn sync_trail_mesh(
    driver: Res<FlightDriver>,
    mut trails: Query<
        (&Mesh3d, &MeshMaterial3d<TrailMaterial>, &mut Visibility),
        With<TrailNode>,
    >,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<TrailMaterial>>,
    mut synced_revision: Local<Option<u64>>,
) {
    let trail = driver.trail();
    if *synced_revision == Some(trail.revision()) {
        return;
    }

    let geometry = trail.geometry();
    for (mesh, material, mut visibility) in &mut trails {
        if let Some(mesh) = meshes.get_mut(&mesh.0) {
            *mesh = trail_mesh(geometry);
        }
        if let Some(material) = materials.get_mut(&material.0) {
            material.set_total_length(geometry.total_length());
        }
        visibility.set_if_neq(trail_visibility(geometry));
    }
    *synced_revision = Some(trail.revision());
}
