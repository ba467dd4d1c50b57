/// Procedural stand-ins for models that failed to load
use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use constants::render_settings::{
    TERRAIN_PLACEHOLDER_RELIEF, TERRAIN_PLACEHOLDER_RESOLUTION, TERRAIN_PLACEHOLDER_SEED,
    TERRAIN_PLACEHOLDER_SIZE, VEHICLE_FUSELAGE_LENGTH, VEHICLE_FUSELAGE_RADIUS, VEHICLE_WINGSPAN,
};

use crate::engine::flight::motion::VEHICLE_FORWARD;

/// Indexed triangle data, kept apart from [`Mesh`] so it can be inspected.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderGeometry {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl PlaceholderGeometry {
    pub fn into_mesh(self) -> Mesh {
        let mut mesh = Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::default(),
        );
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, self.positions);
        mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, self.normals);
        mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, self.uvs);
        mesh.insert_indices(Indices::U32(self.indices));
        mesh
    }
}

/// One child mesh of a placeholder model.
#[derive(Debug, Clone)]
pub struct PlaceholderPart {
    pub name: &'static str,
    pub mesh: Mesh,
    pub transform: Transform,
}

/// Square heightfield centred on the origin with seeded jitter.
/// The same seed always gives the same surface.
pub fn terrain_geometry(size: f32, resolution: u32, relief: f32, seed: u64) -> PlaceholderGeometry {
    let cells = resolution.max(1) as usize;
    let row = cells + 1;
    let cell_size = size / cells as f32;
    let half = size * 0.5;

    let mut rng = fastrand::Rng::with_seed(seed);
    let heights: Vec<f32> = (0..row * row)
        .map(|_| (rng.f32() - 0.5) * relief)
        .collect();
    let height = |x: usize, z: usize| heights[z * row + x];

    let mut positions = Vec::with_capacity(row * row);
    let mut normals = Vec::with_capacity(row * row);
    let mut uvs = Vec::with_capacity(row * row);
    for z in 0..row {
        for x in 0..row {
            positions.push([
                -half + x as f32 * cell_size,
                height(x, z),
                -half + z as f32 * cell_size,
            ]);

            // Central differences, one-sided at the border.
            let (x0, x1) = (x.saturating_sub(1), (x + 1).min(cells));
            let (z0, z1) = (z.saturating_sub(1), (z + 1).min(cells));
            let dx = (height(x1, z) - height(x0, z)) / ((x1 - x0) as f32 * cell_size);
            let dz = (height(x, z1) - height(x, z0)) / ((z1 - z0) as f32 * cell_size);
            normals.push(Vec3::new(-dx, 1.0, -dz).normalize().to_array());

            uvs.push([x as f32 / cells as f32, z as f32 / cells as f32]);
        }
    }

    let mut indices = Vec::with_capacity(cells * cells * 6);
    for z in 0..cells {
        for x in 0..cells {
            let a = (z * row + x) as u32;
            let b = a + 1;
            let c = a + row as u32;
            let d = c + 1;
            // Counter-clockwise seen from above.
            indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }

    PlaceholderGeometry {
        positions,
        normals,
        uvs,
        indices,
    }
}

pub fn default_terrain_mesh() -> Mesh {
    terrain_geometry(
        TERRAIN_PLACEHOLDER_SIZE,
        TERRAIN_PLACEHOLDER_RESOLUTION,
        TERRAIN_PLACEHOLDER_RELIEF,
        TERRAIN_PLACEHOLDER_SEED,
    )
    .into_mesh()
}

/// Simple aircraft: a cone fuselage whose tip points along the vehicle's
/// forward axis, a wing and a tail fin.
pub fn vehicle_parts() -> Vec<PlaceholderPart> {
    let nose = Quat::from_rotation_arc(Vec3::Y, VEHICLE_FORWARD);
    let fuselage = Mesh::from(Cone::new(VEHICLE_FUSELAGE_RADIUS, VEHICLE_FUSELAGE_LENGTH))
        .rotated_by(nose);

    let wing = Mesh::from(Cuboid::new(
        VEHICLE_WINGSPAN,
        0.08,
        VEHICLE_FUSELAGE_LENGTH * 0.3,
    ));
    let fin = Mesh::from(Cuboid::new(
        0.06,
        VEHICLE_FUSELAGE_RADIUS * 1.6,
        VEHICLE_FUSELAGE_LENGTH * 0.2,
    ));
    let tail = -VEHICLE_FORWARD * VEHICLE_FUSELAGE_LENGTH * 0.4;

    vec![
        PlaceholderPart {
            name: "fuselage",
            mesh: fuselage,
            transform: Transform::IDENTITY,
        },
        PlaceholderPart {
            name: "wing",
            mesh: wing,
            transform: Transform::from_translation(-VEHICLE_FORWARD * 0.1),
        },
        PlaceholderPart {
            name: "fin",
            mesh: fin,
            transform: Transform::from_translation(
                tail + Vec3::Y * VEHICLE_FUSELAGE_RADIUS * 0.8,
            ),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terrain_is_deterministic_per_seed() {
        let first = terrain_geometry(10.0, 8, 0.5, 7);
        let second = terrain_geometry(10.0, 8, 0.5, 7);
        assert_eq!(first, second);

        let other = terrain_geometry(10.0, 8, 0.5, 8);
        assert_ne!(first.positions, other.positions);
    }

    #[test]
    fn terrain_grid_has_expected_shape() {
        let geometry = terrain_geometry(10.0, 4, 0.5, 1);
        assert_eq!(geometry.positions.len(), 25);
        assert_eq!(geometry.normals.len(), 25);
        assert_eq!(geometry.uvs.len(), 25);
        assert_eq!(geometry.indices.len(), 4 * 4 * 6);
        assert!(geometry.indices.iter().all(|&i| (i as usize) < 25));

        assert_eq!(geometry.positions[0][0], -5.0);
        assert_eq!(geometry.positions[24][2], 5.0);
        assert!(geometry.positions.iter().all(|p| p[1].abs() <= 0.25));
    }

    #[test]
    fn terrain_normals_point_up() {
        let geometry = terrain_geometry(20.0, 16, 0.6, 3);
        for normal in &geometry.normals {
            let normal = Vec3::from_array(*normal);
            assert!((normal.length() - 1.0).abs() < 1e-4);
            assert!(normal.y > 0.8);
        }
    }

    #[test]
    fn terrain_triangles_face_up() {
        let geometry = terrain_geometry(10.0, 4, 0.0, 1);
        for triangle in geometry.indices.chunks_exact(3) {
            let [a, b, c] =
                [0, 1, 2].map(|i| Vec3::from_array(geometry.positions[triangle[i] as usize]));
            assert!((b - a).cross(c - a).y > 0.0);
        }
    }

    #[test]
    fn vehicle_nose_points_forward() {
        let parts = vehicle_parts();
        assert_eq!(parts.len(), 3);

        let fuselage = &parts[0];
        let positions = fuselage
            .mesh
            .attribute(Mesh::ATTRIBUTE_POSITION)
            .and_then(|values| values.as_float3())
            .unwrap();
        let tip = positions
            .iter()
            .map(|p| Vec3::from_array(*p))
            .max_by(|a, b| a.dot(VEHICLE_FORWARD).total_cmp(&b.dot(VEHICLE_FORWARD)))
            .unwrap();
        assert!((tip.dot(VEHICLE_FORWARD) - VEHICLE_FUSELAGE_LENGTH * 0.5).abs() < 1e-4);
    }

    #[test]
    fn vehicle_parts_are_deterministic() {
        let first = vehicle_parts();
        let second = vehicle_parts();
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.transform, b.transform);
            assert_eq!(
                a.mesh.attribute(Mesh::ATTRIBUTE_POSITION).and_then(|v| v.as_float3()),
                b.mesh.attribute(Mesh::ATTRIBUTE_POSITION).and_then(|v| v.as_float3()),
            );
        }
    }
}
