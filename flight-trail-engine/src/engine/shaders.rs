/// Dashed, fading line material for the flight trail
use bevy::pbr::{MaterialPipeline, MaterialPipelineKey};
use bevy::render::mesh::MeshVertexBufferLayoutRef;
use bevy::{
    prelude::*,
    reflect::TypePath,
    render::render_resource::{
        AsBindGroup, RenderPipelineDescriptor, ShaderRef, SpecializedMeshPipelineError,
    },
};
use constants::path::TRAIL_SHADER_PATH;
use constants::render_settings::{TRAIL_COLOUR, TRAIL_DASH_SIZE, TRAIL_GAP_SIZE, TRAIL_TAIL_ALPHA};

use crate::engine::scene::trail_render::ATTRIBUTE_LINE_DISTANCE;

#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct TrailMaterial {
    #[uniform(0)]
    pub colour: LinearRgba,

    /// x: dash length, y: gap length, z: total trail length, w: tail alpha.
    #[uniform(1)]
    pub params: Vec4,

    pub alpha_mode: AlphaMode,
}

impl TrailMaterial {
    pub fn total_length(&self) -> f32 {
        self.params.z
    }

    /// The fade is relative to the whole trail, so it moves with every rebuild.
    pub fn set_total_length(&mut self, length: f32) {
        self.params.z = length.max(0.0);
    }
}

impl Default for TrailMaterial {
    fn default() -> Self {
        Self {
            colour: TRAIL_COLOUR,
            params: Vec4::new(TRAIL_DASH_SIZE, TRAIL_GAP_SIZE, 0.0, TRAIL_TAIL_ALPHA),
            alpha_mode: AlphaMode::Blend,
        }
    }
}

impl Material for TrailMaterial {
    fn vertex_shader() -> ShaderRef {
        TRAIL_SHADER_PATH.into()
    }

    fn fragment_shader() -> ShaderRef {
        TRAIL_SHADER_PATH.into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        self.alpha_mode
    }

    fn specialize(
        _pipeline: &MaterialPipeline<Self>,
        descriptor: &mut RenderPipelineDescriptor,
        layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        let vertex_layout = layout.0.get_layout(&[
            Mesh::ATTRIBUTE_POSITION.at_shader_location(0),
            ATTRIBUTE_LINE_DISTANCE.at_shader_location(1),
        ])?;
        descriptor.vertex.buffers = vec![vertex_layout];
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_length_is_never_negative() {
        let mut material = TrailMaterial::default();
        material.set_total_length(12.5);
        assert_eq!(material.total_length(), 12.5);
        material.set_total_length(-1.0);
        assert_eq!(material.total_length(), 0.0);
        assert_eq!(material.params.x, TRAIL_DASH_SIZE);
    }
}
