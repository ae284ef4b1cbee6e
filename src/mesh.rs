// mesh.rs - Triangle mesh generation for axis-aligned prisms

use crate::block::Block;
use crate::types::{Color, Point3, TextureId, Tiling};
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use static_assertions::const_assert_eq;

// ============================================================================
// VERTEX FORMAT
// ============================================================================

/// Interleaved vertex, ready for raw upload to a vertex buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    pub color: [f32; 4],
    pub normal: [f32; 3],
}

// The interleaved layout is part of the renderer contract.
const_assert_eq!(std::mem::size_of::<MeshVertex>(), 48);

pub const VERTS_PER_BLOCK: usize = 36;

/// Face normals in emission order: bottom, top, left, right, back, front.
const NORMALS: [[f32; 3]; 6] = [
    [0.0, 0.0, -1.0],
    [0.0, 0.0, 1.0],
    [-1.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, -1.0, 0.0],
];

// ============================================================================
// PRISM GENERATION
// ============================================================================

/// Triangle soup for one block, in the block's local space (origin at the
/// smallest corner).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<MeshVertex>,
}

impl Mesh {
    /// Axis-aligned prism: 6 faces of 2 triangles each, clockwise winding.
    /// Local axes map x to width, y to depth, z to height (Z-up).
    ///
    /// With tiling factors the texture repeats with the prism's size
    /// (`ux = u*x` repeats across a width-run, `vz = v*z` up a wall);
    /// without them every face stretches the whole texture once.
    pub fn generate(
        width: f32,
        height: f32,
        depth: f32,
        color: Color,
        tiling: Option<Tiling>,
    ) -> Mesh {
        let (x, y, z) = (width, depth, height);
        let (ux, uy, vy, vz) = match tiling {
            Some(t) => (t.u * x, t.u * y, t.v * y, t.v * z),
            None => (1.0, 1.0, 1.0, 1.0),
        };

        // Corner positions and UVs per face, two clockwise triangles each.
        let faces: [[[f32; 5]; 6]; 6] = [
            // BOTTOM
            [
                [0.0, 0.0, 0.0, 0.0, 0.0],
                [0.0, y, 0.0, 0.0, vy],
                [x, y, 0.0, ux, vy],
                [0.0, 0.0, 0.0, 0.0, 0.0],
                [x, y, 0.0, ux, vy],
                [x, 0.0, 0.0, ux, 0.0],
            ],
            // TOP
            [
                [0.0, 0.0, z, ux, 0.0],
                [x, y, z, 0.0, vy],
                [0.0, y, z, ux, vy],
                [0.0, 0.0, z, ux, 0.0],
                [x, 0.0, z, 0.0, 0.0],
                [x, y, z, 0.0, vy],
            ],
            // LEFT
            [
                [0.0, y, z, 0.0, vz],
                [0.0, y, 0.0, 0.0, 0.0],
                [0.0, 0.0, z, uy, vz],
                [0.0, y, 0.0, 0.0, 0.0],
                [0.0, 0.0, 0.0, uy, 0.0],
                [0.0, 0.0, z, uy, vz],
            ],
            // RIGHT
            [
                [x, 0.0, z, 0.0, vz],
                [x, y, 0.0, uy, 0.0],
                [x, y, z, uy, vz],
                [x, 0.0, z, 0.0, vz],
                [x, 0.0, 0.0, 0.0, 0.0],
                [x, y, 0.0, uy, 0.0],
            ],
            // BACK
            [
                [0.0, y, z, 0.0, vz],
                [x, y, z, ux, vz],
                [0.0, y, 0.0, 0.0, 0.0],
                [x, y, z, ux, vz],
                [x, y, 0.0, ux, 0.0],
                [0.0, y, 0.0, 0.0, 0.0],
            ],
            // FRONT
            [
                [0.0, 0.0, 0.0, 0.0, vz],
                [x, 0.0, z, ux, 0.0],
                [0.0, 0.0, z, 0.0, 0.0],
                [0.0, 0.0, 0.0, 0.0, vz],
                [x, 0.0, 0.0, ux, vz],
                [x, 0.0, z, ux, 0.0],
            ],
        ];

        let rgba: [f32; 4] = color.into();
        let mut vertices = Vec::with_capacity(VERTS_PER_BLOCK);
        for (face, corners) in faces.iter().enumerate() {
            for corner in corners {
                vertices.push(MeshVertex {
                    position: [corner[0], corner[1], corner[2]],
                    uv: [corner[3], corner[4]],
                    color: rgba,
                    normal: NORMALS[face],
                });
            }
        }

        Mesh { vertices }
    }

    /// Mesh for a block's extents and material.
    pub fn for_block(block: &Block) -> Mesh {
        Mesh::generate(
            block.width,
            block.height,
            block.depth,
            block.color,
            block.tiling,
        )
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Raw interleaved bytes for vertex buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

// ============================================================================
// RENDERER INTERFACE
// ============================================================================

/// Capability handed to renderer integrations. The compiler calls `submit`
/// once per final block; the consumer decides what a mesh becomes (GPU
/// buffers, scene-graph nodes, a file).
pub trait MeshConsumer {
    fn submit(&mut self, mesh: &Mesh, texture: TextureId, position: Point3);
}
