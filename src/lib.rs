// lib.rs - Library exports for the labyrinth compiler
// Turns ASCII blueprints into placed blocks, prism meshes, and colliders

pub mod block;
pub mod blueprint;
pub mod builder;
pub mod error_handling;
pub mod export;
pub mod generator;
pub mod labyrinth;
pub mod merge;
pub mod mesh;
pub mod preview;
pub mod types;

// Re-export commonly used types
pub use block::{Block, BlockId, BlockKind, Collider, ColliderTag, WallSides};
pub use error_handling::{CompileError, Result};
pub use labyrinth::Labyrinth;
pub use mesh::{Mesh, MeshConsumer, MeshVertex};
pub use types::{Color, Point3, TextureCatalog, TextureId, Tiling};
