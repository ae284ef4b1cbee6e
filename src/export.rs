// export.rs - Self-contained JSON scene document for external engines

use crate::block::{Block, Collider};
use crate::error_handling::{CompileError, Result};
use crate::labyrinth::Labyrinth;
use crate::mesh::{Mesh, MeshConsumer, MeshVertex};
use crate::types::{Point3, TextureCatalog, TextureId};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything a renderer or physics engine needs to rebuild the scene
/// without running the compiler again: bounds, spawn points, and per-block
/// geometry with baked vertices and colliders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneExport {
    pub width: f32,
    pub depth: f32,
    pub height: f32,
    pub n_floors: usize,
    pub start_pos: Option<Point3>,
    pub finish_pos: Option<Point3>,
    pub blocks: Vec<BlockExport>,
}

/// One final block with its resolved texture path and baked mesh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockExport {
    #[serde(flatten)]
    pub block: Block,
    pub texture_path: Option<String>,
    pub collider: Collider,
    pub vertices: Vec<MeshVertex>,
}

/// Collects mesh submissions in block order and pairs each with its source
/// block to build the export records.
struct SceneCollector<'a> {
    catalog: &'a TextureCatalog,
    source: &'a [Block],
    cursor: usize,
    blocks: Vec<BlockExport>,
}

impl MeshConsumer for SceneCollector<'_> {
    fn submit(&mut self, mesh: &Mesh, texture: TextureId, _position: Point3) {
        let block = &self.source[self.cursor];
        self.cursor += 1;
        self.blocks.push(BlockExport {
            block: block.clone(),
            texture_path: self.catalog.path(texture).map(str::to_string),
            collider: block.collider(),
            vertices: mesh.vertices.clone(),
        });
    }
}

impl SceneExport {
    pub fn from_labyrinth(labyrinth: &Labyrinth, catalog: &TextureCatalog) -> SceneExport {
        let mut collector = SceneCollector {
            catalog,
            source: &labyrinth.blocks,
            cursor: 0,
            blocks: Vec::with_capacity(labyrinth.blocks.len()),
        };
        labyrinth.submit_meshes(&mut collector);

        SceneExport {
            width: labyrinth.width,
            depth: labyrinth.depth,
            height: labyrinth.height,
            n_floors: labyrinth.n_floors,
            start_pos: labyrinth.start_pos,
            finish_pos: labyrinth.finish_pos,
            blocks: collector.blocks,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| CompileError::OutputFile {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!(
            "wrote scene export '{}' ({} block(s))",
            path.display(),
            self.blocks.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::VERTS_PER_BLOCK;

    const ROOM: &str = "+-+\n|.|\n+-+";

    fn export_room() -> SceneExport {
        let lab = Labyrinth::from_map_string(ROOM, false).unwrap();
        SceneExport::from_labyrinth(&lab, &TextureCatalog::with_defaults())
    }

    #[test]
    fn test_export_carries_bounds_and_all_blocks() {
        let export = export_room();
        assert_eq!((export.width, export.depth, export.height), (7.0, 7.0, 7.0));
        assert_eq!(export.n_floors, 1);
        assert_eq!(export.blocks.len(), 14);
        for record in &export.blocks {
            assert_eq!(record.vertices.len(), VERTS_PER_BLOCK);
            assert_eq!(record.collider, record.block.collider());
        }
    }

    #[test]
    fn test_export_resolves_texture_paths() {
        let lab = Labyrinth::from_map_string("+_+\n|.|\n+-+", false).unwrap();
        let export = SceneExport::from_labyrinth(&lab, &TextureCatalog::with_defaults());

        let glass: Vec<_> = export
            .blocks
            .iter()
            .filter(|r| r.block.kind.is_window())
            .collect();
        assert_eq!(glass.len(), 1);
        assert_eq!(glass[0].texture_path.as_deref(), Some("textures/glass.png"));
        assert!(export
            .blocks
            .iter()
            .filter(|r| !r.block.kind.is_window())
            .all(|r| r.texture_path.as_deref() == Some("textures/wall.png")));
    }

    #[test]
    fn test_json_uses_snake_case_kind_tags() {
        let export = export_room();
        let value: serde_json::Value = serde_json::from_str(&export.to_json().unwrap()).unwrap();

        let blocks = value["blocks"].as_array().unwrap();
        assert_eq!(blocks.len(), 14);
        let kinds: Vec<&str> = blocks
            .iter()
            .map(|b| b["kind"].as_str().unwrap())
            .collect();
        assert!(kinds.contains(&"wall"));
        assert!(kinds.contains(&"pillar"));
        assert!(kinds.contains(&"floor"));

        // Wall records carry their facing flags inline.
        let wall = blocks.iter().find(|b| b["kind"] == "wall").unwrap();
        assert!(wall["east_inside"].is_boolean());
        assert_eq!(wall["collider"]["tag"], "wall");

        let floor = blocks.iter().find(|b| b["kind"] == "floor").unwrap();
        assert!(floor["strictly_roof"].is_boolean());
        assert_eq!(floor["collider"]["tag"], "ground");
        assert_eq!(floor["vertices"].as_array().unwrap().len(), VERTS_PER_BLOCK);
    }

    #[test]
    fn test_json_round_trips() {
        let export = export_room();
        let back: SceneExport = serde_json::from_str(&export.to_json().unwrap()).unwrap();
        assert_eq!(back.blocks.len(), export.blocks.len());
        assert_eq!(back.start_pos, export.start_pos);
        assert_eq!(back.blocks[3].block, export.blocks[3].block);
    }

    #[test]
    fn test_write_json_creates_the_file() {
        let export = export_room();
        let path = std::env::temp_dir().join("labyrinth_compiler_export_test.json");
        export.write_json(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(text.contains("\"blocks\""));
    }
}
