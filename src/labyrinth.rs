// labyrinth.rs - Assembled labyrinth: blocks, bounds, spawn data

use crate::block::{
    Block, BlockKind, Collider, FLOOR_HEIGHT, WALL_HEIGHT, WALL_LENGTH, WALL_THIN,
};
use crate::blueprint;
use crate::builder;
use crate::error_handling::{CompileError, Result};
use crate::merge;
use crate::mesh::{Mesh, MeshConsumer};
use crate::types::Point3;
use std::path::Path;

/// A compiled labyrinth: final blocks plus overall bounds and spawn data.
/// `width`/`depth`/`height` span the full bounding box, roof included.
#[derive(Debug, Clone)]
pub struct Labyrinth {
    pub blocks: Vec<Block>,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub start_pos: Option<Point3>,
    pub finish_pos: Option<Point3>,
    pub n_floors: usize,
    // Category views: indexes into `blocks`, disjoint by construction.
    walls: Vec<usize>,
    windows: Vec<usize>,
    floors: Vec<usize>,
    pillars: Vec<usize>,
}

impl Labyrinth {
    /// Compile a blueprint: parse, derive, merge, assemble.
    pub fn from_map_string(text: &str, debug: bool) -> Result<Labyrinth> {
        let blueprint = blueprint::parse(text)?;
        let derived = builder::derive(&blueprint, debug);
        let blocks = merge::merge(derived.blocks);

        let n_floors = blueprint.n_floors();
        let width = WALL_THIN + blueprint.width_units as f32 * (WALL_THIN + WALL_LENGTH);
        let depth = WALL_THIN + blueprint.depth_units as f32 * (WALL_THIN + WALL_LENGTH);
        let height = FLOOR_HEIGHT + n_floors as f32 * (FLOOR_HEIGHT + WALL_HEIGHT);

        let mut walls = Vec::new();
        let mut windows = Vec::new();
        let mut floors = Vec::new();
        let mut pillars = Vec::new();
        for (index, block) in blocks.iter().enumerate() {
            match block.kind {
                BlockKind::Wall(_) => walls.push(index),
                BlockKind::Window => windows.push(index),
                BlockKind::Floor { .. } => floors.push(index),
                BlockKind::Pillar => pillars.push(index),
            }
        }

        log::info!(
            "compiled labyrinth: {} block(s) over {} floor(s), bounds {}x{}x{}",
            blocks.len(),
            n_floors,
            width,
            depth,
            height
        );

        Ok(Labyrinth {
            blocks,
            width,
            height,
            depth,
            start_pos: derived.start_pos,
            finish_pos: derived.finish_pos,
            n_floors,
            walls,
            windows,
            floors,
            pillars,
        })
    }

    /// Compile a blueprint read from disk.
    pub fn from_map_file(path: impl AsRef<Path>, debug: bool) -> Result<Labyrinth> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CompileError::MapFile {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("read map file '{}' ({} bytes)", path.display(), content.len());
        Labyrinth::from_map_string(&content, debug)
    }

    pub fn walls(&self) -> impl Iterator<Item = &Block> {
        self.walls.iter().map(move |&index| &self.blocks[index])
    }

    pub fn windows(&self) -> impl Iterator<Item = &Block> {
        self.windows.iter().map(move |&index| &self.blocks[index])
    }

    pub fn floors(&self) -> impl Iterator<Item = &Block> {
        self.floors.iter().map(move |&index| &self.blocks[index])
    }

    pub fn pillars(&self) -> impl Iterator<Item = &Block> {
        self.pillars.iter().map(move |&index| &self.blocks[index])
    }

    /// One box collider per final block, in block order.
    pub fn colliders(&self) -> impl Iterator<Item = Collider> + '_ {
        self.blocks.iter().map(Block::collider)
    }

    /// Feed every final block's mesh to a renderer integration.
    pub fn submit_meshes(&self, consumer: &mut dyn MeshConsumer) {
        for block in &self.blocks {
            let mesh = Mesh::for_block(block);
            consumer.submit(&mesh, block.texture, block.position);
        }
        log::debug!("submitted {} mesh(es)", self.blocks.len());
    }

    /// Translation that puts the labyrinth's center at the origin.
    pub fn center_offset(&self) -> Point3 {
        Point3::new(-self.width / 2.0, -self.depth / 2.0, -self.height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TextureId, TEXTURE_GLASS, TEXTURE_WALL};

    const ROOM: &str = "+-+\n|.|\n+-+";
    const TOWER: &str = "+-+\n|S|\n+-+\n\n+_+\n|.|\n+!+\n\n+-+\n|F|\n+-+";

    struct CountingConsumer {
        submissions: Vec<(usize, TextureId, Point3)>,
    }

    impl MeshConsumer for CountingConsumer {
        fn submit(&mut self, mesh: &Mesh, texture: TextureId, position: Point3) {
            self.submissions.push((mesh.vertex_count(), texture, position));
        }
    }

    #[test]
    fn test_room_bounds_and_block_count() {
        let lab = Labyrinth::from_map_string(ROOM, false).unwrap();
        assert_eq!(lab.n_floors, 1);
        assert_eq!(lab.width, 7.0);
        assert_eq!(lab.depth, 7.0);
        assert_eq!(lab.height, 7.0);
        assert_eq!(lab.blocks.len(), 14);
    }

    #[test]
    fn test_category_views_partition_the_blocks() {
        let lab = Labyrinth::from_map_string(TOWER, false).unwrap();
        let total = lab.walls().count()
            + lab.windows().count()
            + lab.floors().count()
            + lab.pillars().count();
        assert_eq!(total, lab.blocks.len());

        assert!(lab.walls().all(|b| b.kind.is_wall()));
        assert!(lab.windows().all(|b| b.kind.is_window()));
        assert!(lab.floors().all(|b| b.kind.is_floor()));
        assert!(lab.pillars().all(|b| b.kind.is_pillar()));
        assert!(lab.windows().count() >= 2);
    }

    #[test]
    fn test_every_block_stays_under_the_roof_index() {
        let lab = Labyrinth::from_map_string(TOWER, false).unwrap();
        for block in &lab.blocks {
            assert!(block.floor_index <= lab.n_floors);
            if block.floor_index == lab.n_floors {
                assert!(matches!(block.kind, BlockKind::Floor { strictly_roof: true }));
            }
        }
    }

    #[test]
    fn test_tower_keeps_lowest_start_only() {
        // S sits on the ground story; the top-story F is above an occupied
        // cell, so the ceiling rule turns it into a plain floor.
        let lab = Labyrinth::from_map_string(TOWER, false).unwrap();
        assert_eq!(lab.start_pos, Some(Point3::new(3.5, 3.5, 1.0)));
        assert_eq!(lab.finish_pos, None);
        assert_eq!(lab.height, 1.0 + 3.0 * 6.0);
    }

    #[test]
    fn test_colliders_cover_every_block() {
        let lab = Labyrinth::from_map_string(ROOM, false).unwrap();
        let colliders: Vec<_> = lab.colliders().collect();
        assert_eq!(colliders.len(), lab.blocks.len());

        let grounds = colliders
            .iter()
            .filter(|c| c.tag == crate::block::ColliderTag::Ground)
            .count();
        assert_eq!(grounds, lab.floors().count());
    }

    #[test]
    fn test_submit_meshes_feeds_every_block_once() {
        let lab = Labyrinth::from_map_string("+_+\n|.|\n+-+", false).unwrap();
        let mut consumer = CountingConsumer {
            submissions: Vec::new(),
        };
        lab.submit_meshes(&mut consumer);

        assert_eq!(consumer.submissions.len(), lab.blocks.len());
        for ((verts, texture, position), block) in
            consumer.submissions.iter().zip(lab.blocks.iter())
        {
            assert_eq!(*verts, crate::mesh::VERTS_PER_BLOCK);
            assert_eq!(*texture, block.texture);
            assert_eq!(*position, block.position);
        }

        let glass = consumer
            .submissions
            .iter()
            .filter(|(_, texture, _)| *texture == TEXTURE_GLASS)
            .count();
        assert_eq!(glass, 1);
        assert!(consumer
            .submissions
            .iter()
            .any(|(_, texture, _)| *texture == TEXTURE_WALL));
    }

    #[test]
    fn test_empty_blueprint_compiles_to_a_shell() {
        let lab = Labyrinth::from_map_string("", false).unwrap();
        assert!(lab.blocks.is_empty());
        assert_eq!(lab.n_floors, 0);
        assert_eq!((lab.width, lab.depth, lab.height), (1.0, 1.0, 1.0));
        assert!(lab.start_pos.is_none() && lab.finish_pos.is_none());
    }

    #[test]
    fn test_center_offset_halves_the_bounds() {
        let lab = Labyrinth::from_map_string(ROOM, false).unwrap();
        assert_eq!(lab.center_offset(), Point3::new(-3.5, -3.5, -3.5));
    }

    #[test]
    fn test_from_map_file_round_trip() {
        let path = std::env::temp_dir().join("labyrinth_compiler_room_test.map");
        std::fs::write(&path, ROOM).unwrap();
        let lab = Labyrinth::from_map_file(&path, false).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(lab.blocks.len(), 14);
    }

    #[test]
    fn test_missing_map_file_reports_path() {
        let err = Labyrinth::from_map_file("/definitely/not/here.map", false).unwrap_err();
        match err {
            CompileError::MapFile { path, .. } => {
                assert_eq!(path, std::path::PathBuf::from("/definitely/not/here.map"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_mismatched_floors_fail_compilation() {
        let err = Labyrinth::from_map_string("+-+\n|.|\n+-+\n\n+-+-+\n|.|.|\n+-+-+", false)
            .unwrap_err();
        assert!(matches!(err, CompileError::DimensionMismatch { .. }));
    }
}
