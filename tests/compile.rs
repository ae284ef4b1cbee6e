// compile.rs - End-to-end compilation through the public API

use std::collections::HashSet;

use labyrinth_compiler::export::SceneExport;
use labyrinth_compiler::generator;
use labyrinth_compiler::mesh::VERTS_PER_BLOCK;
use labyrinth_compiler::{Labyrinth, Mesh, MeshConsumer, Point3, TextureCatalog, TextureId};

#[test]
fn test_demo_map_compiles_from_disk() {
    let lab = Labyrinth::from_map_file("maps/demo.map", false).unwrap();
    assert_eq!(lab.n_floors, 1);
    assert_eq!((lab.width, lab.depth, lab.height), (25.0, 19.0, 7.0));
    assert_eq!(lab.start_pos, Some(Point3::new(3.5, 3.5, 1.0)));
    assert_eq!(lab.finish_pos, Some(Point3::new(19.0, 13.0, 0.0)));
    assert_eq!(lab.windows().count(), 1);
    assert!(lab.walls().count() > 0);
    assert!(lab.pillars().count() > 0);
}

#[test]
fn test_tower_map_spans_three_stories() {
    let lab = Labyrinth::from_map_file("maps/tower.map", false).unwrap();
    assert_eq!(lab.n_floors, 3);
    assert_eq!((lab.width, lab.depth, lab.height), (13.0, 13.0, 19.0));
    assert_eq!(lab.windows().count(), 3);
    assert_eq!(lab.start_pos, Some(Point3::new(3.5, 3.5, 1.0)));
    // The goal sits on the top story, above an open cell of the middle one.
    assert_eq!(lab.finish_pos, Some(Point3::new(7.0, 7.0, 12.0)));
}

#[test]
fn test_all_blocks_fit_inside_the_bounds() {
    for map in ["maps/demo.map", "maps/tower.map"] {
        let lab = Labyrinth::from_map_file(map, false).unwrap();
        for block in &lab.blocks {
            assert!(block.position.x >= 0.0, "{map}: {:?}", block.id);
            assert!(block.position.y >= 0.0, "{map}: {:?}", block.id);
            assert!(block.position.z >= 0.0, "{map}: {:?}", block.id);
            assert!(block.position.x + block.width <= lab.width, "{map}: {:?}", block.id);
            assert!(block.position.y + block.depth <= lab.depth, "{map}: {:?}", block.id);
            assert!(block.position.z + block.height <= lab.height, "{map}: {:?}", block.id);
        }
    }
}

#[test]
fn test_block_ids_stay_unique_after_merging() {
    let lab = Labyrinth::from_map_file("maps/demo.map", false).unwrap();
    let ids: HashSet<_> = lab.blocks.iter().map(|b| b.id).collect();
    assert_eq!(ids.len(), lab.blocks.len());
}

#[test]
fn test_compilation_is_deterministic() {
    let a = Labyrinth::from_map_file("maps/demo.map", false).unwrap();
    let b = Labyrinth::from_map_file("maps/demo.map", false).unwrap();
    assert_eq!(a.blocks, b.blocks);
}

struct VertexCounter {
    total: usize,
}

impl MeshConsumer for VertexCounter {
    fn submit(&mut self, mesh: &Mesh, _texture: TextureId, _position: Point3) {
        self.total += mesh.vertex_count();
    }
}

#[test]
fn test_mesh_submission_covers_every_block() {
    let lab = Labyrinth::from_map_file("maps/demo.map", false).unwrap();
    let mut counter = VertexCounter { total: 0 };
    lab.submit_meshes(&mut counter);
    assert_eq!(counter.total, lab.blocks.len() * VERTS_PER_BLOCK);
}

#[test]
fn test_generated_maze_exports_scene_json() {
    let text = generator::generate(6, 5, Some(77));
    let lab = Labyrinth::from_map_string(&text, false).unwrap();
    let export = SceneExport::from_labyrinth(&lab, &TextureCatalog::with_defaults());

    let json = export.to_json().unwrap();
    let back: SceneExport = serde_json::from_str(&json).unwrap();
    assert_eq!(back.blocks.len(), lab.blocks.len());
    assert!(back.start_pos.is_some());
    assert!(back.finish_pos.is_some());
    assert_eq!(back.width, 1.0 + 6.0 * 6.0);
}
