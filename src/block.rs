// block.rs - Block model: kinds, extents, placement math, colliders

use crate::types::{Color, Point3, TextureId, Tiling, TEXTURE_GLASS, TEXTURE_WALL};
use serde::{Deserialize, Serialize};

// ============================================================================
// DIMENSIONS
// ============================================================================

pub const FLOOR_HEIGHT: f32 = 1.0;
pub const WALL_LENGTH: f32 = 5.0;
pub const WALL_HEIGHT: f32 = 5.0;
pub const WALL_THIN: f32 = 1.0;

/// Stock tiling for opaque blocks: one horizontal repeat per world unit,
/// half a repeat vertically.
pub const DEFAULT_TILING: Tiling = Tiling::new(1.0, 0.5);

/// Local extents of a block before placement. Width runs along X, height
/// along Z, depth along Y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Extent {
    #[inline]
    pub const fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }
}

pub const ATTR_WALL_H: Extent = Extent::new(WALL_LENGTH, WALL_HEIGHT, WALL_THIN);
pub const ATTR_WALL_V: Extent = Extent::new(WALL_THIN, WALL_HEIGHT, WALL_LENGTH);
pub const ATTR_PILLAR: Extent = Extent::new(WALL_THIN, WALL_HEIGHT, WALL_THIN);
pub const ATTR_FLOOR_MIDDLE: Extent = Extent::new(WALL_LENGTH, FLOOR_HEIGHT, WALL_LENGTH);
pub const ATTR_FLOOR_WALL_H: Extent = Extent::new(WALL_LENGTH, FLOOR_HEIGHT, WALL_THIN);
pub const ATTR_FLOOR_WALL_V: Extent = Extent::new(WALL_THIN, FLOOR_HEIGHT, WALL_LENGTH);
pub const ATTR_FLOOR_PILLAR: Extent = Extent::new(WALL_THIN, FLOOR_HEIGHT, WALL_THIN);

// ============================================================================
// GRID PLACEMENT
// ============================================================================

/// Coordinates in the doubled-resolution text grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    #[inline]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Floor slab extent for a cell, decided by index parity: odd indices are
/// tile interiors, even indices the seams between tiles.
#[inline]
pub const fn floor_extent(cell: Cell) -> Extent {
    match (cell.x % 2 == 1, cell.y % 2 == 1) {
        (true, true) => ATTR_FLOOR_MIDDLE,
        (true, false) => ATTR_FLOOR_WALL_H,
        (false, true) => ATTR_FLOOR_WALL_V,
        (false, false) => ATTR_FLOOR_PILLAR,
    }
}

/// World position of a grid cell's near corner on the given story.
pub fn world_position(cell: Cell, floor_index: usize) -> Point3 {
    let axis = |idx: usize| {
        (idx % 2) as f32 * WALL_THIN + (idx / 2) as f32 * (WALL_LENGTH + WALL_THIN)
    };
    Point3::new(
        axis(cell.x),
        axis(cell.y),
        floor_index as f32 * (WALL_HEIGHT + FLOOR_HEIGHT),
    )
}

// ============================================================================
// BLOCK MODEL
// ============================================================================

/// Stable block identity, assigned in emission order and preserved by the
/// merger (a merged strip keeps its leftmost member's id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId(pub u32);

/// Which sides of a wall face the walkable interior. Used by gameplay layers
/// for decal and spawn placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallSides {
    pub east_inside: bool,
    pub west_inside: bool,
    pub south_inside: bool,
    pub north_inside: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockKind {
    Wall(WallSides),
    Window,
    Pillar,
    Floor {
        /// True only for the synthetic cover emitted above the top story.
        strictly_roof: bool,
    },
}

impl BlockKind {
    #[inline]
    pub const fn is_wall(self) -> bool {
        matches!(self, BlockKind::Wall(_))
    }

    #[inline]
    pub const fn is_window(self) -> bool {
        matches!(self, BlockKind::Window)
    }

    #[inline]
    pub const fn is_pillar(self) -> bool {
        matches!(self, BlockKind::Pillar)
    }

    #[inline]
    pub const fn is_floor(self) -> bool {
        matches!(self, BlockKind::Floor { .. })
    }

    pub const fn label(self) -> &'static str {
        match self {
            BlockKind::Wall(_) => "wall",
            BlockKind::Window => "window",
            BlockKind::Pillar => "pillar",
            BlockKind::Floor { .. } => "floor",
        }
    }
}

/// One axis-aligned box of the labyrinth. `position` is the corner with the
/// smallest coordinates; the box spans +width along X, +depth along Y,
/// +height along Z.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    #[serde(flatten)]
    pub kind: BlockKind,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub position: Point3,
    pub color: Color,
    pub texture: TextureId,
    pub tiling: Option<Tiling>,
    /// Grid cell this block came from (leftmost member for merged strips).
    pub cell: Cell,
    pub floor_index: usize,
}

impl Block {
    /// Opaque block with the stock wall material. The id is a placeholder
    /// until the block is emitted.
    pub fn solid(
        kind: BlockKind,
        extent: Extent,
        cell: Cell,
        floor_index: usize,
        color: Color,
    ) -> Block {
        Block {
            id: BlockId(0),
            kind,
            width: extent.width,
            height: extent.height,
            depth: extent.depth,
            position: Point3::zero(),
            color,
            texture: TEXTURE_WALL,
            tiling: Some(DEFAULT_TILING),
            cell,
            floor_index,
        }
    }

    /// Glass pane: glass texture stretched once per face, always white.
    pub fn glass(extent: Extent, cell: Cell, floor_index: usize) -> Block {
        Block {
            id: BlockId(0),
            kind: BlockKind::Window,
            width: extent.width,
            height: extent.height,
            depth: extent.depth,
            position: Point3::zero(),
            color: Color::white(),
            texture: TEXTURE_GLASS,
            tiling: None,
            cell,
            floor_index,
        }
    }

    /// Box collider for the physics side, centered on the block.
    pub fn collider(&self) -> Collider {
        Collider {
            width: self.width,
            height: self.height,
            depth: self.depth,
            center: self
                .position
                .offset(self.width / 2.0, self.depth / 2.0, self.height / 2.0),
            tag: if self.kind.is_floor() {
                ColliderTag::Ground
            } else {
                ColliderTag::Wall
            },
        }
    }
}

// ============================================================================
// COLLIDERS
// ============================================================================

/// Tag consumed by character controllers: `Ground` supports standing,
/// `Wall` only blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColliderTag {
    Ground,
    Wall,
}

/// Axis-aligned box collider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub center: Point3,
    pub tag: ColliderTag,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extent_constants() {
        assert_eq!(ATTR_WALL_H.width, WALL_LENGTH);
        assert_eq!(ATTR_WALL_H.depth, WALL_THIN);
        assert_eq!(ATTR_WALL_V.width, WALL_THIN);
        assert_eq!(ATTR_WALL_V.depth, WALL_LENGTH);
        assert_eq!(ATTR_PILLAR.height, WALL_HEIGHT);
        assert_eq!(ATTR_FLOOR_MIDDLE.height, FLOOR_HEIGHT);
    }

    #[test]
    fn test_world_position_alternates_seams_and_tiles() {
        assert_eq!(world_position(Cell::new(0, 0), 0), Point3::new(0.0, 0.0, 0.0));
        assert_eq!(world_position(Cell::new(1, 0), 0), Point3::new(1.0, 0.0, 0.0));
        assert_eq!(world_position(Cell::new(2, 0), 0), Point3::new(6.0, 0.0, 0.0));
        assert_eq!(world_position(Cell::new(3, 3), 0), Point3::new(7.0, 7.0, 0.0));
        assert_eq!(world_position(Cell::new(4, 2), 2), Point3::new(12.0, 6.0, 12.0));
    }

    #[test]
    fn test_story_height_step() {
        let below = world_position(Cell::new(1, 1), 0);
        let above = world_position(Cell::new(1, 1), 1);
        assert_eq!(above.z - below.z, WALL_HEIGHT + FLOOR_HEIGHT);
    }

    #[test]
    fn test_floor_extent_by_parity() {
        assert_eq!(floor_extent(Cell::new(1, 1)), ATTR_FLOOR_MIDDLE);
        assert_eq!(floor_extent(Cell::new(1, 2)), ATTR_FLOOR_WALL_H);
        assert_eq!(floor_extent(Cell::new(2, 1)), ATTR_FLOOR_WALL_V);
        assert_eq!(floor_extent(Cell::new(2, 2)), ATTR_FLOOR_PILLAR);
    }

    #[test]
    fn test_floor_collider_is_ground_and_centered() {
        let mut block = Block::solid(
            BlockKind::Floor { strictly_roof: false },
            ATTR_FLOOR_MIDDLE,
            Cell::new(1, 1),
            0,
            Color::white(),
        );
        block.position = Point3::new(1.0, 1.0, 0.0);

        let collider = block.collider();
        assert_eq!(collider.tag, ColliderTag::Ground);
        assert_eq!(collider.center, Point3::new(3.5, 3.5, 0.5));
        assert_eq!(collider.width, WALL_LENGTH);
        assert_eq!(collider.height, FLOOR_HEIGHT);
    }

    #[test]
    fn test_non_floor_colliders_are_walls() {
        let wall = Block::solid(
            BlockKind::Wall(WallSides::default()),
            ATTR_WALL_H,
            Cell::new(1, 0),
            0,
            Color::white(),
        );
        assert_eq!(wall.collider().tag, ColliderTag::Wall);

        let pillar = Block::solid(
            BlockKind::Pillar,
            ATTR_PILLAR,
            Cell::new(0, 0),
            0,
            Color::white(),
        );
        assert_eq!(pillar.collider().tag, ColliderTag::Wall);

        let window = Block::glass(ATTR_WALL_H, Cell::new(1, 0), 0);
        assert_eq!(window.collider().tag, ColliderTag::Wall);
    }

    #[test]
    fn test_window_material_defaults() {
        let window = Block::glass(ATTR_WALL_V, Cell::new(0, 1), 0);
        assert_eq!(window.texture, TEXTURE_GLASS);
        assert_eq!(window.tiling, None);
        assert_eq!(window.color, Color::white());
    }
}
