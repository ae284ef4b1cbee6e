// builder.rs - Derives labyrinth blocks from a parsed blueprint

use crate::block::{
    floor_extent, world_position, Block, BlockId, BlockKind, Cell, Extent, WallSides,
    ATTR_FLOOR_MIDDLE, ATTR_FLOOR_PILLAR, ATTR_FLOOR_WALL_H, ATTR_FLOOR_WALL_V, ATTR_PILLAR,
    ATTR_WALL_H, ATTR_WALL_V, FLOOR_HEIGHT, WALL_LENGTH,
};
use crate::blueprint::{Blueprint, Symbol};
use crate::types::{Color, Point3};

/// Output of the derivation pass, before merging.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedBlocks {
    pub blocks: Vec<Block>,
    pub start_pos: Option<Point3>,
    pub finish_pos: Option<Point3>,
}

/// Block colors for one compile. Debug mode tints by kind so misplaced
/// geometry is obvious in a renderer.
#[derive(Debug, Clone, Copy)]
struct Palette {
    floor: Color,
    wall: Color,
    pillar: Color,
}

impl Palette {
    fn new(debug: bool) -> Palette {
        if debug {
            Palette {
                floor: Color::rgb(1.0, 0.0, 0.0),
                wall: Color::rgb(0.0, 1.0, 0.0),
                pillar: Color::rgb(0.0, 0.0, 1.0),
            }
        } else {
            Palette {
                floor: Color::white(),
                wall: Color::white(),
                pillar: Color::white(),
            }
        }
    }
}

/// Append a block, assigning the next id. Ids track emission order so they
/// stay stable through merging.
fn push(blocks: &mut Vec<Block>, mut block: Block) {
    block.id = BlockId(blocks.len() as u32);
    blocks.push(block);
}

/// Supporting floor slab under a wall, window, or pillar.
fn support_floor(
    extent: Extent,
    cell: Cell,
    floor_index: usize,
    position: Point3,
    color: Color,
) -> Block {
    let mut floor = Block::solid(
        BlockKind::Floor {
            strictly_roof: false,
        },
        extent,
        cell,
        floor_index,
        color,
    );
    floor.position = position;
    floor
}

/// Walkable-interior check for the four neighbors of a wall cell. Lookups
/// off the grid count as not inside.
fn wall_sides(rows: &[Vec<Symbol>], x: usize, y: usize) -> WallSides {
    let at = |xx: usize, yy: usize| rows.get(yy).and_then(|row| row.get(xx)).copied();
    WallSides {
        east_inside: at(x + 1, y).map_or(false, Symbol::is_inside),
        west_inside: x > 0 && at(x - 1, y).map_or(false, Symbol::is_inside),
        south_inside: at(x, y + 1).map_or(false, Symbol::is_inside),
        north_inside: y > 0 && at(x, y - 1).map_or(false, Symbol::is_inside),
    }
}

/// Walk every floor cell by cell and emit blocks. Rule order is load-bearing:
/// the ceiling rule (any non-hole cell above an occupied cell grows a floor)
/// fires before the start/finish rules, so markers on upper stories become
/// plain floors.
pub fn derive(blueprint: &Blueprint, debug: bool) -> DerivedBlocks {
    let palette = Palette::new(debug);
    let mut blocks: Vec<Block> = Vec::new();
    let mut start_pos = None;
    let mut finish_pos = None;

    let mut previous: Vec<Vec<Symbol>> = Vec::new();
    for (floor_index, layout) in blueprint.floors.iter().enumerate() {
        let rows = layout.symbol_rows();

        for (y, row) in rows.iter().enumerate() {
            for (x, &symbol) in row.iter().enumerate() {
                let cell = Cell::new(x, y);
                let mut block: Option<Block> = None;

                if symbol == Symbol::WallH {
                    block = Some(Block::solid(
                        BlockKind::Wall(WallSides::default()),
                        ATTR_WALL_H,
                        cell,
                        floor_index,
                        palette.wall,
                    ));
                } else if symbol == Symbol::WindowH {
                    block = Some(Block::glass(ATTR_WALL_H, cell, floor_index));
                } else if symbol == Symbol::WallV {
                    block = Some(Block::solid(
                        BlockKind::Wall(WallSides::default()),
                        ATTR_WALL_V,
                        cell,
                        floor_index,
                        palette.wall,
                    ));
                } else if symbol == Symbol::WindowV {
                    block = Some(Block::glass(ATTR_WALL_V, cell, floor_index));
                } else if symbol == Symbol::Pillar {
                    block = Some(Block::solid(
                        BlockKind::Pillar,
                        ATTR_PILLAR,
                        cell,
                        floor_index,
                        palette.pillar,
                    ));
                } else if symbol == Symbol::Floor
                    || (symbol != Symbol::Hole
                        && previous
                            .get(y)
                            .and_then(|row| row.get(x))
                            .map_or(false, |below| !below.is_empty()))
                {
                    block = Some(Block::solid(
                        BlockKind::Floor {
                            strictly_roof: false,
                        },
                        floor_extent(cell),
                        cell,
                        floor_index,
                        palette.floor,
                    ));
                } else if symbol == Symbol::Start {
                    let position = world_position(cell, floor_index);
                    let to_center = WALL_LENGTH / 2.0;
                    start_pos = Some(position.offset(to_center, to_center, FLOOR_HEIGHT));
                    // The spawn stands on a full tile regardless of parity.
                    block = Some(Block::solid(
                        BlockKind::Floor {
                            strictly_roof: false,
                        },
                        ATTR_FLOOR_MIDDLE,
                        cell,
                        floor_index,
                        palette.floor,
                    ));
                } else if symbol == Symbol::Finish {
                    // The goal is the raw cell corner; no floor is emitted.
                    finish_pos = Some(world_position(cell, floor_index));
                }

                if let Some(mut block) = block {
                    let position = world_position(cell, floor_index);
                    block.position = position;

                    match block.kind {
                        BlockKind::Pillar => {
                            push(
                                &mut blocks,
                                support_floor(
                                    ATTR_FLOOR_PILLAR,
                                    cell,
                                    floor_index,
                                    position,
                                    palette.floor,
                                ),
                            );
                            block.position.z += FLOOR_HEIGHT;
                        }
                        BlockKind::Wall(_) | BlockKind::Window => {
                            let extent = if symbol.is_horizontal() {
                                ATTR_FLOOR_WALL_H
                            } else {
                                ATTR_FLOOR_WALL_V
                            };
                            push(
                                &mut blocks,
                                support_floor(extent, cell, floor_index, position, palette.floor),
                            );
                            block.position.z += FLOOR_HEIGHT;

                            if let BlockKind::Wall(ref mut sides) = block.kind {
                                *sides = wall_sides(&rows, x, y);
                            }
                        }
                        _ => {}
                    }

                    push(&mut blocks, block);
                }
            }
        }

        log::debug!(
            "floor {}: {} block(s) emitted so far",
            floor_index,
            blocks.len()
        );
        previous = rows;
    }

    // Roof pass: cover every occupied cell of the top story one story up.
    let n_floors = blueprint.n_floors();
    for (y, row) in previous.iter().enumerate() {
        for (x, &symbol) in row.iter().enumerate() {
            if symbol.is_empty() {
                continue;
            }
            let cell = Cell::new(x, y);
            let mut roof = Block::solid(
                BlockKind::Floor { strictly_roof: true },
                floor_extent(cell),
                cell,
                n_floors,
                palette.floor,
            );
            roof.position = world_position(cell, n_floors);
            push(&mut blocks, roof);
        }
    }

    log::debug!("derived {} block(s) total", blocks.len());

    DerivedBlocks {
        blocks,
        start_pos,
        finish_pos,
    }
}
