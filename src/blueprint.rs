// blueprint.rs - Cell symbols and the text-grid blueprint parser

use crate::error_handling::{Axis, CompileError, Result};

// ============================================================================
// CELL SYMBOLS
// ============================================================================

/// Meaning of one grid cell. The grid is doubled-resolution: odd indices
/// address tile interiors, even indices the thin seams between tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// `-`, wall segment running along X.
    WallH,
    /// `|`, wall segment running along Y.
    WallV,
    /// `_`, window segment running along X.
    WindowH,
    /// `!`, window segment running along Y.
    WindowV,
    /// `+`, corner post.
    Pillar,
    /// `.`, walkable tile.
    Floor,
    /// ` `, void. Unrecognized characters also land here.
    Empty,
    /// `X`, intentional opening in the floor.
    Hole,
    /// `S`, player spawn marker.
    Start,
    /// `F`, goal marker.
    Finish,
}

impl Symbol {
    /// Permissive mapping: anything outside the alphabet is void.
    #[inline]
    pub const fn from_char(c: char) -> Symbol {
        match c {
            '-' => Symbol::WallH,
            '|' => Symbol::WallV,
            '_' => Symbol::WindowH,
            '!' => Symbol::WindowV,
            '+' => Symbol::Pillar,
            '.' => Symbol::Floor,
            'X' => Symbol::Hole,
            'S' => Symbol::Start,
            'F' => Symbol::Finish,
            _ => Symbol::Empty,
        }
    }

    #[inline]
    pub const fn is_wall(self) -> bool {
        matches!(self, Symbol::WallH | Symbol::WallV)
    }

    #[inline]
    pub const fn is_window(self) -> bool {
        matches!(self, Symbol::WindowH | Symbol::WindowV)
    }

    /// Runs along X (full tile length in width).
    #[inline]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Symbol::WallH | Symbol::WindowH)
    }

    /// Runs along Y (full tile length in depth).
    #[inline]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Symbol::WallV | Symbol::WindowV)
    }

    /// Walkable interior of the labyrinth, the reference set for deciding
    /// which side of a wall faces inward.
    #[inline]
    pub const fn is_inside(self) -> bool {
        matches!(self, Symbol::Floor | Symbol::Hole | Symbol::Start)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self, Symbol::Empty)
    }
}

// ============================================================================
// BLUEPRINT PARSING
// ============================================================================

/// Raw rows of one story, top row first. Rows keep their original characters;
/// symbol mapping happens on demand so parse stays validation-free.
#[derive(Debug, Clone, PartialEq)]
pub struct FloorLayout {
    pub rows: Vec<String>,
}

impl FloorLayout {
    /// Rows mapped to symbols. Row lengths are preserved as-is, ragged input
    /// stays ragged.
    pub fn symbol_rows(&self) -> Vec<Vec<Symbol>> {
        self.rows
            .iter()
            .map(|row| row.chars().map(Symbol::from_char).collect())
            .collect()
    }
}

/// Parsed blueprint: stories plus the shared tile dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct Blueprint {
    pub floors: Vec<FloorLayout>,
    /// Labyrinth width in tiles.
    pub width_units: usize,
    /// Labyrinth depth in tiles.
    pub depth_units: usize,
}

impl Blueprint {
    pub fn n_floors(&self) -> usize {
        self.floors.len()
    }
}

/// Split the blueprint text into stories and check their dimensions.
///
/// Stories are paragraphs: blank lines separate floors, runs of blank lines
/// collapse, a trailing unterminated paragraph still counts. Tile dimensions
/// come from the first floor; every later floor must agree, width checked
/// before depth. Characters are not validated here.
pub fn parse(text: &str) -> Result<Blueprint> {
    let mut floors: Vec<FloorLayout> = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for line in text.lines() {
        if !line.is_empty() {
            current.push(line.to_string());
        } else if !current.is_empty() {
            floors.push(FloorLayout {
                rows: std::mem::take(&mut current),
            });
        }
    }
    if !current.is_empty() {
        floors.push(FloorLayout { rows: current });
    }

    let mut width_units = 0;
    let mut depth_units = 0;
    for (floor_index, floor) in floors.iter().enumerate() {
        let floor_width = (floor.rows[0].chars().count() - 1) / 2;
        let floor_depth = (floor.rows.len() - 1) / 2;

        if floor_index == 0 {
            width_units = floor_width;
            depth_units = floor_depth;
        } else if floor_width != width_units {
            return Err(CompileError::DimensionMismatch {
                axis: Axis::Width,
                expected: width_units,
                found: floor_width,
                floor_index,
            });
        } else if floor_depth != depth_units {
            return Err(CompileError::DimensionMismatch {
                axis: Axis::Depth,
                expected: depth_units,
                found: floor_depth,
                floor_index,
            });
        }
    }

    if floors.is_empty() {
        log::warn!("blueprint has no floors");
    } else {
        log::debug!(
            "parsed blueprint: {} floor(s), {}x{} tiles",
            floors.len(),
            width_units,
            depth_units
        );
    }

    Ok(Blueprint {
        floors,
        width_units,
        depth_units,
    })
}
