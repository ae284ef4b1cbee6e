// generator.rs - Random blueprint generation with Kruskal's algorithm

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

// ============================================================================
// TILE LATTICE
// ============================================================================

/// Tile coordinates in the maze lattice. Distinct from the doubled text
/// grid: tile (x, y) sits at text cell (2x+1, 2y+1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Tile {
    x: usize,
    y: usize,
}

impl Tile {
    const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Candidate passage between two adjacent tiles.
#[derive(Debug, Clone, Copy)]
struct Passage {
    a: Tile,
    b: Tile,
}

// ============================================================================
// UNION-FIND
// ============================================================================

/// Union-find over tiles with path compression and union by rank.
struct UnionFind {
    parent: HashMap<Tile, Tile>,
    rank: HashMap<Tile, usize>,
}

impl UnionFind {
    fn new() -> Self {
        Self {
            parent: HashMap::new(),
            rank: HashMap::new(),
        }
    }

    fn make_set(&mut self, tile: Tile) {
        if let Entry::Vacant(entry) = self.parent.entry(tile) {
            entry.insert(tile);
            self.rank.insert(tile, 0);
        }
    }

    fn find(&mut self, tile: Tile) -> Tile {
        if self.parent[&tile] != tile {
            let root = self.find(self.parent[&tile]);
            self.parent.insert(tile, root);
        }
        self.parent[&tile]
    }

    /// Merge the sets holding `a` and `b`. Returns false if they were
    /// already connected.
    fn union(&mut self, a: Tile, b: Tile) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }

        let rank_a = self.rank[&root_a];
        let rank_b = self.rank[&root_b];
        if rank_a < rank_b {
            self.parent.insert(root_a, root_b);
        } else if rank_a > rank_b {
            self.parent.insert(root_b, root_a);
        } else {
            self.parent.insert(root_b, root_a);
            self.rank.insert(root_a, rank_a + 1);
        }
        true
    }
}

// ============================================================================
// GENERATION
// ============================================================================

/// Generate a single-story blueprint with a perfect maze of
/// `width_units` x `depth_units` tiles. Kruskal's algorithm over a shuffled
/// passage list yields a spanning tree, so every tile is reachable and
/// there are no loops. The spawn goes on the first tile and the goal on the
/// diagonally opposite one (a one-tile maze only gets the spawn).
///
/// Zero dimensions are clamped to one tile. The same seed always produces
/// the same blueprint; `None` seeds from entropy.
pub fn generate(width_units: usize, depth_units: usize, seed: Option<u64>) -> String {
    let width = width_units.max(1);
    let depth = depth_units.max(1);
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    // Doubled text grid. Everything starts walled off; carving opens tile
    // cells and the seams between connected tiles.
    let cols = width * 2 + 1;
    let rows = depth * 2 + 1;
    let mut open = vec![vec![false; cols]; rows];

    let mut union_find = UnionFind::new();
    let mut passages = Vec::new();
    for y in 0..depth {
        for x in 0..width {
            let tile = Tile::new(x, y);
            union_find.make_set(tile);
            open[y * 2 + 1][x * 2 + 1] = true;
            if x + 1 < width {
                passages.push(Passage {
                    a: tile,
                    b: Tile::new(x + 1, y),
                });
            }
            if y + 1 < depth {
                passages.push(Passage {
                    a: tile,
                    b: Tile::new(x, y + 1),
                });
            }
        }
    }
    passages.shuffle(&mut rng);

    let mut carved = 0usize;
    for passage in &passages {
        if union_find.union(passage.a, passage.b) {
            // The seam between two adjacent tiles sits at their doubled
            // midpoint.
            open[passage.a.y + passage.b.y + 1][passage.a.x + passage.b.x + 1] = true;
            carved += 1;
        }
    }
    log::debug!(
        "carved {} of {} candidate passage(s)",
        carved,
        passages.len()
    );

    let spawn = Tile::new(0, 0);
    let goal = Tile::new(width - 1, depth - 1);

    let mut text = String::with_capacity(rows * (cols + 1));
    for y in 0..rows {
        for x in 0..cols {
            let ch = if y % 2 == 1 && x % 2 == 1 {
                let tile = Tile::new(x / 2, y / 2);
                if tile == spawn {
                    'S'
                } else if tile == goal {
                    'F'
                } else {
                    '.'
                }
            } else if open[y][x] {
                ' '
            } else if y % 2 == 0 && x % 2 == 0 {
                '+'
            } else if y % 2 == 0 {
                '-'
            } else {
                '|'
            };
            text.push(ch);
        }
        text.push('\n');
    }

    log::info!("generated {}x{} blueprint", width, depth);
    text
}
