// merge.rs - Coalesces floor runs to cut the final block count

use crate::block::{Block, BlockKind};
use std::collections::BTreeMap;

/// Whether two blocks carry interchangeable attributes for merging.
/// Walls compare their facing flags; that path is reserved for a future
/// wall merge and nothing routes walls here yet.
fn same_attributes(a: &Block, b: &Block) -> bool {
    match (a.kind, b.kind) {
        (
            BlockKind::Floor { strictly_roof: roof_a },
            BlockKind::Floor { strictly_roof: roof_b },
        ) => roof_a == roof_b,
        (BlockKind::Wall(sides_a), BlockKind::Wall(sides_b)) => sides_a == sides_b,
        _ => false,
    }
}

/// Sort values and fold each maximal run of mergeable neighbors into one
/// result. `mergeable` compares a value against the previous one; a failed
/// check closes the current run. Runs handed to `fold` are never empty.
pub fn coalesce_runs<T, O, K, F, M, R>(
    mut values: Vec<T>,
    mut sort_key: K,
    mut mergeable: F,
    mut fold: M,
) -> Vec<R>
where
    O: Ord,
    K: FnMut(&T) -> O,
    F: FnMut(&T, &T) -> bool,
    M: FnMut(Vec<T>) -> R,
{
    if values.is_empty() {
        return Vec::new();
    }

    values.sort_by_key(|value| sort_key(value));

    let mut runs = Vec::new();
    let mut current: Vec<T> = Vec::new();
    for value in values {
        if let Some(prev) = current.last() {
            if !mergeable(&value, prev) {
                runs.push(fold(std::mem::take(&mut current)));
            }
        }
        current.push(value);
    }
    runs.push(fold(current));
    runs
}

/// One maximal run becomes its leftmost member widened to the whole span.
fn merge_strip(run: Vec<Block>) -> Block {
    let total_width: f32 = run.iter().map(|block| block.width).sum();
    let mut members = run.into_iter();
    let mut strip = members.next().expect("merge run cannot be empty");
    strip.width = total_width;
    strip
}

/// Merge pass. Floors coalesce into horizontal strips per story and row;
/// walls, windows, and pillars pass through unchanged after the floors.
/// Covered geometry is preserved exactly and the pass is idempotent.
pub fn merge(blocks: Vec<Block>) -> Vec<Block> {
    let input_len = blocks.len();

    let mut floors: BTreeMap<usize, Vec<Block>> = BTreeMap::new();
    let mut rest: Vec<Block> = Vec::new();
    for block in blocks {
        if block.kind.is_floor() {
            floors.entry(block.floor_index).or_default().push(block);
        } else {
            rest.push(block);
        }
    }

    let mut merged: Vec<Block> = Vec::new();
    for story_floors in floors.into_values() {
        let mut rows: BTreeMap<usize, Vec<Block>> = BTreeMap::new();
        for block in story_floors {
            rows.entry(block.cell.y).or_default().push(block);
        }

        for row in rows.into_values() {
            merged.extend(coalesce_runs(
                row,
                |block| block.cell.x,
                |block, prev| block.cell.x - prev.cell.x == 1 && same_attributes(block, prev),
                merge_strip,
            ));
        }
    }

    merged.extend(rest);

    log::debug!("merge: {} block(s) -> {}", input_len, merged.len());
    merged
}
