// preview.rs - Top-down floor plan renderer for quick blueprint inspection

use crate::block::{Block, FLOOR_HEIGHT, WALL_HEIGHT, WALL_THIN};
use crate::error_handling::{CompileError, Result};
use crate::labyrinth::Labyrinth;
use crate::types::Point3;
use image::{ImageBuffer, Rgba, RgbaImage};
use std::path::{Path, PathBuf};

// ============================================================================
// PALETTE
// ============================================================================

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const FLOOR_FILL: Rgba<u8> = Rgba([205, 205, 205, 255]);
const WALL_FILL: Rgba<u8> = Rgba([60, 60, 70, 255]);
const WINDOW_FILL: Rgba<u8> = Rgba([120, 180, 230, 255]);
const PILLAR_FILL: Rgba<u8> = Rgba([30, 30, 35, 255]);
const START_FILL: Rgba<u8> = Rgba([40, 180, 70, 255]);
const FINISH_FILL: Rgba<u8> = Rgba([220, 50, 50, 255]);

// ============================================================================
// RENDERING
// ============================================================================

/// Fill an axis-aligned rectangle given in world units. Out-of-bounds parts
/// are clipped.
fn fill_rect(image: &mut RgbaImage, x0: f32, y0: f32, w: f32, h: f32, scale: u32, fill: Rgba<u8>) {
    let scale = scale as f32;
    let x_min = (x0 * scale).round().max(0.0) as u32;
    let y_min = (y0 * scale).round().max(0.0) as u32;
    let x_max = (((x0 + w) * scale).round() as u32).min(image.width());
    let y_max = (((y0 + h) * scale).round() as u32).min(image.height());

    for y in y_min..y_max {
        for x in x_min..x_max {
            image.put_pixel(x, y, fill);
        }
    }
}

/// Story a world-space point falls in.
fn story_of(position: Point3) -> usize {
    (position.z / (WALL_HEIGHT + FLOOR_HEIGHT)) as usize
}

fn paint_block(image: &mut RgbaImage, block: &Block, scale: u32, fill: Rgba<u8>) {
    fill_rect(
        image,
        block.position.x,
        block.position.y,
        block.width,
        block.depth,
        scale,
        fill,
    );
}

/// Square marker one seam wide, centered on a world-space point.
fn paint_marker(image: &mut RgbaImage, position: Point3, scale: u32, fill: Rgba<u8>) {
    fill_rect(
        image,
        position.x - WALL_THIN / 2.0,
        position.y - WALL_THIN / 2.0,
        WALL_THIN,
        WALL_THIN,
        scale,
        fill,
    );
}

/// Render one story as a top-down plan, `scale` pixels per world unit.
/// Y grows downward, matching the blueprint text orientation.
pub fn render_floor_plan(labyrinth: &Labyrinth, floor_index: usize, scale: u32) -> RgbaImage {
    let scale = scale.max(1);
    let width_px = ((labyrinth.width * scale as f32).ceil() as u32).max(1);
    let depth_px = ((labyrinth.depth * scale as f32).ceil() as u32).max(1);
    let mut image = ImageBuffer::from_pixel(width_px, depth_px, BACKGROUND);

    let on_story = |block: &&Block| block.floor_index == floor_index;

    // Floors first so the thin built-on-top kinds stay visible.
    for block in labyrinth.floors().filter(on_story) {
        paint_block(&mut image, block, scale, FLOOR_FILL);
    }
    for block in labyrinth.windows().filter(on_story) {
        paint_block(&mut image, block, scale, WINDOW_FILL);
    }
    for block in labyrinth.walls().filter(on_story) {
        paint_block(&mut image, block, scale, WALL_FILL);
    }
    for block in labyrinth.pillars().filter(on_story) {
        paint_block(&mut image, block, scale, PILLAR_FILL);
    }

    if let Some(start) = labyrinth.start_pos {
        if story_of(start) == floor_index {
            paint_marker(&mut image, start, scale, START_FILL);
        }
    }
    if let Some(finish) = labyrinth.finish_pos {
        if story_of(finish) == floor_index {
            paint_marker(&mut image, finish, scale, FINISH_FILL);
        }
    }

    image
}

/// Write one `floor_N.png` per story into `dir`, the roof plate included
/// as the last image, and return the paths.
pub fn save_floor_plans(
    labyrinth: &Labyrinth,
    dir: impl AsRef<Path>,
    scale: u32,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if labyrinth.n_floors == 0 {
        log::warn!("nothing to draw, the labyrinth has no floors");
        return Ok(Vec::new());
    }
    std::fs::create_dir_all(dir).map_err(|source| CompileError::OutputFile {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths = Vec::with_capacity(labyrinth.n_floors + 1);
    for story in 0..=labyrinth.n_floors {
        let plan = render_floor_plan(labyrinth, story, scale);
        let path = dir.join(format!("floor_{story}.png"));
        plan.save(&path)?;
        log::debug!("wrote floor plan '{}'", path.display());
        paths.push(path);
    }
    log::info!(
        "wrote {} floor plan(s) to '{}'",
        paths.len(),
        dir.display()
    );
    Ok(paths)
}
