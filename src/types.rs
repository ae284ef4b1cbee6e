// types.rs - Shared spatial types for the labyrinth pipeline

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// CORE MATH TYPES
// ============================================================================

/// World-space position. Z-up geographic convention: X is width, Y is depth,
/// Z is height.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Component-wise translation.
    #[inline]
    pub fn offset(self, dx: f32, dy: f32, dz: f32) -> Point3 {
        Point3::new(self.x + dx, self.y + dy, self.z + dz)
    }
}

impl std::ops::Add for Point3 {
    type Output = Point3;
    #[inline]
    fn add(self, rhs: Point3) -> Point3 {
        Point3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::Sub for Point3 {
    type Output = Point3;
    #[inline]
    fn sub(self, rhs: Point3) -> Point3 {
        Point3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl From<[f32; 3]> for Point3 {
    #[inline]
    fn from(arr: [f32; 3]) -> Self {
        Point3::new(arr[0], arr[1], arr[2])
    }
}

impl From<Point3> for [f32; 3] {
    #[inline]
    fn from(p: Point3) -> Self {
        [p.x, p.y, p.z]
    }
}

/// RGBA color, linear floats in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    #[inline]
    pub const fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::white()
    }
}

impl From<[f32; 4]> for Color {
    #[inline]
    fn from(arr: [f32; 4]) -> Self {
        Color::new(arr[0], arr[1], arr[2], arr[3])
    }
}

impl From<Color> for [f32; 4] {
    #[inline]
    fn from(c: Color) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

/// Texture tiling factors. `u` scales horizontal repeats per world unit,
/// `v` vertical. Blocks without tiling stretch the whole texture per face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tiling {
    pub u: f32,
    pub v: f32,
}

impl Tiling {
    #[inline]
    pub const fn new(u: f32, v: f32) -> Self {
        Self { u, v }
    }
}

// ============================================================================
// TEXTURE REFERENCES
// ============================================================================

/// Opaque texture handle. The compiler only routes these; resolving them to
/// actual images is the renderer's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureId(pub u16);

pub const TEXTURE_WALL: TextureId = TextureId(0);
pub const TEXTURE_GLASS: TextureId = TextureId(1);

/// Maps texture handles to asset paths for exports and logs.
#[derive(Debug, Clone)]
pub struct TextureCatalog {
    paths: HashMap<TextureId, String>,
}

impl TextureCatalog {
    /// Catalog preloaded with the stock wall and glass materials.
    pub fn with_defaults() -> Self {
        let mut paths = HashMap::new();
        paths.insert(TEXTURE_WALL, "textures/wall.png".to_string());
        paths.insert(TEXTURE_GLASS, "textures/glass.png".to_string());
        Self { paths }
    }

    pub fn register(&mut self, id: TextureId, path: impl Into<String>) {
        self.paths.insert(id, path.into());
    }

    pub fn path(&self, id: TextureId) -> Option<&str> {
        self.paths.get(&id).map(String::as_str)
    }
}

impl Default for TextureCatalog {
    fn default() -> Self {
        Self::with_defaults()
    }
}
