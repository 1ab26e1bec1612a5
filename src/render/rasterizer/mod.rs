//! Triangle rasterization.
//!
//! The rasterizer turns a [`ScreenTriangle`] (raster-space vertices plus the
//! per-vertex attributes to interpolate) into [`Fragment`]s, depth-tests them
//! and hands the survivors to a [`PixelShader`](shader::PixelShader).

mod edgefunction;
pub mod shader;

pub use edgefunction::EdgeFunctionRasterizer;

use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;

/// Triangles with less than this much (doubled) area are skipped.
pub(crate) const DEGENERATE_AREA: f32 = 1e-6;

/// A triangle ready for rasterization in screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenTriangle {
    /// Raster-space positions (origin top-left, Y down).
    pub points: [Vec2; 3],
    /// Camera-space distance of each vertex; must be > 0.
    pub depths: [f32; 3],
    pub normals: [Vec3; 3],
    pub tex_coords: [Vec2; 3],
}

impl ScreenTriangle {
    /// Twice the signed raster-space area. Positive for triangles wound
    /// counter-clockwise as seen by the camera.
    pub fn signed_area(&self) -> f32 {
        let [v0, v1, v2] = self.points;
        EdgeFunctionRasterizer::edge_function(v0, v1, v2)
    }

    /// True when the triangle has (numerically) no area and covers no pixel.
    pub fn is_degenerate(&self) -> bool {
        let area = self.signed_area();
        area.is_nan() || area.abs() < DEGENERATE_AREA
    }
}

/// A covered pixel with its interpolated attributes. Only lives for the
/// duration of one shader call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fragment {
    pub x: i32,
    pub y: i32,
    /// Screen-space barycentric weights, summing to 1.
    pub lambda: [f32; 3],
    /// Perspective-correct camera-space distance.
    pub depth: f32,
    /// Perspective-correct interpolated normal (not normalized).
    pub normal: Vec3,
    /// Perspective-correct interpolated texture coordinate.
    pub tex_coord: Vec2,
}

/// What happened to a triangle handed to the rasterizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillResult {
    /// The triangle was scanned; `pixels_written` passed the depth test.
    Filled { pixels_written: usize },
    /// Zero area; nothing was scanned.
    Degenerate,
    /// The clamped bounding box did not fit the depth buffer, so the
    /// triangle was dropped without touching any pixel.
    OutOfBounds,
}
