//! Edge function-based triangle rasterization.
//!
//! # Algorithm Overview
//!
//! 1. Compute the bounding box of the triangle, clamped to the render target
//! 2. For each pixel centre in the box, evaluate three edge functions
//! 3. A pixel is inside if all three share the sign of the triangle's area
//!
//! # Edge Function
//!
//! For an edge from point A to point B, the edge function at point P is:
//!
//! ```text
//! E(P) = (P.x - A.x) * (B.y - A.y) - (B.x - A.x) * (P.y - A.y)
//! ```
//!
//! The three values, divided by the total signed area, are the barycentric
//! weights of P.
//!
//! # Depth and attributes
//!
//! Camera-space depth is not affine in screen space after the perspective
//! divide, but its reciprocal is. Depth is therefore recovered as
//! `1 / sum(lambda_i / z_i)`, and every other attribute is weighted by
//! `lambda_i / z_i` and rescaled by that depth.
//!
//! # References
//!
//! - Juan Pineda, "A Parallel Algorithm for Polygon Rasterization" (1988)
//! - Scratchapixel: <https://www.scratchapixel.com/lessons/3d-basic-rendering/rasterization-practical-implementation>

use super::shader::PixelShader;
use super::{FillResult, Fragment, ScreenTriangle};
use crate::colors;
use crate::display::DisplaySurface;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::render::depth::DepthBuffer;

/// Triangle rasterizer using the edge function algorithm.
///
/// Iterates every pixel in the triangle's bounding box. Both windings are
/// accepted: the inside test takes its sign from the triangle's area.
#[derive(Debug, Default, Clone, Copy)]
pub struct EdgeFunctionRasterizer;

impl EdgeFunctionRasterizer {
    pub fn new() -> Self {
        EdgeFunctionRasterizer
    }

    /// Signed area of the parallelogram spanned by (B - A) and (P - A).
    ///
    /// Zero when P lies on the line through A and B; the sign tells which side.
    #[inline]
    pub fn edge_function(a: Vec2, b: Vec2, p: Vec2) -> f32 {
        (p.x - a.x) * (b.y - a.y) - (b.x - a.x) * (p.y - a.y)
    }

    /// Rasterizes `triangle`, depth-testing every covered pixel against
    /// `depth` and writing shaded survivors to `surface`.
    ///
    /// Shading only runs for fragments that pass the depth test.
    pub fn fill_triangle<S, D>(
        &self,
        triangle: &ScreenTriangle,
        depth: &mut DepthBuffer,
        surface: &mut D,
        shader: &S,
    ) -> FillResult
    where
        S: PixelShader + ?Sized,
        D: DisplaySurface + ?Sized,
    {
        let [v0, v1, v2] = triangle.points;

        // ─────────────────────────────────────────────────────────────────────
        // Step 1: Signed area (2x triangle area)
        // ─────────────────────────────────────────────────────────────────────
        if triangle.is_degenerate() {
            return FillResult::Degenerate;
        }
        let area = triangle.signed_area();
        let inv_area = 1.0 / area;

        // ─────────────────────────────────────────────────────────────────────
        // Step 2: Bounding box, clamped to the surface
        // ─────────────────────────────────────────────────────────────────────
        let min_x = (v0.x.min(v1.x).min(v2.x).floor() as i32).max(0);
        let max_x = (v0.x.max(v1.x).max(v2.x).ceil() as i32).min(surface.width() as i32 - 1);
        let min_y = (v0.y.min(v1.y).min(v2.y).floor() as i32).max(0);
        let max_y = (v0.y.max(v1.y).max(v2.y).ceil() as i32).min(surface.height() as i32 - 1);

        if min_x > max_x || min_y > max_y {
            return FillResult::Filled { pixels_written: 0 };
        }
        if depth.index(min_x, min_y).is_none() || depth.index(max_x, max_y).is_none() {
            return FillResult::OutOfBounds;
        }

        let inv_z = triangle.depths.map(|z| 1.0 / z);
        let mut pixels_written = 0;

        // ─────────────────────────────────────────────────────────────────────
        // Step 3: Scan the box
        // ─────────────────────────────────────────────────────────────────────
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);

                let w0 = Self::edge_function(v1, v2, p);
                let w1 = Self::edge_function(v2, v0, p);
                let w2 = Self::edge_function(v0, v1, p);

                let inside = if area > 0.0 {
                    w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0
                } else {
                    w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0
                };
                if !inside {
                    continue;
                }

                let lambda = [w0 * inv_area, w1 * inv_area, w2 * inv_area];
                let z = 1.0 / (lambda[0] * inv_z[0] + lambda[1] * inv_z[1] + lambda[2] * inv_z[2]);

                let Some(idx) = depth.index(x, y) else {
                    return FillResult::OutOfBounds;
                };
                if !depth.test_and_set(idx, z) {
                    continue;
                }

                // Perspective-correct weights
                let pc = [
                    lambda[0] * inv_z[0] * z,
                    lambda[1] * inv_z[1] * z,
                    lambda[2] * inv_z[2] * z,
                ];
                let fragment = Fragment {
                    x,
                    y,
                    lambda,
                    depth: z,
                    normal: interpolate3(triangle.normals, pc),
                    tex_coord: interpolate2(triangle.tex_coords, pc),
                };

                let (r, g, b, a) = colors::unpack_argb(shader.shade(&fragment));
                surface.set_draw_color(r, g, b, a);
                surface.draw_point(x, y);
                pixels_written += 1;
            }
        }

        FillResult::Filled { pixels_written }
    }
}

#[inline]
fn interpolate3(values: [Vec3; 3], weights: [f32; 3]) -> Vec3 {
    values[0] * weights[0] + values[1] * weights[1] + values[2] * weights[2]
}

#[inline]
fn interpolate2(values: [Vec2; 3], weights: [f32; 3]) -> Vec2 {
    values[0] * weights[0] + values[1] * weights[1] + values[2] * weights[2]
}
