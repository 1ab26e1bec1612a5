//! Raster-space clipping against the render target rectangle.
//!
//! Uses Cohen-Sutherland outcodes: every point is classified against the
//! rectangle `[0, width] x [0, height]` with one bit per violated boundary.
//! The same outcodes give a trivial reject for whole triangles.

use bitflags::bitflags;

use crate::math::vec2::Vec2;

/// Upper bound on endpoint replacements; each step moves one endpoint onto a
/// boundary, so well-formed input finishes in at most four.
const MAX_CLIP_ITERATIONS: usize = 8;

bitflags! {
    /// Position of a point relative to the clip rectangle.
    ///
    /// `TOP` and `BOTTOM` (and `RIGHT` and `LEFT`) are mutually exclusive.
    /// `TOP` means `y > height`, which is the bottom edge of the image since
    /// raster Y grows downward.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct OutCode: u8 {
        const LEFT = 0b0001;
        const RIGHT = 0b0010;
        const BOTTOM = 0b0100;
        const TOP = 0b1000;
    }
}

impl OutCode {
    /// Classifies `p` against `[0, width] x [0, height]`.
    pub fn of(p: Vec2, width: f32, height: f32) -> Self {
        let mut code = OutCode::empty();

        if p.y > height {
            code |= OutCode::TOP;
        } else if p.y < 0.0 {
            code |= OutCode::BOTTOM;
        }

        if p.x > width {
            code |= OutCode::RIGHT;
        } else if p.x < 0.0 {
            code |= OutCode::LEFT;
        }

        code
    }

    /// Returns true if all points lie outside the same boundary, meaning
    /// nothing spanned by them can reach the rectangle.
    pub fn shared_outside(points: &[Vec2], width: f32, height: f32) -> bool {
        points
            .iter()
            .map(|&p| OutCode::of(p, width, height))
            .fold(OutCode::all(), |acc, code| acc & code)
            != OutCode::empty()
    }
}

/// Clips the segment `p0 -> p1` to `[0, width] x [0, height]`.
///
/// Returns the visible sub-segment, or `None` if nothing of it is visible.
/// A boundary parallel to the segment is skipped rather than divided by.
pub fn clip_line(mut p0: Vec2, mut p1: Vec2, width: f32, height: f32) -> Option<(Vec2, Vec2)> {
    let mut code0 = OutCode::of(p0, width, height);
    let mut code1 = OutCode::of(p1, width, height);

    for _ in 0..MAX_CLIP_ITERATIONS {
        if (code0 | code1).is_empty() {
            return Some((p0, p1));
        }
        if !(code0 & code1).is_empty() {
            return None;
        }

        let outside_is_p0 = !code0.is_empty();
        let code_out = if outside_is_p0 { code0 } else { code1 };
        let intersection = boundary_intersection(p0, p1, code_out, width, height)?;

        if outside_is_p0 {
            p0 = intersection;
            code0 = OutCode::of(p0, width, height);
        } else {
            p1 = intersection;
            code1 = OutCode::of(p1, width, height);
        }
    }

    None
}

/// Intersects the line through `p0`, `p1` with the first boundary in `code`
/// (TOP, BOTTOM, RIGHT, LEFT) that the line is not parallel to.
fn boundary_intersection(p0: Vec2, p1: Vec2, code: OutCode, width: f32, height: f32) -> Option<Vec2> {
    let dx = p1.x - p0.x;
    let dy = p1.y - p0.y;

    let horizontal = |y: f32| Vec2::new(p0.x + dx * (y - p0.y) / dy, y);
    let vertical = |x: f32| Vec2::new(x, p0.y + dy * (x - p0.x) / dx);

    if code.contains(OutCode::TOP) && dy != 0.0 {
        Some(horizontal(height))
    } else if code.contains(OutCode::BOTTOM) && dy != 0.0 {
        Some(horizontal(0.0))
    } else if code.contains(OutCode::RIGHT) && dx != 0.0 {
        Some(vertical(width))
    } else if code.contains(OutCode::LEFT) && dx != 0.0 {
        Some(vertical(0.0))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const W: f32 = 600.0;
    const H: f32 = 400.0;

    #[test]
    fn outcode_bits_are_exclusive_per_axis() {
        assert_eq!(OutCode::of(Vec2::new(10.0, 10.0), W, H), OutCode::empty());
        assert_eq!(OutCode::of(Vec2::new(-1.0, 500.0), W, H), OutCode::LEFT | OutCode::TOP);
        assert_eq!(OutCode::of(Vec2::new(700.0, -3.0), W, H), OutCode::RIGHT | OutCode::BOTTOM);
    }

    #[test]
    fn edges_of_the_rectangle_are_inside() {
        assert!(OutCode::of(Vec2::new(0.0, 0.0), W, H).is_empty());
        assert!(OutCode::of(Vec2::new(W, H), W, H).is_empty());
    }

    #[test]
    fn inside_segment_is_unchanged() {
        let a = Vec2::new(10.0, 20.0);
        let b = Vec2::new(300.0, 350.0);
        assert_eq!(clip_line(a, b, W, H), Some((a, b)));
    }

    #[test]
    fn segment_beyond_one_side_is_rejected() {
        let a = Vec2::new(650.0, 10.0);
        let b = Vec2::new(900.0, 300.0);
        assert_eq!(clip_line(a, b, W, H), None);
    }

    #[test]
    fn crossing_segment_is_cut_at_the_boundary() {
        let (a, b) = clip_line(Vec2::new(-100.0, 200.0), Vec2::new(300.0, 200.0), W, H).unwrap();
        assert_relative_eq!(a.x, 0.0);
        assert_relative_eq!(a.y, 200.0);
        assert_eq!(b, Vec2::new(300.0, 200.0));
    }

    #[test]
    fn segment_spanning_the_image_is_cut_twice() {
        let (a, b) = clip_line(Vec2::new(-300.0, -200.0), Vec2::new(900.0, 600.0), W, H).unwrap();
        assert_relative_eq!(a.x, 0.0, epsilon = 1e-3);
        assert_relative_eq!(a.y, 0.0, epsilon = 1e-3);
        assert_relative_eq!(b.x, 600.0, epsilon = 1e-3);
        assert_relative_eq!(b.y, 400.0, epsilon = 1e-3);
    }

    #[test]
    fn diagonal_corner_miss_is_rejected() {
        // Both endpoints outside on different sides, line passes beyond the corner.
        assert_eq!(
            clip_line(Vec2::new(-50.0, 380.0), Vec2::new(30.0, 500.0), W, H),
            None
        );
    }

    #[test]
    fn vertical_segment_skips_parallel_boundaries() {
        let (a, b) = clip_line(Vec2::new(100.0, -50.0), Vec2::new(100.0, 450.0), W, H).unwrap();
        assert_eq!(a, Vec2::new(100.0, 0.0));
        assert_eq!(b, Vec2::new(100.0, 400.0));
    }

    #[test]
    fn shared_outside_detects_trivial_reject() {
        let right = [
            Vec2::new(610.0, 0.0),
            Vec2::new(700.0, 100.0),
            Vec2::new(650.0, 500.0),
        ];
        assert!(OutCode::shared_outside(&right, W, H));

        let straddling = [
            Vec2::new(-10.0, 10.0),
            Vec2::new(700.0, 10.0),
            Vec2::new(300.0, 500.0),
        ];
        assert!(!OutCode::shared_outside(&straddling, W, H));
    }
}
