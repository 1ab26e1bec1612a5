//! Perspective projection parameters.
//!
//! The [`Projection`] struct is the single source of truth for the camera's
//! field of view, clip distances and raster size. Everything derived from those
//! (the near-plane viewport bounds and the window matrix) is computed once,
//! when a parameter changes, so projecting a point never mutates state.

use crate::error::{Error, Result};
use crate::math::mat4::Mat4;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;

/// The visible window on the near plane, in camera-space units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportBounds {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

impl ViewportBounds {
    /// Returns true if a near-plane point lies inside the window (edges included).
    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.right && y >= self.bottom && y <= self.top
    }
}

/// Perspective projection parameters plus their derived state.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    /// Vertical field of view in degrees.
    fov_y_degrees: f32,
    z_near: f32,
    z_far: f32,
    width: u32,
    height: u32,

    bounds: ViewportBounds,
    window_matrix: Mat4,
}

impl Projection {
    /// Creates a new projection.
    ///
    /// # Arguments
    /// * `fov_y_degrees` - Vertical field of view, in `(0, 180)`
    /// * `z_near` - Near clipping distance (must be > 0)
    /// * `z_far` - Far clipping distance (must be > `z_near`)
    /// * `width`, `height` - Raster size in pixels (both non-zero)
    pub fn new(fov_y_degrees: f32, z_near: f32, z_far: f32, width: u32, height: u32) -> Result<Self> {
        validate(fov_y_degrees, z_near, z_far, width, height)?;

        let mut projection = Self {
            fov_y_degrees,
            z_near,
            z_far,
            width,
            height,
            bounds: ViewportBounds {
                left: 0.0,
                right: 0.0,
                bottom: 0.0,
                top: 0.0,
            },
            window_matrix: Mat4::identity(),
        };
        projection.update_derived();
        Ok(projection)
    }

    fn update_derived(&mut self) {
        let top = self.z_near * (self.fov_y_degrees.to_radians() / 2.0).tan();
        let right = top * self.aspect_ratio();
        self.bounds = ViewportBounds {
            left: -right,
            right,
            bottom: -top,
            top,
        };
        self.window_matrix = Mat4::frustum(-right, right, -top, top, self.z_near, self.z_far);
    }

    /// Returns the vertical field of view in degrees.
    pub fn fov_y_degrees(&self) -> f32 {
        self.fov_y_degrees
    }

    /// Returns the aspect ratio (width / height).
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn z_near(&self) -> f32 {
        self.z_near
    }

    pub fn z_far(&self) -> f32 {
        self.z_far
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bounds(&self) -> ViewportBounds {
        self.bounds
    }

    pub fn window_matrix(&self) -> Mat4 {
        self.window_matrix
    }

    /// Changes the field of view and recomputes the viewport bounds.
    pub fn set_fov_y_degrees(&mut self, fov_y_degrees: f32) -> Result<()> {
        validate(fov_y_degrees, self.z_near, self.z_far, self.width, self.height)?;
        self.fov_y_degrees = fov_y_degrees;
        self.update_derived();
        Ok(())
    }

    /// Changes the clip distances and recomputes the window matrix.
    pub fn set_clip_planes(&mut self, z_near: f32, z_far: f32) -> Result<()> {
        validate(self.fov_y_degrees, z_near, z_far, self.width, self.height)?;
        self.z_near = z_near;
        self.z_far = z_far;
        self.update_derived();
        Ok(())
    }

    /// Changes the raster size (typically on window resize).
    pub fn set_image_size(&mut self, width: u32, height: u32) -> Result<()> {
        validate(self.fov_y_degrees, self.z_near, self.z_far, width, height)?;
        self.width = width;
        self.height = height;
        self.update_derived();
        Ok(())
    }

    /// Maps a point on the near plane to normalized device coordinates.
    #[inline]
    pub fn to_ndc(&self, near_point: Vec3) -> Vec3 {
        self.window_matrix.transform_point(near_point)
    }

    /// Maps normalized device coordinates to raster space (origin top-left, Y down).
    #[inline]
    pub fn ndc_to_raster(&self, ndc: Vec3) -> Vec2 {
        Vec2::new(
            (1.0 + ndc.x) / 2.0 * self.width as f32,
            (1.0 - ndc.y) / 2.0 * self.height as f32,
        )
    }
}

fn validate(fov_y_degrees: f32, z_near: f32, z_far: f32, width: u32, height: u32) -> Result<()> {
    if !(fov_y_degrees > 0.0 && fov_y_degrees < 180.0) {
        return Err(Error::InvalidProjection(format!(
            "field of view must be in (0, 180) degrees, got {fov_y_degrees}"
        )));
    }
    if !(z_near > 0.0 && z_far > z_near) {
        return Err(Error::InvalidProjection(format!(
            "clip distances must satisfy 0 < near < far, got near={z_near} far={z_far}"
        )));
    }
    if width == 0 || height == 0 {
        return Err(Error::InvalidProjection(format!(
            "image size must be non-zero, got {width}x{height}"
        )));
    }
    Ok(())
}
