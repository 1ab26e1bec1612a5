//! Look-at camera.
//!
//! # Coordinate System
//!
//! World space is **right-handed**. In camera space:
//! - X: positive right
//! - Y: positive up
//! - Z: positive toward the viewer, so the camera looks down **-Z**
//!
//! Depth is reported as the positive distance along the view direction
//! (`-z` in camera space). A point at or behind the eye has depth <= 0 and is
//! never projected.

use crate::error::{Error, Result};
use crate::math::mat4::Mat4;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::projection::Projection;

/// Vectors shorter than this are treated as zero when building the basis.
const BASIS_EPSILON: f32 = 1e-6;

/// Result of projecting a world-space point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelCoordinates {
    /// Position in raster space (origin top-left, Y down). Computed even when
    /// the point is outside the viewport so callers can clip edges against it.
    pub raster: Vec2,
    /// Distance in front of the eye along the view direction.
    pub depth: f32,
    /// Whether the point falls inside the near-plane viewport window.
    pub visible: bool,
}

/// A camera defined by eye, target and up hint, with a perspective projection.
#[derive(Debug, Clone)]
pub struct Camera {
    from: Vec3,
    at: Vec3,
    up: Vec3,
    projection: Projection,

    axis_x: Vec3,
    axis_y: Vec3,
    axis_z: Vec3,
    camera_to_world: Mat4,
    world_to_camera: Mat4,
}

impl Camera {
    /// Creates a camera at `from` looking toward `at`.
    ///
    /// Fails if the basis is degenerate (see [`Camera::look_at`]).
    pub fn new(from: Vec3, at: Vec3, up: Vec3, projection: Projection) -> Result<Self> {
        let mut camera = Self {
            from,
            at,
            up,
            projection,
            axis_x: Vec3::new(1.0, 0.0, 0.0),
            axis_y: Vec3::UP,
            axis_z: Vec3::new(0.0, 0.0, 1.0),
            camera_to_world: Mat4::identity(),
            world_to_camera: Mat4::identity(),
        };
        camera.look_at(from, at, up)?;
        Ok(camera)
    }

    /// Rebuilds the orthonormal basis and both transforms.
    ///
    /// `axis_z` points from `at` toward `from`; `axis_y` is `up` made
    /// orthogonal to `axis_z` (Gram-Schmidt); `axis_x = axis_y x axis_z`.
    ///
    /// Returns [`Error::DegenerateBasis`] if `from == at` or `up` is parallel
    /// to the view direction, and [`Error::SingularTransform`] if the
    /// camera-to-world matrix cannot be inverted. The camera is unchanged on
    /// error.
    pub fn look_at(&mut self, from: Vec3, at: Vec3, up: Vec3) -> Result<()> {
        let view = from - at;
        if view.magnitude() < BASIS_EPSILON {
            return Err(Error::DegenerateBasis);
        }
        let axis_z = view.normalize();

        let up_orthogonal = up - axis_z * up.dot(axis_z);
        if up_orthogonal.magnitude() < BASIS_EPSILON {
            return Err(Error::DegenerateBasis);
        }
        let axis_y = up_orthogonal.normalize();
        let axis_x = axis_y.cross(axis_z).normalize();

        let camera_to_world = Mat4::from_basis(axis_x, axis_y, axis_z, from);
        let world_to_camera = camera_to_world
            .inverse()
            .ok_or(Error::SingularTransform)?;

        self.from = from;
        self.at = at;
        self.up = up;
        self.axis_x = axis_x;
        self.axis_y = axis_y;
        self.axis_z = axis_z;
        self.camera_to_world = camera_to_world;
        self.world_to_camera = world_to_camera;
        Ok(())
    }

    /// Projects a world-space point to raster coordinates.
    ///
    /// Returns `None` for points at or behind the eye. Otherwise the point is
    /// moved to camera space, perspective-divided onto the near plane, run
    /// through the window matrix into NDC and mapped to pixels. `visible`
    /// reports whether the near-plane point lies within the viewport bounds.
    pub fn compute_pixel_coordinates(&self, p_world: Vec3) -> Option<PixelCoordinates> {
        let p_camera = self.world_to_camera.transform_point(p_world);
        let depth = -p_camera.z;
        if depth <= 0.0 {
            return None;
        }

        let near = self.projection.z_near();
        let near_point = Vec3::new(p_camera.x * near / depth, p_camera.y * near / depth, -near);

        let ndc = self.projection.to_ndc(near_point);
        let raster = self.projection.ndc_to_raster(ndc);
        let visible = self.projection.bounds().contains(near_point.x, near_point.y);

        Some(PixelCoordinates {
            raster,
            depth,
            visible,
        })
    }

    pub fn from(&self) -> Vec3 {
        self.from
    }

    pub fn at(&self) -> Vec3 {
        self.at
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn axis_x(&self) -> Vec3 {
        self.axis_x
    }

    pub fn axis_y(&self) -> Vec3 {
        self.axis_y
    }

    /// Unit vector from the target toward the eye.
    pub fn axis_z(&self) -> Vec3 {
        self.axis_z
    }

    pub fn camera_to_world(&self) -> Mat4 {
        self.camera_to_world
    }

    pub fn world_to_camera(&self) -> Mat4 {
        self.world_to_camera
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Mutable access for changing fov, clip planes or image size. The
    /// derived viewport bounds are updated by the projection's setters.
    pub fn projection_mut(&mut self) -> &mut Projection {
        &mut self.projection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn example_camera() -> Camera {
        let projection = Projection::new(90.0, 0.1, 100.0, 600, 400).unwrap();
        Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::UP, projection).unwrap()
    }

    fn assert_orthonormal(camera: &Camera) {
        let axes = [camera.axis_x(), camera.axis_y(), camera.axis_z()];
        for (i, a) in axes.iter().enumerate() {
            for (j, b) in axes.iter().enumerate() {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(a.dot(*b), expected, epsilon = 1e-5);
            }
        }
        // Right-handed: x cross y == z
        let z = camera.axis_x().cross(camera.axis_y());
        assert_relative_eq!(z.x, camera.axis_z().x, epsilon = 1e-5);
        assert_relative_eq!(z.y, camera.axis_z().y, epsilon = 1e-5);
        assert_relative_eq!(z.z, camera.axis_z().z, epsilon = 1e-5);
    }

    #[test]
    fn basis_is_orthonormal_for_many_setups() {
        let projection = Projection::new(60.0, 0.1, 100.0, 320, 240).unwrap();
        let setups = [
            (Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::UP),
            (Vec3::new(3.0, 4.0, -2.0), Vec3::new(1.0, 0.0, 1.0), Vec3::UP),
            (Vec3::new(-7.0, 2.0, 1.0), Vec3::ZERO, Vec3::new(0.3, 1.0, 0.2)),
            (Vec3::new(0.0, 10.0, 0.1), Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0)),
        ];
        for (from, at, up) in setups {
            let camera = Camera::new(from, at, up, projection).unwrap();
            assert_orthonormal(&camera);
        }
    }

    #[test]
    fn axis_z_points_from_target_to_eye() {
        let camera = example_camera();
        assert_relative_eq!(camera.axis_z().z, 1.0, epsilon = 1e-6);
        assert_relative_eq!(camera.axis_x().x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(camera.axis_y().y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn world_camera_round_trip() {
        let projection = Projection::new(75.0, 0.1, 100.0, 320, 240).unwrap();
        let camera = Camera::new(
            Vec3::new(2.0, -3.0, 7.0),
            Vec3::new(-1.0, 0.5, 0.0),
            Vec3::new(0.1, 1.0, 0.0),
            projection,
        )
        .unwrap();

        for p in [
            Vec3::ZERO,
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(-40.0, 12.5, 0.25),
        ] {
            let camera_space = camera.world_to_camera().transform_point(p);
            let back = camera.camera_to_world().transform_point(camera_space);
            assert_relative_eq!(back.x, p.x, epsilon = 1e-3);
            assert_relative_eq!(back.y, p.y, epsilon = 1e-3);
            assert_relative_eq!(back.z, p.z, epsilon = 1e-3);
        }
    }

    #[test]
    fn target_lands_on_negative_z_axis() {
        let camera = example_camera();
        let target = camera.world_to_camera().transform_point(Vec3::ZERO);
        assert_relative_eq!(target.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(target.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(target.z, -5.0, epsilon = 1e-5);
    }

    #[test]
    fn up_parallel_to_view_is_degenerate() {
        let projection = Projection::new(90.0, 0.1, 100.0, 10, 10).unwrap();
        let result = Camera::new(Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO, Vec3::UP, projection);
        assert!(matches!(result, Err(Error::DegenerateBasis)));
    }

    #[test]
    fn eye_equal_to_target_is_degenerate() {
        let projection = Projection::new(90.0, 0.1, 100.0, 10, 10).unwrap();
        let result = Camera::new(Vec3::ONE, Vec3::ONE, Vec3::UP, projection);
        let err = result.unwrap_err();
        assert!(matches!(err, Error::DegenerateBasis));
        assert!(err.to_string().contains("eye equals target"));
    }

    #[test]
    fn failed_look_at_leaves_camera_unchanged() {
        let mut camera = example_camera();
        let before = camera.world_to_camera();
        assert!(camera.look_at(Vec3::UP, Vec3::ZERO, Vec3::UP).is_err());
        assert_eq!(camera.world_to_camera(), before);
        assert_eq!(camera.from(), Vec3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn eye_position_is_never_visible() {
        let camera = example_camera();
        assert!(camera.compute_pixel_coordinates(camera.from()).is_none());
    }

    #[test]
    fn points_behind_the_camera_are_rejected() {
        let camera = example_camera();
        assert!(camera
            .compute_pixel_coordinates(Vec3::new(0.0, 0.0, 6.0))
            .is_none());
    }

    #[test]
    fn target_projects_to_image_center() {
        let camera = example_camera();
        let p = camera.compute_pixel_coordinates(Vec3::ZERO).unwrap();
        assert!(p.visible);
        assert_relative_eq!(p.raster.x, 300.0, epsilon = 1e-3);
        assert_relative_eq!(p.raster.y, 200.0, epsilon = 1e-3);
        assert_relative_eq!(p.depth, 5.0, epsilon = 1e-5);
    }

    #[test]
    fn example_triangle_projects_with_preserved_layout() {
        // fov 90, aspect 1.5, depth 5: x_ndc = x / 7.5, y_ndc = y / 5
        let camera = example_camera();
        let a = camera.compute_pixel_coordinates(Vec3::new(-1.0, -1.0, 0.0)).unwrap();
        let b = camera.compute_pixel_coordinates(Vec3::new(1.0, -1.0, 0.0)).unwrap();
        let c = camera.compute_pixel_coordinates(Vec3::new(0.0, 1.0, 0.0)).unwrap();

        assert!(a.visible && b.visible && c.visible);
        assert_relative_eq!(a.raster.x, 260.0, epsilon = 1e-2);
        assert_relative_eq!(a.raster.y, 240.0, epsilon = 1e-2);
        assert_relative_eq!(b.raster.x, 340.0, epsilon = 1e-2);
        assert_relative_eq!(c.raster.y, 160.0, epsilon = 1e-2);

        // Left-to-right and top-to-bottom order survive the Y flip.
        assert!(a.raster.x < c.raster.x && c.raster.x < b.raster.x);
        assert!(c.raster.y < a.raster.y);
    }

    #[test]
    fn visibility_agrees_with_raster_bounds() {
        let camera = example_camera();
        let inside = camera
            .compute_pixel_coordinates(Vec3::new(7.0, 4.9, 0.0))
            .unwrap();
        assert!(inside.visible);
        assert!(inside.raster.x <= 600.0 && inside.raster.y >= 0.0);

        let outside = camera
            .compute_pixel_coordinates(Vec3::new(8.0, 0.0, 0.0))
            .unwrap();
        assert!(!outside.visible);
        assert!(outside.raster.x > 600.0);
    }

    #[test]
    fn projection_is_repeatable() {
        let camera = example_camera();
        let p = Vec3::new(0.3, -0.7, -2.0);
        assert_eq!(
            camera.compute_pixel_coordinates(p),
            camera.compute_pixel_coordinates(p)
        );
    }
}
