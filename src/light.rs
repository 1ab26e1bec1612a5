//! Lighting types for the renderer.

use crate::math::vec3::Vec3;

/// A directional light that illuminates the scene uniformly from a direction.
///
/// Directional lights are ideal for simulating distant light sources like the sun,
/// where all rays are effectively parallel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// The normalized direction the light is pointing (not where it comes from).
    direction: Vec3,
}

impl Default for DirectionalLight {
    /// Light shining down -Z, i.e. away from a default camera at +Z.
    fn default() -> Self {
        Self::new(Vec3::BACK)
    }
}

impl DirectionalLight {
    /// Create a new directional light pointing in the given direction.
    /// The direction will be normalized automatically.
    pub fn new(direction: Vec3) -> Self {
        DirectionalLight {
            direction: direction.normalize(),
        }
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Lambert term: cosine between the normal and the direction toward the
    /// light, clamped to [0, 1].
    pub fn intensity(&self, normal: Vec3) -> f32 {
        // Negate direction: light pointing at surface = positive dot product
        (-self.direction).dot(normal.normalize()).max(0.0)
    }

    /// Mirror reflection of the light direction about `normal` (unit length).
    pub fn reflect(&self, normal: Vec3) -> Vec3 {
        self.direction - normal * (2.0 * normal.dot(self.direction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_direct_illumination() {
        let light = DirectionalLight::new(Vec3::new(0.0, 0.0, -1.0));
        let normal = Vec3::new(0.0, 0.0, 1.0);
        assert_relative_eq!(light.intensity(normal), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_no_illumination() {
        let light = DirectionalLight::new(Vec3::new(0.0, 0.0, -1.0));
        let normal = Vec3::new(0.0, 0.0, -1.0);
        assert_eq!(light.intensity(normal), 0.0);
    }

    #[test]
    fn test_angled_illumination() {
        let light = DirectionalLight::new(Vec3::new(0.0, -1.0, 0.0));
        let normal = Vec3::new(0.0, 1.0, 1.0);
        assert_relative_eq!(light.intensity(normal), 0.70710677, epsilon = 1e-5);
    }

    #[test]
    fn reflection_bounces_off_facing_surface() {
        let light = DirectionalLight::new(Vec3::new(1.0, -1.0, 0.0));
        let r = light.reflect(Vec3::UP);
        assert_relative_eq!(r.x, light.direction().x, epsilon = 1e-6);
        assert_relative_eq!(r.y, -light.direction().y, epsilon = 1e-6);
    }
}
