//! Pixel shaders for triangle rasterization.
//!
//! The rasterizer owns coverage, depth and attribute interpolation; a
//! [`PixelShader`] only turns a finished [`Fragment`] into a color. This keeps
//! the same split GPUs make between fixed-function rasterization and
//! programmable fragment shading.

use super::Fragment;
use crate::colors;
use crate::light::DirectionalLight;
use crate::math::vec3::Vec3;
use crate::texture::Texture;

/// Normals shorter than this carry no usable direction.
const MIN_NORMAL_LENGTH: f32 = 1e-6;

/// Trait for per-pixel shading computations.
///
/// Called once for each fragment that passed the depth test.
pub trait PixelShader {
    /// Compute the ARGB8888 color of `fragment`.
    fn shade(&self, fragment: &Fragment) -> u32;
}

/// Phong material and lighting coefficients. Colors are RGB in `[0, 255]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadingParams {
    pub ambient: Vec3,
    /// Diffuse reflectance (Kd). Replaced by the texel when a texture is bound.
    pub diffuse: Vec3,
    /// Specular reflectance (Ks).
    pub specular: Vec3,
    pub shininess: f32,
}

impl Default for ShadingParams {
    fn default() -> Self {
        Self {
            ambient: Vec3::splat(120.0),
            diffuse: Vec3::splat(30.0),
            specular: Vec3::splat(50.0),
            shininess: 4.0,
        }
    }
}

/// Phong shader with an optional diffuse texture.
///
/// ```text
/// color = ambient + Kd * max(0, n . -L) + Ks * max(0, V . R)^shininess
/// R     = L - 2 (n . L) n
/// ```
///
/// `V` is the camera's backward axis, so specular highlights appear where
/// light bounces straight back toward the viewer. Each channel is clamped to
/// `[0, 255]` after summation.
pub struct PhongShader<'a> {
    params: ShadingParams,
    light: DirectionalLight,
    view_dir: Vec3,
    texture: Option<&'a Texture>,
}

impl<'a> PhongShader<'a> {
    pub fn new(params: ShadingParams, light: DirectionalLight, view_dir: Vec3) -> Self {
        Self {
            params,
            light,
            view_dir,
            texture: None,
        }
    }

    /// Samples `texture` for the diffuse reflectance instead of `Kd`.
    pub fn with_texture(mut self, texture: Option<&'a Texture>) -> Self {
        self.texture = texture;
        self
    }
}

impl PixelShader for PhongShader<'_> {
    fn shade(&self, fragment: &Fragment) -> u32 {
        let mut color = self.params.ambient;

        if fragment.normal.magnitude() > MIN_NORMAL_LENGTH {
            let normal = fragment.normal.normalize();

            let kd = match self.texture {
                Some(texture) => {
                    colors::to_vec3(texture.sample(fragment.tex_coord.x, fragment.tex_coord.y))
                }
                None => self.params.diffuse,
            };
            let lambert = self.light.intensity(normal);
            color += kd * lambert;

            // Back-lit surfaces get no highlight.
            if lambert > 0.0 {
                let highlight = self.view_dir.dot(self.light.reflect(normal)).max(0.0);
                color += self.params.specular * highlight.powf(self.params.shininess);
            }
        }

        let (r, g, b) = colors::to_rgb8(color);
        colors::pack_argb(r, g, b, 255)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec2::Vec2;

    fn fragment(normal: Vec3, tex_coord: Vec2) -> Fragment {
        Fragment {
            x: 0,
            y: 0,
            lambda: [1.0, 0.0, 0.0],
            depth: 1.0,
            normal,
            tex_coord,
        }
    }

    fn head_on() -> PhongShader<'static> {
        PhongShader::new(
            ShadingParams::default(),
            DirectionalLight::new(Vec3::new(0.0, 0.0, -1.0)),
            Vec3::new(0.0, 0.0, 1.0),
        )
    }

    #[test]
    fn facing_surface_gets_full_diffuse_and_specular() {
        // 120 ambient + 30 diffuse + 50 specular
        let color = head_on().shade(&fragment(Vec3::new(0.0, 0.0, 1.0), Vec2::ZERO));
        assert_eq!(colors::unpack_argb(color), (200, 200, 200, 255));
    }

    #[test]
    fn unnormalized_normals_shade_the_same() {
        let shader = head_on();
        let a = shader.shade(&fragment(Vec3::new(0.0, 0.0, 1.0), Vec2::ZERO));
        let b = shader.shade(&fragment(Vec3::new(0.0, 0.0, 7.5), Vec2::ZERO));
        assert_eq!(a, b);
    }

    #[test]
    fn surface_facing_away_is_ambient_only() {
        let color = head_on().shade(&fragment(Vec3::new(0.0, 0.0, -1.0), Vec2::ZERO));
        assert_eq!(colors::unpack_argb(color), (120, 120, 120, 255));
    }

    #[test]
    fn zero_normal_is_ambient_only() {
        let color = head_on().shade(&fragment(Vec3::ZERO, Vec2::ZERO));
        assert_eq!(colors::unpack_argb(color), (120, 120, 120, 255));
    }

    #[test]
    fn texture_replaces_diffuse_reflectance() {
        let texture = Texture::from_pixels(1, 1, vec![colors::pack_argb(100, 0, 20, 255)]).unwrap();
        let shader = head_on().with_texture(Some(&texture));
        let color = shader.shade(&fragment(Vec3::new(0.0, 0.0, 1.0), Vec2::new(0.5, 0.5)));
        assert_eq!(colors::unpack_argb(color), (255, 170, 190, 255));
    }

    #[test]
    fn channels_are_clamped() {
        let params = ShadingParams {
            ambient: Vec3::new(-50.0, 240.0, 0.0),
            ..ShadingParams::default()
        };
        let shader = PhongShader::new(
            params,
            DirectionalLight::new(Vec3::new(0.0, 0.0, -1.0)),
            Vec3::new(0.0, 0.0, 1.0),
        );
        let color = shader.shade(&fragment(Vec3::new(0.0, 0.0, 1.0), Vec2::ZERO));
        assert_eq!(colors::unpack_argb(color), (30, 255, 80, 255));
    }
}
