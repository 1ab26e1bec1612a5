//! Scene configuration.
//!
//! Scenes are described in RON (Rusty Object Notation). Every field is
//! optional; anything left out takes the default below.
//!
//! ```ron
//! (
//!     camera: (
//!         eye: (x: 0.0, y: 1.0, z: 4.0),
//!         fov: 60.0,
//!         width: 800,
//!         height: 600,
//!     ),
//!     render_mode: FilledWireframe,
//!     models: [
//!         (obj: "assets/crate.obj", texture: Some("assets/crate.png")),
//!     ],
//! )
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::camera::Camera;
use crate::engine::{Engine, RenderMode};
use crate::error::Result;
use crate::light::DirectionalLight;
use crate::math::vec3::Vec3;
use crate::mesh::Mesh;
use crate::model::Model;
use crate::projection::Projection;
use crate::render::rasterizer::shader::ShadingParams;
use crate::texture::Texture;

/// Top-level scene description.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub camera: CameraConfig,
    pub render_mode: RenderMode,
    pub backface_culling: bool,
    pub shading: ShadingConfig,
    /// Models to load. An empty list renders the built-in cube.
    pub models: Vec<ModelConfig>,
}

/// Camera placement and projection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub width: u32,
    pub height: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            up: Vec3::UP,
            fov: 90.0,
            near: 0.1,
            far: 100.0,
            width: 600,
            height: 400,
        }
    }
}

/// Phong coefficients and the light direction. Colors are RGB in `[0, 255]`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShadingConfig {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
    pub light_direction: Vec3,
}

impl Default for ShadingConfig {
    fn default() -> Self {
        let params = ShadingParams::default();
        Self {
            ambient: params.ambient,
            diffuse: params.diffuse,
            specular: params.specular,
            shininess: params.shininess,
            light_direction: Vec3::BACK,
        }
    }
}

impl ShadingConfig {
    pub fn params(&self) -> ShadingParams {
        ShadingParams {
            ambient: self.ambient,
            diffuse: self.diffuse,
            specular: self.specular,
            shininess: self.shininess,
        }
    }

    pub fn light(&self) -> DirectionalLight {
        DirectionalLight::new(self.light_direction)
    }
}

/// One OBJ file and an optional texture image. Relative paths are resolved
/// against the directory of the scene file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelConfig {
    pub obj: PathBuf,
    #[serde(default)]
    pub texture: Option<PathBuf>,
}

impl SceneConfig {
    /// Reads and parses a scene file. Relative model paths are rebased onto
    /// the file's directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let mut config = Self::from_str(&contents)?;

        if let Some(base) = path.parent() {
            for model in &mut config.models {
                model.obj = base.join(&model.obj);
                if let Some(texture) = model.texture.as_mut() {
                    *texture = base.join(&*texture);
                }
            }
        }

        log::info!("Loaded scene '{}' ({} models)", path.display(), config.models.len());
        Ok(config)
    }

    /// Parses a scene from a RON string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        Ok(ron::from_str(s)?)
    }

    /// Builds the camera, validating the projection parameters and the
    /// eye/target/up basis.
    pub fn build_camera(&self) -> Result<Camera> {
        let c = &self.camera;
        let projection = Projection::new(c.fov, c.near, c.far, c.width, c.height)?;
        Camera::new(c.eye, c.target, c.up, projection)
    }

    /// Builds a fully configured engine.
    pub fn build_engine(&self) -> Result<Engine> {
        let mut engine = Engine::new(self.build_camera()?);
        engine.set_render_mode(self.render_mode);
        engine.set_shading(self.shading.params());
        engine.set_light(self.shading.light());
        engine.backface_culling = self.backface_culling;
        Ok(engine)
    }

    /// Loads every configured model, or the built-in cube if none are listed.
    pub fn load_models(&self) -> Result<Vec<Model>> {
        if self.models.is_empty() {
            return Ok(vec![Model::with_mesh("cube", Mesh::cube())]);
        }

        self.models
            .iter()
            .map(|entry| {
                let name = entry
                    .obj
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "model".to_string());
                let mut model = Model::from_obj(name, &entry.obj)?;
                if let Some(texture) = &entry.texture {
                    model.set_texture(Texture::from_file(texture)?);
                }
                Ok(model)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use approx::assert_relative_eq;

    #[test]
    fn empty_scene_uses_defaults() {
        let config = SceneConfig::from_str("()").unwrap();
        assert_eq!(config, SceneConfig::default());
        assert_eq!(config.camera.width, 600);
        assert_eq!(config.camera.height, 400);
        assert_eq!(config.render_mode, RenderMode::Filled);
        assert!(!config.backface_culling);
    }

    #[test]
    fn partial_camera_keeps_other_defaults() {
        let config = SceneConfig::from_str(
            "(camera: (fov: 60.0, eye: (x: 1.0, y: 2.0, z: 3.0)), render_mode: Wireframe)",
        )
        .unwrap();
        assert_relative_eq!(config.camera.fov, 60.0);
        assert_eq!(config.camera.eye, Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(config.camera.near, 0.1);
        assert_eq!(config.render_mode, RenderMode::Wireframe);
    }

    #[test]
    fn models_and_shading_parse() {
        let config = SceneConfig::from_str(
            r#"(
                shading: (shininess: 16.0, light_direction: (x: 0.0, y: -1.0, z: 0.0)),
                models: [(obj: "a.obj"), (obj: "b.obj", texture: Some("b.png"))],
            )"#,
        )
        .unwrap();
        assert_eq!(config.models.len(), 2);
        assert_eq!(config.models[0].texture, None);
        assert_eq!(config.models[1].texture, Some(PathBuf::from("b.png")));
        assert_relative_eq!(config.shading.shininess, 16.0);
        assert_eq!(config.shading.ambient, Vec3::splat(120.0));
        assert_eq!(config.shading.light().direction(), Vec3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn malformed_scene_is_a_config_error() {
        let err = SceneConfig::from_str("(camera: (fov: \"wide\"))").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn invalid_projection_is_reported() {
        let config = SceneConfig::from_str("(camera: (near: 10.0, far: 1.0))").unwrap();
        assert!(matches!(config.build_camera(), Err(Error::InvalidProjection(_))));
    }

    #[test]
    fn degenerate_up_is_reported() {
        let config = SceneConfig::from_str("(camera: (up: (x: 0.0, y: 0.0, z: 1.0)))").unwrap();
        assert!(matches!(config.build_camera(), Err(Error::DegenerateBasis)));
    }

    #[test]
    fn engine_takes_configured_settings() {
        let config =
            SceneConfig::from_str("(render_mode: FilledWireframe, backface_culling: true)").unwrap();
        let engine = config.build_engine().unwrap();
        assert_eq!(engine.render_mode(), RenderMode::FilledWireframe);
        assert!(engine.backface_culling);
        assert_eq!(engine.shading(), ShadingParams::default());
    }

    #[test]
    fn no_models_falls_back_to_cube() {
        let models = SceneConfig::default().load_models().unwrap();
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].triangle_count(), 12);
    }

    #[test]
    fn missing_obj_is_an_error() {
        let config = SceneConfig::from_str(r#"(models: [(obj: "does/not/exist.obj")])"#).unwrap();
        assert!(config.load_models().is_err());
    }
}
