//! A CPU-based software 3D rasterizer.
//!
//! Triangle meshes are carried from world space through a look-at camera and
//! a perspective projection into raster space, clipped against the image,
//! scan-converted with edge functions, depth-tested and Phong-shaded. All
//! rendering is done on the CPU; output goes to any [`DisplaySurface`].
//!
//! # Quick Start
//!
//! ```no_run
//! use pinhole::prelude::*;
//!
//! # fn main() -> pinhole::Result<()> {
//! let projection = Projection::new(90.0, 0.1, 100.0, 600, 400)?;
//! let camera = Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::UP, projection)?;
//! let mut engine = Engine::new(camera);
//!
//! let models = [Model::with_mesh("cube", Mesh::cube())];
//! let mut surface = PixelBuffer::new(600, 400);
//! engine.render_scene(&models, &mut surface);
//! surface.save("cube.png")?;
//! # Ok(())
//! # }
//! ```

// Public API - exposed to library consumers
pub mod camera;
pub mod clipping;
pub mod colors;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod light;
pub mod math;
pub mod mesh;
pub mod model;
pub mod projection;
pub mod render;
pub mod texture;
#[cfg(feature = "window")]
pub mod window;

// Re-export commonly needed types at crate root for convenience
pub use camera::{Camera, PixelCoordinates};
pub use display::DisplaySurface;
pub use engine::{Engine, FrameStats, RenderMode};
pub use error::{Error, Result};
pub use mesh::Mesh;
pub use model::Model;
pub use projection::Projection;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use pinhole::prelude::*;
/// ```
pub mod prelude {
    // Camera
    pub use crate::camera::{Camera, PixelCoordinates};
    pub use crate::projection::Projection;

    // Engine
    pub use crate::config::SceneConfig;
    pub use crate::engine::{Engine, FrameStats, RenderMode};

    // Scene
    pub use crate::light::DirectionalLight;
    pub use crate::mesh::{Mesh, Triangle, Vertex};
    pub use crate::model::Model;
    pub use crate::texture::Texture;

    // Math
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;

    // Rendering
    pub use crate::display::DisplaySurface;
    pub use crate::render::{PixelBuffer, ShadingParams};

    // Window & Input
    #[cfg(feature = "window")]
    pub use crate::window::{FrameLimiter, Window, WindowEvent};
}
