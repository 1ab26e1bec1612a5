//! Core rendering engine.
//!
//! The [`Engine`] struct is the scene driver. It owns the camera, the depth
//! buffer and the shading setup, and for every frame walks models, meshes and
//! triangles: project, reject, rasterize, shade, write to the display surface.

use serde::Deserialize;

use crate::camera::Camera;
use crate::clipping::{self, OutCode};
use crate::colors;
use crate::display::DisplaySurface;
use crate::error::Result;
use crate::light::DirectionalLight;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::mesh::Triangle;
use crate::model::Model;
use crate::render::depth::DepthBuffer;
use crate::render::rasterizer::shader::{PhongShader, ShadingParams};
use crate::render::rasterizer::{EdgeFunctionRasterizer, FillResult, ScreenTriangle};

/// Rendering mode presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum RenderMode {
    /// Shaded, depth-tested triangles (key: 1)
    #[default]
    Filled,
    /// Clipped triangle edges only (key: 2)
    Wireframe,
    /// Filled + wireframe (key: 3)
    FilledWireframe,
}

impl RenderMode {
    fn draws_filled(self) -> bool {
        matches!(self, RenderMode::Filled | RenderMode::FilledWireframe)
    }

    fn draws_wireframe(self) -> bool {
        matches!(self, RenderMode::Wireframe | RenderMode::FilledWireframe)
    }
}

/// Per-frame triangle and pixel counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Triangles handed to the engine.
    pub submitted: usize,
    /// Dropped by back-face culling.
    pub culled: usize,
    /// Dropped because a vertex could not be projected into `[near, far]`,
    /// all vertices were outside the same image edge, the triangle had no
    /// area, or it did not fit the depth buffer.
    pub rejected: usize,
    /// Triangles that reached the rasterizer or the line drawer.
    pub rasterized: usize,
    /// Pixels that passed the depth test and were written.
    pub pixels_written: usize,
}

pub struct Engine {
    camera: Camera,
    depth_buffer: DepthBuffer,
    rasterizer: EdgeFunctionRasterizer,
    light: DirectionalLight,
    shading: ShadingParams,
    render_mode: RenderMode,
    pub backface_culling: bool,
}

impl Engine {
    /// Creates an engine rendering through `camera`, with a depth buffer
    /// sized to the camera's image.
    pub fn new(camera: Camera) -> Self {
        let projection = camera.projection();
        let depth_buffer = DepthBuffer::new(projection.width(), projection.height());

        Self {
            camera,
            depth_buffer,
            rasterizer: EdgeFunctionRasterizer::new(),
            light: DirectionalLight::default(),
            shading: ShadingParams::default(),
            render_mode: RenderMode::default(),
            backface_culling: false,
        }
    }

    // ============ Settings ============

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.render_mode = mode;
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub fn set_light(&mut self, light: DirectionalLight) {
        self.light = light;
    }

    pub fn light(&self) -> DirectionalLight {
        self.light
    }

    pub fn set_shading(&mut self, shading: ShadingParams) {
        self.shading = shading;
    }

    pub fn shading(&self) -> ShadingParams {
        self.shading
    }

    // ============ Camera ============

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Re-aims the camera. Leaves it unchanged on error.
    pub fn look_at(&mut self, from: Vec3, at: Vec3, up: Vec3) -> Result<()> {
        self.camera.look_at(from, at, up)
    }

    /// Changes the vertical field of view, in degrees.
    pub fn set_fov(&mut self, fov_y_degrees: f32) -> Result<()> {
        self.camera.projection_mut().set_fov_y_degrees(fov_y_degrees)
    }

    /// Changes the output image size. The projection and the depth buffer
    /// are updated together.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.camera.projection_mut().set_image_size(width, height)?;
        self.depth_buffer.resize(width, height);
        Ok(())
    }

    pub fn depth_buffer(&self) -> &DepthBuffer {
        &self.depth_buffer
    }

    // ============ Rendering ============

    /// Renders one frame of `models` into `surface`.
    ///
    /// The surface is cleared to the background color and the depth buffer to
    /// far. The caller presents the surface afterwards.
    pub fn render_scene<S>(&mut self, models: &[Model], surface: &mut S) -> FrameStats
    where
        S: DisplaySurface + ?Sized,
    {
        let (r, g, b, a) = colors::unpack_argb(colors::BACKGROUND);
        surface.set_draw_color(r, g, b, a);
        surface.clear();
        self.depth_buffer.clear();

        let projection = self.camera.projection();
        let width = projection.width() as f32;
        let height = projection.height() as f32;
        let view_dir = self.camera.axis_z();

        let mut stats = FrameStats::default();

        for model in models {
            let shader =
                PhongShader::new(self.shading, self.light, view_dir).with_texture(model.texture());

            for triangle in model.triangles() {
                stats.submitted += 1;

                let Some(screen) = self.project_triangle(triangle) else {
                    stats.rejected += 1;
                    continue;
                };
                if OutCode::shared_outside(&screen.points, width, height)
                    || screen.is_degenerate()
                {
                    stats.rejected += 1;
                    continue;
                }
                if self.backface_culling && screen.signed_area() < 0.0 {
                    stats.culled += 1;
                    continue;
                }

                if self.render_mode.draws_filled() {
                    match self.rasterizer.fill_triangle(
                        &screen,
                        &mut self.depth_buffer,
                        surface,
                        &shader,
                    ) {
                        FillResult::Filled { pixels_written } => {
                            stats.pixels_written += pixels_written;
                        }
                        FillResult::Degenerate => {
                            stats.rejected += 1;
                            continue;
                        }
                        FillResult::OutOfBounds => {
                            log::warn!(
                                "Triangle of '{}' exceeds the {}x{} depth buffer, skipped",
                                model.name(),
                                self.depth_buffer.width(),
                                self.depth_buffer.height()
                            );
                            stats.rejected += 1;
                            continue;
                        }
                    }
                }

                if self.render_mode.draws_wireframe() {
                    draw_wireframe(&screen.points, width, height, surface);
                }

                stats.rasterized += 1;
            }
        }

        log::debug!(
            "Frame: {} submitted, {} culled, {} rejected, {} rasterized, {} pixels",
            stats.submitted,
            stats.culled,
            stats.rejected,
            stats.rasterized,
            stats.pixels_written
        );

        stats
    }

    /// Projects all three vertices. `None` if any vertex is behind the eye or
    /// outside the `[near, far]` depth range.
    fn project_triangle(&self, triangle: &Triangle) -> Option<ScreenTriangle> {
        let projection = self.camera.projection();
        let (near, far) = (projection.z_near(), projection.z_far());

        let mut points = [Vec2::ZERO; 3];
        let mut depths = [0.0; 3];
        for (i, vertex) in triangle.vertices.iter().enumerate() {
            let pixel = self.camera.compute_pixel_coordinates(vertex.position)?;
            if pixel.depth < near || pixel.depth > far {
                return None;
            }
            points[i] = pixel.raster;
            depths[i] = pixel.depth;
        }

        Some(ScreenTriangle {
            points,
            depths,
            normals: triangle.vertices.map(|v| v.normal),
            tex_coords: triangle.vertices.map(|v| v.tex_coord),
        })
    }
}

/// Draws the three edges, each clipped to the image rectangle.
fn draw_wireframe<S>(points: &[Vec2; 3], width: f32, height: f32, surface: &mut S)
where
    S: DisplaySurface + ?Sized,
{
    let (r, g, b, a) = colors::unpack_argb(colors::WIREFRAME);
    surface.set_draw_color(r, g, b, a);

    for i in 0..3 {
        let (start, end) = (points[i], points[(i + 1) % 3]);
        if let Some((p0, p1)) = clipping::clip_line(start, end, width, height) {
            surface.draw_line(p0.x as i32, p0.y as i32, p1.x as i32, p1.y as i32);
        }
    }
}
