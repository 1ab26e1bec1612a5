//! Rendering back end: depth buffer, in-memory color buffer and the
//! triangle rasterizer with its pixel shaders.

pub mod depth;
pub mod framebuffer;
pub mod rasterizer;

pub use depth::DepthBuffer;
pub use framebuffer::PixelBuffer;
pub use rasterizer::{EdgeFunctionRasterizer, FillResult, Fragment, ScreenTriangle};
pub use rasterizer::shader::{PhongShader, PixelShader, ShadingParams};
