//! The display surface the renderer draws into.
//!
//! The renderer never owns a window. It issues draw calls through
//! [`DisplaySurface`], which is implemented by an in-memory
//! [`PixelBuffer`](crate::render::PixelBuffer) and, with the `window` feature,
//! by the SDL2-backed [`Window`](crate::window::Window).

use crate::error::Result;

/// A raster target that accepts point and line draw calls.
///
/// Coordinates are in raster space: origin top-left, X right, Y down.
/// Implementations silently ignore points outside `[0, width) x [0, height)`.
pub trait DisplaySurface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Sets the color used by subsequent draw calls.
    fn set_draw_color(&mut self, r: u8, g: u8, b: u8, a: u8);

    /// Fills the whole surface with the current draw color.
    fn clear(&mut self);

    fn draw_point(&mut self, x: i32, y: i32);

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32);

    /// Shows the finished frame.
    fn present(&mut self) -> Result<()>;
}
