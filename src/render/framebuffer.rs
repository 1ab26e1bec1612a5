//! In-memory color buffer.
//!
//! [`PixelBuffer`] is a [`DisplaySurface`] backed by a `Vec<u32>` of ARGB8888
//! pixels. It is what headless rendering and the tests draw into, and what the
//! SDL2 window streams to its texture.

use std::path::Path;

use crate::colors;
use crate::display::DisplaySurface;
use crate::error::Result;

pub struct PixelBuffer {
    color_buffer: Vec<u32>,
    width: u32,
    height: u32,
    draw_color: u32,
    frames_presented: u64,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        Self {
            color_buffer: vec![colors::BACKGROUND; size],
            width,
            height,
            draw_color: colors::WIREFRAME,
            frames_presented: 0,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.color_buffer = vec![colors::BACKGROUND; (width * height) as usize];
        self.width = width;
        self.height = height;
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some((y as u32 * self.width + x as u32) as usize)
        } else {
            None
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|idx| self.color_buffer[idx])
    }

    pub fn pixels(&self) -> &[u32] {
        &self.color_buffer
    }

    /// Number of times [`DisplaySurface::present`] has been called.
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// The buffer as raw bytes, in native-endian ARGB8888 order (what SDL's
    /// `ARGB8888` streaming textures expect).
    pub fn as_bytes(&self) -> Vec<u8> {
        self.color_buffer
            .iter()
            .flat_map(|pixel| pixel.to_ne_bytes())
            .collect()
    }

    /// Encodes the buffer as an image file; the format follows the extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let rgba: Vec<u8> = self
            .color_buffer
            .iter()
            .flat_map(|&pixel| {
                let (r, g, b, a) = colors::unpack_argb(pixel);
                [r, g, b, a]
            })
            .collect();
        image::save_buffer(
            path.as_ref(),
            &rgba,
            self.width,
            self.height,
            image::ColorType::Rgba8,
        )?;
        log::info!("Wrote {}x{} frame to '{}'", self.width, self.height, path.as_ref().display());
        Ok(())
    }
}

impl DisplaySurface for PixelBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_draw_color(&mut self, r: u8, g: u8, b: u8, a: u8) {
        self.draw_color = colors::pack_argb(r, g, b, a);
    }

    fn clear(&mut self) {
        self.color_buffer.fill(self.draw_color);
    }

    #[inline]
    fn draw_point(&mut self, x: i32, y: i32) {
        if let Some(idx) = self.index(x, y) {
            self.color_buffer[idx] = self.draw_color;
        }
    }

    /// Draws a line between two points using Bresenham's line algorithm.
    ///
    /// For each step along the major axis we decide whether to also step
    /// along the minor axis based on an accumulated integer error term.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let x_incr_direction = if x0 < x1 { 1 } else { -1 };
        let y_incr_direction = if y0 < y1 { 1 } else { -1 };

        // Positive error favors x movement, negative favors y.
        let mut err = dx - dy;
        let mut x = x0;
        let mut y = y0;

        loop {
            self.draw_point(x, y);
            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += x_incr_direction;
            }
            // Both conditions can hold, giving a diagonal step.
            if e2 < dx {
                err += dx;
                y += y_incr_direction;
            }
        }
    }

    fn present(&mut self) -> Result<()> {
        self.frames_presented += 1;
        Ok(())
    }
}
