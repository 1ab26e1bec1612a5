use std::path::Path;

use crate::colors;
use crate::error::{Error, Result};

/// Represents a 2D texture for texture mapping.
#[derive(Debug, Clone)]
pub struct Texture {
    data: Vec<u32>, // The pixel data of the texture in ARGB format, rows top to bottom.
    width: u32,
    height: u32,
}

impl Texture {
    /// Load a texture from an image file (PNG, JPG, etc.)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let img = image::open(path.as_ref())?.to_rgba8();
        let (width, height) = img.dimensions();

        let data: Vec<u32> = img
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                colors::pack_argb(r, g, b, a)
            })
            .collect();

        log::info!(
            "Loaded texture '{}' ({width}x{height})",
            path.as_ref().display()
        );
        Self::from_pixels(width, height, data)
    }

    /// Wraps an existing ARGB pixel array (row-major, top row first).
    pub fn from_pixels(width: u32, height: u32, data: Vec<u32>) -> Result<Self> {
        if width == 0 || height == 0 || data.len() != (width as usize) * (height as usize) {
            return Err(Error::InvalidTexture(format!(
                "{} pixels do not fill a {width}x{height} texture",
                data.len()
            )));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Sample the texture at UV coordinates using nearest-neighbor filtering.
    ///
    /// # UV Coordinate Convention
    /// - UV coordinates are in [0,1] range with V pointing up
    /// - Textures are stored top row first, so V is flipped: row = floor((1 - v) * height)
    ///
    /// Coordinates outside [0,1] are clamped to the border texels.
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> u32 {
        let x = texel_index(u, self.width);
        let y = texel_index(1.0 - v, self.height);
        self.data[(y * self.width + x) as usize]
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

#[inline]
fn texel_index(t: f32, size: u32) -> u32 {
    // `max` also maps NaN to 0.
    ((t * size as f32).floor().max(0.0) as u32).min(size - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: u32 = 0xFFFF0000;
    const GREEN: u32 = 0xFF00FF00;
    const BLUE: u32 = 0xFF0000FF;
    const WHITE: u32 = 0xFFFFFFFF;

    // Top row: red, green. Bottom row: blue, white.
    fn checker() -> Texture {
        Texture::from_pixels(2, 2, vec![RED, GREEN, BLUE, WHITE]).unwrap()
    }

    #[test]
    fn v_axis_points_up() {
        let tex = checker();
        assert_eq!(tex.sample(0.25, 0.75), RED);
        assert_eq!(tex.sample(0.75, 0.75), GREEN);
        assert_eq!(tex.sample(0.25, 0.25), BLUE);
        assert_eq!(tex.sample(0.75, 0.25), WHITE);
    }

    #[test]
    fn out_of_range_coordinates_clamp_to_border() {
        let tex = checker();
        assert_eq!(tex.sample(-3.0, 7.0), RED);
        assert_eq!(tex.sample(1.0, 0.0), WHITE);
        assert_eq!(tex.sample(5.0, -2.0), WHITE);
        assert_eq!(tex.sample(f32::NAN, 1.0), RED);
    }

    #[test]
    fn mismatched_pixel_count_is_rejected() {
        assert!(Texture::from_pixels(3, 3, vec![RED; 4]).is_err());
        assert!(Texture::from_pixels(0, 0, vec![]).is_err());
    }
}
