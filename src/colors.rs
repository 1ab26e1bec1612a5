//! Packed ARGB8888 colors.

use crate::math::vec3::Vec3;

pub const BACKGROUND: u32 = 0xFF1E1E1E;
pub const WIREFRAME: u32 = 0xFFFFFFFF;

/// Packs 8-bit channels into ARGB8888.
#[inline]
pub const fn pack_argb(r: u8, g: u8, b: u8, a: u8) -> u32 {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Splits an ARGB8888 color into `(r, g, b, a)`.
#[inline]
pub const fn unpack_argb(color: u32) -> (u8, u8, u8, u8) {
    (
        (color >> 16) as u8,
        (color >> 8) as u8,
        color as u8,
        (color >> 24) as u8,
    )
}

/// Converts an RGB vector in `[0, 255]` to opaque 8-bit channels, clamping
/// out-of-range values.
#[inline]
pub fn to_rgb8(color: Vec3) -> (u8, u8, u8) {
    let c = color.clamp(0.0, 255.0);
    (c.x as u8, c.y as u8, c.z as u8)
}

/// Converts an ARGB8888 color to an RGB vector in `[0, 255]`, dropping alpha.
#[inline]
pub fn to_vec3(color: u32) -> Vec3 {
    let (r, g, b, _) = unpack_argb(color);
    Vec3::new(r as f32, g as f32, b as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_and_unpack_agree() {
        let c = pack_argb(0x12, 0x34, 0x56, 0x78);
        assert_eq!(c, 0x78123456);
        assert_eq!(unpack_argb(c), (0x12, 0x34, 0x56, 0x78));
    }

    #[test]
    fn to_rgb8_clamps() {
        assert_eq!(to_rgb8(Vec3::new(-20.0, 127.9, 900.0)), (0, 127, 255));
    }
}
