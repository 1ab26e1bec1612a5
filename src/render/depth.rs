//! Per-pixel depth buffer (z-buffer).
//!
//! Stores the camera-space distance of the nearest fragment written so far.
//! Smaller values are closer. Cleared to `f32::INFINITY` at the start of every
//! frame so the first fragment at each pixel always passes.

/// Depth value of a pixel nothing has been drawn to yet.
pub const FAR: f32 = f32::INFINITY;

pub struct DepthBuffer {
    depths: Vec<f32>,
    width: u32,
    height: u32,
}

impl DepthBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            depths: vec![FAR; (width * height) as usize],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reallocates for a new render target size. Contents are reset.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.depths = vec![FAR; (width * height) as usize];
        self.width = width;
        self.height = height;
    }

    /// Resets every pixel to [`FAR`].
    #[inline]
    pub fn clear(&mut self) {
        self.depths.fill(FAR);
    }

    /// Linear index of (x, y), or `None` outside the buffer.
    #[inline]
    pub fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some((y as u32 * self.width + x as u32) as usize)
        } else {
            None
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Option<f32> {
        self.index(x, y).map(|idx| self.depths[idx])
    }

    /// Depth test: stores `depth` and returns true if it is strictly nearer
    /// than what is already at `idx`.
    #[inline]
    pub fn test_and_set(&mut self, idx: usize, depth: f32) -> bool {
        if depth < self.depths[idx] {
            self.depths[idx] = depth;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearer_fragments_win() {
        let mut depth = DepthBuffer::new(2, 2);
        let idx = depth.index(1, 1).unwrap();
        assert!(depth.test_and_set(idx, 5.0));
        assert!(!depth.test_and_set(idx, 7.0));
        assert!(!depth.test_and_set(idx, 5.0));
        assert!(depth.test_and_set(idx, 2.0));
        assert_eq!(depth.get(1, 1), Some(2.0));
    }

    #[test]
    fn clear_resets_to_far() {
        let mut depth = DepthBuffer::new(2, 1);
        let idx = depth.index(0, 0).unwrap();
        depth.test_and_set(idx, 1.0);
        depth.clear();
        assert_eq!(depth.get(0, 0), Some(FAR));
    }

    #[test]
    fn index_rejects_outside_coordinates() {
        let depth = DepthBuffer::new(3, 2);
        assert_eq!(depth.index(2, 1), Some(5));
        assert_eq!(depth.index(3, 0), None);
        assert_eq!(depth.index(0, -1), None);
    }
}
