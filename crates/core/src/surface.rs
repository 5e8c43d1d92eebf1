//! RGBA drawing surface
//!
//! The pixel buffer a page is composed into: 4 bytes per pixel, row-major
//! from the top-left. The compositor is the only writer; the shell uploads
//! the buffer as a texture and encodes it for exports.

/// Drawing surface backed by an RGBA byte buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Surface {
    /// Create a surface of the given size, filled white.
    pub fn new(width: u32, height: u32) -> Self {
        let mut surface = Self {
            width: 0,
            height: 0,
            pixels: Vec::new(),
        };
        surface.resize(width, height);
        surface
    }

    /// Create a zero-sized surface; `resize` gives it real dimensions.
    pub fn empty() -> Self {
        Self::new(0, 0)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw RGBA bytes, `width * height * 4` long.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Resize to the given dimensions and clear to white.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize) * 4;
        self.pixels.clear();
        self.pixels.resize(len, 0xff);
    }

    /// Fill the whole surface with one color.
    pub fn fill(&mut self, rgba: [u8; 4]) {
        for pixel in self.pixels.chunks_exact_mut(4) {
            pixel.copy_from_slice(&rgba);
        }
    }

    /// Replace the buffer with a full frame of RGBA bytes.
    ///
    /// Returns `false` (leaving the surface untouched) when the frame length
    /// does not match the surface dimensions.
    pub fn copy_from(&mut self, rgba: &[u8]) -> bool {
        if rgba.len() != self.pixels.len() {
            return false;
        }
        self.pixels.copy_from_slice(rgba);
        true
    }

    /// Blend `color` into the pixel at (x, y) with the given coverage.
    ///
    /// Out-of-bounds positions are ignored, so glyphs may safely spill over
    /// the surface edge.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: [u8; 3], coverage: f32) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        let alpha = coverage.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let offset = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        for channel in 0..3 {
            let dst = self.pixels[offset + channel] as f32;
            let src = color[channel] as f32;
            self.pixels[offset + channel] = (dst * (1.0 - alpha) + src * alpha).round() as u8;
        }
        self.pixels[offset + 3] = 0xff;
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_surface_is_white() {
        let surface = Surface::new(2, 2);
        assert_eq!(surface.pixels().len(), 16);
        assert!(surface.pixels().iter().all(|&b| b == 0xff));
    }

    #[test]
    fn resize_clears_previous_content() {
        let mut surface = Surface::new(2, 2);
        surface.fill([0, 0, 0, 0xff]);

        surface.resize(3, 1);
        assert_eq!(surface.width(), 3);
        assert_eq!(surface.height(), 1);
        assert!(surface.pixels().iter().all(|&b| b == 0xff));
    }

    #[test]
    fn copy_from_rejects_wrong_length() {
        let mut surface = Surface::new(2, 2);
        assert!(!surface.copy_from(&[0u8; 4]));
        assert!(surface.copy_from(&[7u8; 16]));
        assert!(surface.pixels().iter().all(|&b| b == 7));
    }

    #[test]
    fn blend_full_coverage_replaces_color() {
        let mut surface = Surface::new(1, 1);
        surface.blend_pixel(0, 0, [0, 0, 0], 1.0);
        assert_eq!(&surface.pixels()[..4], &[0, 0, 0, 0xff]);
    }

    #[test]
    fn blend_half_coverage_mixes() {
        let mut surface = Surface::new(1, 1);
        surface.blend_pixel(0, 0, [0, 0, 0], 0.5);
        let value = surface.pixels()[0];
        assert!(value > 100 && value < 160, "got {value}");
    }

    #[test]
    fn blend_out_of_bounds_is_ignored() {
        let mut surface = Surface::new(2, 2);
        surface.blend_pixel(-1, 0, [0, 0, 0], 1.0);
        surface.blend_pixel(0, 5, [0, 0, 0], 1.0);
        assert!(surface.pixels().iter().all(|&b| b == 0xff));
    }

    #[test]
    fn empty_surface_reports_empty() {
        assert!(Surface::empty().is_empty());
        assert!(!Surface::new(1, 1).is_empty());
    }
}
