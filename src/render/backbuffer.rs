//! Off-screen RGBA pixel buffer.
//!
//! The backbuffer is rebuilt from scratch on every `Device::clear` and copied
//! to the surface on `Device::present`.

use crate::colors::Color4;

/// A W x H buffer of RGBA bytes, row-major, origin at the top-left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backbuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl Backbuffer {
    /// Allocates a buffer with every byte set to zero (transparent black).
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0; width as usize * height as usize * 4],
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

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Writes one pixel at `(floor(x), floor(y))`, overwriting all four channels.
    ///
    /// # Panics
    /// The coordinates must lie inside the buffer. Debug builds report the
    /// offending coordinate; release builds panic on the slice index.
    #[inline]
    pub fn put_pixel(&mut self, x: f32, y: f32, color: Color4) {
        let (x, y) = (x.floor() as i64, y.floor() as i64);
        debug_assert!(
            x >= 0 && x < self.width as i64,
            "x coordinate of '{}' is out of bounds 0 to {}",
            x,
            self.width
        );
        debug_assert!(
            y >= 0 && y < self.height as i64,
            "y coordinate of '{}' is out of bounds 0 to {}",
            y,
            self.height
        );
        let index = ((x + y * self.width as i64) * 4) as usize;
        self.data[index..index + 4].copy_from_slice(&color.to_rgba8());
    }

    /// Returns the RGBA bytes at (x, y), or None if out of bounds.
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            let index = (y as usize * self.width as usize + x as usize) * 4;
            let mut rgba = [0; 4];
            rgba.copy_from_slice(&self.data[index..index + 4]);
            Some(rgba)
        } else {
            None
        }
    }

    /// True while nothing has been drawn since allocation.
    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|&byte| byte == 0)
    }

    /// Counts pixels whose bytes are not all zero.
    pub fn painted_pixel_count(&self) -> usize {
        self.data
            .chunks_exact(4)
            .filter(|px| px.iter().any(|&b| b != 0))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{Color4, YELLOW};

    #[test]
    fn new_buffer_is_blank() {
        let buffer = Backbuffer::new(4, 3);
        assert_eq!(buffer.as_bytes().len(), 4 * 3 * 4);
        assert!(buffer.is_blank());
    }

    #[test]
    fn put_pixel_uses_row_major_offset() {
        let mut buffer = Backbuffer::new(4, 3);
        buffer.put_pixel(2.9, 1.2, YELLOW);

        let offset = (2 + 4) * 4;
        assert_eq!(&buffer.as_bytes()[offset..offset + 4], &[255, 255, 0, 255]);
        assert_eq!(buffer.pixel(2, 1), Some([255, 255, 0, 255]));
        assert_eq!(buffer.painted_pixel_count(), 1);
    }

    #[test]
    fn put_pixel_overwrites_without_blending() {
        let mut buffer = Backbuffer::new(2, 2);
        buffer.put_pixel(0.0, 0.0, YELLOW);
        buffer.put_pixel(0.0, 0.0, Color4::new(0.0, 0.0, 1.0, 0.5));
        assert_eq!(buffer.pixel(0, 0), Some([0, 0, 255, 128]));
    }

    #[test]
    fn pixel_out_of_bounds_is_none() {
        let buffer = Backbuffer::new(2, 2);
        assert_eq!(buffer.pixel(-1, 0), None);
        assert_eq!(buffer.pixel(2, 0), None);
        assert_eq!(buffer.pixel(0, 2), None);
    }

    #[test]
    #[should_panic]
    fn put_pixel_outside_buffer_panics() {
        let mut buffer = Backbuffer::new(2, 2);
        buffer.put_pixel(5.0, 5.0, YELLOW);
    }
}
