//! Display surfaces the device presents frames to.
//!
//! A [`Surface`] has a fixed size and accepts finished RGBA frames. The
//! device reads the size once at construction.

use std::path::Path;

use image::{ImageFormat, RgbaImage};

#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("SDL error: {0}")]
    Sdl(String),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("frame has {actual} bytes, expected {expected}")]
    FrameSize { expected: usize, actual: usize },
}

/// A fixed-size target for presented frames.
pub trait Surface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Resets the visible image to the background.
    fn clear(&mut self);

    /// Copies a finished frame (row-major RGBA bytes, `width * height * 4`
    /// long) to the visible image.
    fn present(&mut self, frame: &[u8]) -> Result<(), SurfaceError>;
}

/// Headless surface that keeps the last presented frame in memory.
#[derive(Debug, Clone)]
pub struct ImageSurface {
    front: RgbaImage,
    presented_frames: u64,
}

impl ImageSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            front: RgbaImage::new(width, height),
            presented_frames: 0,
        }
    }

    /// The visible image.
    pub fn image(&self) -> &RgbaImage {
        &self.front
    }

    /// Number of successful `present` calls so far.
    pub fn presented_frames(&self) -> u64 {
        self.presented_frames
    }

    /// Writes the visible image to `path` as a PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), SurfaceError> {
        self.front.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}

impl Surface for ImageSurface {
    fn width(&self) -> u32 {
        self.front.width()
    }

    fn height(&self) -> u32 {
        self.front.height()
    }

    fn clear(&mut self) {
        self.front = RgbaImage::new(self.front.width(), self.front.height());
    }

    fn present(&mut self, frame: &[u8]) -> Result<(), SurfaceError> {
        let expected = self.front.as_raw().len();
        if frame.len() != expected {
            return Err(SurfaceError::FrameSize {
                expected,
                actual: frame.len(),
            });
        }
        self.front.copy_from_slice(frame);
        self.presented_frames += 1;
        Ok(())
    }
}
