//! Pixel-level rendering primitives: the backbuffer and line algorithms.

pub mod backbuffer;
pub mod line;

pub use backbuffer::Backbuffer;
pub use line::{clip_to_viewport, subdivide, BresenhamLine, CLIP_MARGIN, MIDPOINT_THRESHOLD};
