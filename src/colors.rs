//! Normalized RGBA colors.

/// A color with four normalized channels in `[0, 1]`.
///
/// Channels stay as floats until a pixel is written; see [`Color4::to_rgba8`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color4 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

pub const TRANSPARENT: Color4 = Color4::new(0.0, 0.0, 0.0, 0.0);
pub const YELLOW: Color4 = Color4::new(1.0, 1.0, 0.0, 1.0);

impl Color4 {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Converts to bytes in RGBA order.
    ///
    /// Each channel is clamped to `[0, 1]`, scaled by 255 and rounded
    /// independently. No gamma correction.
    #[inline]
    pub fn to_rgba8(self) -> [u8; 4] {
        [
            channel_to_byte(self.r),
            channel_to_byte(self.g),
            channel_to_byte(self.b),
            channel_to_byte(self.a),
        ]
    }
}

impl Default for Color4 {
    fn default() -> Self {
        TRANSPARENT
    }
}

#[inline]
fn channel_to_byte(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yellow_converts_to_full_bytes() {
        assert_eq!(YELLOW.to_rgba8(), [255, 255, 0, 255]);
    }

    #[test]
    fn channels_are_clamped_and_rounded() {
        let color = Color4::new(-0.5, 2.0, 0.5, 0.1);
        assert_eq!(color.to_rgba8(), [0, 255, 128, 26]);
    }

    #[test]
    fn nan_channel_becomes_zero() {
        let color = Color4::new(f32::NAN, 0.0, 0.0, 1.0);
        assert_eq!(color.to_rgba8()[0], 0);
    }
}
