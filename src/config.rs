//! Device configuration.

use crate::colors::{self, Color4};
use crate::projection::Projection;

/// Line rasterization algorithm used for mesh edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineAlgorithm {
    /// Integer Bresenham. Produces a gap-free, 8-connected pixel run.
    #[default]
    Bresenham,
    /// Recursive midpoint subdivision. Only plots midpoints, so long edges
    /// can come out dotted.
    Midpoint,
}

impl std::fmt::Display for LineAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineAlgorithm::Bresenham => write!(f, "Bresenham"),
            LineAlgorithm::Midpoint => write!(f, "Midpoint"),
        }
    }
}

/// Settings read by a [`crate::Device`] when it is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceConfig {
    pub projection: Projection,
    pub line_algorithm: LineAlgorithm,
    /// Color written for every vertex marker and edge pixel.
    pub marker_color: Color4,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            projection: Projection::default(),
            line_algorithm: LineAlgorithm::default(),
            marker_color: colors::YELLOW,
        }
    }
}

impl DeviceConfig {
    pub fn with_line_algorithm(mut self, line_algorithm: LineAlgorithm) -> Self {
        self.line_algorithm = line_algorithm;
        self
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    pub fn with_marker_color(mut self, color: Color4) -> Self {
        self.marker_color = color;
        self
    }
}
