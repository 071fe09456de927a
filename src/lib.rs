//! A minimal CPU wireframe rasterizer.
//!
//! Meshes are transformed through world, view and projection matrices,
//! projected to screen pixels and drawn as vertex markers and edges into an
//! RGBA backbuffer, which is then presented to a [`Surface`]. Everything runs
//! on the CPU; there is no shading, depth testing or filling.
//!
//! # Quick Start
//!
//! ```no_run
//! use softwire::prelude::*;
//!
//! let mut device = Device::new(ImageSurface::new(640, 480));
//! let camera = Camera::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
//! let mut meshes = vec![Mesh::cube("Cube")];
//!
//! for _ in 0..60 {
//!     meshes[0].rotation.x += 0.01;
//!     meshes[0].rotation.y += 0.01;
//!     device.clear();
//!     device.render(&camera, &meshes);
//!     device.present()?;
//! }
//! device.surface().save_png("frame.png")?;
//! # Ok::<(), softwire::SurfaceError>(())
//! ```

// Public API - exposed to library consumers
pub mod camera;
pub mod colors;
pub mod config;
pub mod device;
pub mod math;
pub mod mesh;
pub mod projection;
pub mod render;
pub mod surface;
#[cfg(feature = "window")]
pub mod window;

// Re-export commonly needed types at crate root for convenience
pub use camera::Camera;
pub use colors::Color4;
pub use config::{DeviceConfig, LineAlgorithm};
pub use device::Device;
pub use mesh::{Face, Mesh, MeshError};
pub use projection::Projection;
pub use surface::{ImageSurface, Surface, SurfaceError};

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use softwire::prelude::*;
/// ```
pub mod prelude {
    // Scene
    pub use crate::camera::Camera;
    pub use crate::mesh::{Face, Mesh};

    // Device
    pub use crate::config::{DeviceConfig, LineAlgorithm};
    pub use crate::device::Device;
    pub use crate::projection::Projection;

    // Math
    pub use crate::colors::Color4;
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;

    // Surfaces
    pub use crate::surface::{ImageSurface, Surface};
    #[cfg(feature = "window")]
    pub use crate::window::{FrameLimiter, Window, WindowEvent};
}
