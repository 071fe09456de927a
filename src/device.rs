//! The rasterizer.
//!
//! A [`Device`] owns the backbuffer and the surface it presents to. Each tick
//! the driver calls [`Device::clear`], [`Device::render`] and
//! [`Device::present`], in that order.

use crate::camera::Camera;
use crate::colors::Color4;
use crate::config::{DeviceConfig, LineAlgorithm};
use crate::math::mat4::Mat4;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::mesh::Mesh;
use crate::render::line::{self, clip_to_viewport, BresenhamLine};
use crate::render::Backbuffer;
use crate::surface::{Surface, SurfaceError};

pub struct Device<S: Surface> {
    surface: S,
    width: u32,
    height: u32,
    backbuffer: Backbuffer,
    config: DeviceConfig,
    // Reused between meshes and frames to avoid reallocating.
    projected: Vec<Vec2>,
}

impl<S: Surface> Device<S> {
    pub fn new(surface: S) -> Self {
        Self::with_config(surface, DeviceConfig::default())
    }

    /// Creates a device for `surface`. The surface size is read once here.
    pub fn with_config(surface: S, config: DeviceConfig) -> Self {
        let (width, height) = (surface.width(), surface.height());
        tracing::debug!(
            width,
            height,
            line_algorithm = %config.line_algorithm,
            "created device"
        );

        Self {
            surface,
            width,
            height,
            backbuffer: Backbuffer::new(width, height),
            config,
            projected: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    pub fn set_line_algorithm(&mut self, line_algorithm: LineAlgorithm) {
        self.config.line_algorithm = line_algorithm;
    }

    pub fn line_algorithm(&self) -> LineAlgorithm {
        self.config.line_algorithm
    }

    pub fn backbuffer(&self) -> &Backbuffer {
        &self.backbuffer
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Clears the visible surface and replaces the backbuffer with a fresh,
    /// fully transparent one.
    pub fn clear(&mut self) {
        self.surface.clear();
        self.backbuffer = Backbuffer::new(self.width, self.height);
    }

    /// Copies the backbuffer to the surface. Call once drawing is finished.
    pub fn present(&mut self) -> Result<(), SurfaceError> {
        self.surface.present(self.backbuffer.as_bytes())
    }

    /// Writes a pixel without clipping. See [`Backbuffer::put_pixel`].
    #[inline]
    pub fn put_pixel(&mut self, x: f32, y: f32, color: Color4) {
        self.backbuffer.put_pixel(x, y, color);
    }

    /// Projects a local-space point to screen pixels with `transform`
    /// (world * view * projection).
    ///
    /// NDC x in [-1, 1] scales by the full width around the center, and y is
    /// flipped because NDC +y is up while screen +y is down.
    pub fn project(&self, coord: Vec3, transform: &Mat4) -> Vec2 {
        let point = Mat4::transform_coordinates(coord, transform);
        let (width, height) = (self.width as f32, self.height as f32);

        let x = (point.x * width + width / 2.0).floor();
        let y = (-point.y * height + height / 2.0).floor();
        Vec2::new(x, y)
    }

    /// Draws a marker pixel if `point` lies on screen; drops it otherwise.
    #[inline]
    pub fn draw_point(&mut self, point: Vec2) {
        if point.x >= 0.0
            && point.y >= 0.0
            && point.x < self.width as f32
            && point.y < self.height as f32
        {
            self.put_pixel(point.x, point.y, self.config.marker_color);
        }
    }

    /// Draws a line by recursive midpoint subdivision.
    ///
    /// Only midpoints are plotted, so the result may have gaps. Segments
    /// shorter than half a pixel plot nothing. The segment is first clipped
    /// to the screen, see [`clip_to_viewport`].
    pub fn draw_line(&mut self, p0: Vec2, p1: Vec2) {
        let Some((p0, p1)) = self.clip(p0, p1) else {
            return;
        };
        line::subdivide(p0, p1, &mut |point| self.draw_point(point));
    }

    /// Draws a gap-free line with Bresenham's algorithm.
    ///
    /// Endpoints are truncated to whole pixels; coincident endpoints draw a
    /// single pixel. Parts of the segment off screen are clipped away before
    /// stepping.
    pub fn draw_bline(&mut self, p0: Vec2, p1: Vec2) {
        let Some((p0, p1)) = self.clip(p0, p1) else {
            return;
        };
        for (x, y) in BresenhamLine::from_points(p0, p1) {
            self.draw_point(Vec2::new(x as f32, y as f32));
        }
    }

    fn clip(&self, p0: Vec2, p1: Vec2) -> Option<(Vec2, Vec2)> {
        let clipped = clip_to_viewport(p0, p1, self.width, self.height);
        if clipped.is_none() {
            tracing::trace!(?p0, ?p1, "skipped line off screen");
        }
        clipped
    }

    #[inline]
    fn draw_edge(&mut self, p0: Vec2, p1: Vec2) {
        match self.config.line_algorithm {
            LineAlgorithm::Bresenham => self.draw_bline(p0, p1),
            LineAlgorithm::Midpoint => self.draw_line(p0, p1),
        }
    }

    /// View and projection matrices shared by every mesh in a frame.
    fn frame_matrices(&self, camera: &Camera) -> (Mat4, Mat4) {
        let aspect_ratio = self.width as f32 / self.height as f32;
        (camera.view_matrix(), self.config.projection.matrix(aspect_ratio))
    }

    /// The combined world * view * projection matrix `render` uses for `mesh`.
    pub fn transform_for(&self, camera: &Camera, mesh: &Mesh) -> Mat4 {
        let (view, projection) = self.frame_matrices(camera);
        mesh.world_matrix() * view * projection
    }

    /// Draws every mesh as a wireframe into the backbuffer.
    ///
    /// For each mesh, in order: a marker for every vertex, an edge between
    /// each pair of consecutive vertices (no wrap-around), then the three
    /// edges of every face. There is no depth test or culling; later pixels
    /// overwrite earlier ones.
    pub fn render(&mut self, camera: &Camera, meshes: &[Mesh]) {
        let _span = tracing::trace_span!("render", meshes = meshes.len()).entered();
        let (view, projection) = self.frame_matrices(camera);

        let mut projected = std::mem::take(&mut self.projected);
        for mesh in meshes {
            tracing::trace!(
                mesh = mesh.name(),
                vertices = mesh.vertices().len(),
                faces = mesh.faces().len(),
                "rendering mesh"
            );
            // Rotation before translation, then into view and clip space.
            let transform = mesh.world_matrix() * view * projection;

            projected.clear();
            projected.extend(
                mesh.vertices()
                    .iter()
                    .map(|&vertex| self.project(vertex, &transform)),
            );

            for &point in &projected {
                self.draw_point(point);
            }

            for pair in projected.windows(2) {
                self.draw_edge(pair[0], pair[1]);
            }

            for face in mesh.faces() {
                for (a, b) in face.edges() {
                    self.draw_edge(projected[a], projected[b]);
                }
            }
        }
        self.projected = projected;
    }

    /// Runs one whole frame: clear, render, present.
    pub fn draw_frame(&mut self, camera: &Camera, meshes: &[Mesh]) -> Result<(), SurfaceError> {
        self.clear();
        self.render(camera, meshes);
        self.present()
    }
}
