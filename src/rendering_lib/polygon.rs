// src/rendering_lib/polygon.rs

use std::ops::Deref;

use super::backend::{DrawMode, GraphicsBackend, ShaderProgram};
use crate::color::Color;
use crate::error::{PolygonError, Result};
use crate::geometry::{flatten, Point2};

/// Filled or outlined polygon whose vertices live in a backend buffer.
///
/// Vertex order matters: fills are drawn as a triangle fan pivoting on the
/// first point. The buffer is uploaded once in [`new`](Self::new) and must be
/// released with [`destroy`](Self::destroy); see [`ScopedPolygon`] for an owner
/// that does this on drop.
pub struct Polygon<B: GraphicsBackend> {
    points: Vec<Point2>,
    fill_color: Color,
    visible: bool,
    buffer: Option<B::Buffer>,
}

impl<B: GraphicsBackend> Polygon<B> {
    pub fn new(backend: &mut B, points: Vec<Point2>, color: Option<Color>) -> Result<Self> {
        if points.is_empty() {
            return Err(PolygonError::invalid("polygon needs at least one point"));
        }
        if let Some(bad) = points.iter().find(|p| !p.is_finite()) {
            return Err(PolygonError::invalid(format!("polygon point {bad:?} is not finite")));
        }

        let buffer = backend.create_static_buffer(&flatten(&points))?;
        log::debug!("uploaded polygon with {} vertices", points.len());

        Ok(Self {
            points,
            fill_color: color.unwrap_or_default(),
            visible: true,
            buffer: Some(buffer),
        })
    }

    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    pub fn vertex_count(&self) -> u32 {
        self.points.len() as u32
    }

    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_destroyed(&self) -> bool {
        self.buffer.is_none()
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Draws the polygon with an identity transform.
    ///
    /// `outline` selects a closed line loop instead of a fan fill. The color is
    /// `color` when given, otherwise the fill color for fills and black for
    /// outlines. `program` must already be active on `backend`.
    ///
    /// # Panics
    ///
    /// If the polygon was destroyed, or if `program` is not the active program.
    pub fn render(&self, backend: &mut B, program: &ShaderProgram, outline: bool, color: Option<Color>) {
        let Some(buffer) = self.buffer.as_ref() else {
            panic!("usage error: render called on a destroyed polygon");
        };
        if !self.visible {
            return;
        }
        if backend.active_program() != Some(program.id) {
            panic!(
                "usage error: program {:?} must be active before rendering (active: {:?})",
                program.id,
                backend.active_program()
            );
        }

        let (mode, default_color) = if outline {
            (DrawMode::LineLoop, Color::BLACK)
        } else {
            (DrawMode::TriangleFan, self.fill_color)
        };
        let color = color.unwrap_or(default_color);

        backend.bind_buffer(buffer);
        backend.set_uniform_2f(program.center, [0.0, 0.0]);
        backend.set_uniform_1f(program.scale, 1.0);
        backend.set_uniform_1f(program.angle, 0.0);
        backend.set_uniform_4f(program.color, color.to_rgba());

        backend.enable_vertex_attrib(program.position);
        backend.vertex_attrib_pointer(program.position, 2);
        log::trace!("drawing {:?} with {} vertices in {}", mode, self.vertex_count(), color);
        backend.draw_arrays(mode, 0, self.vertex_count());
        backend.disable_vertex_attrib(program.position);
    }

    /// Releases the backend buffer.
    ///
    /// # Panics
    ///
    /// If called twice.
    pub fn destroy(&mut self, backend: &mut B) {
        let Some(buffer) = self.buffer.take() else {
            panic!("usage error: polygon destroyed twice");
        };
        backend.delete_buffer(buffer);
        log::debug!("released polygon with {} vertices", self.points.len());
    }
}

impl<B: GraphicsBackend> Drop for Polygon<B> {
    fn drop(&mut self) {
        if self.buffer.is_some() {
            log::warn!(
                "polygon with {} vertices dropped without destroy; its backend buffer leaks",
                self.points.len()
            );
        }
    }
}

/// A [`Polygon`] bound to the backend that owns its buffer, destroyed on drop.
pub struct ScopedPolygon<'b, B: GraphicsBackend> {
    backend: &'b mut B,
    polygon: Polygon<B>,
}

impl<'b, B: GraphicsBackend> ScopedPolygon<'b, B> {
    pub fn new(backend: &'b mut B, points: Vec<Point2>, color: Option<Color>) -> Result<Self> {
        let polygon = Polygon::new(backend, points, color)?;
        Ok(Self { backend, polygon })
    }

    pub fn show(&mut self) {
        self.polygon.show();
    }

    pub fn hide(&mut self) {
        self.polygon.hide();
    }

    pub fn render(&mut self, program: &ShaderProgram, outline: bool, color: Option<Color>) {
        self.polygon.render(self.backend, program, outline, color);
    }

    /// Backend access for unrelated work (binding programs, other draws).
    pub fn backend(&mut self) -> &mut B {
        &mut *self.backend
    }

    /// Releases the buffer now instead of at the end of the scope.
    pub fn destroy(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if !self.polygon.is_destroyed() {
            self.polygon.destroy(self.backend);
        }
    }
}

impl<B: GraphicsBackend> Deref for ScopedPolygon<'_, B> {
    type Target = Polygon<B>;

    fn deref(&self) -> &Polygon<B> {
        &self.polygon
    }
}

impl<B: GraphicsBackend> Drop for ScopedPolygon<'_, B> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering_lib::backend::{AttribLocation, ProgramId};
    use crate::rendering_lib::recording::{BackendCall, RecordingBackend};

    fn triangle() -> Vec<Point2> {
        vec![Point2::new(0.0, 0.0), Point2::new(4.0, 0.0), Point2::new(0.0, 3.0)]
    }

    fn bound_backend() -> (RecordingBackend, ShaderProgram) {
        let mut backend = RecordingBackend::new();
        let program = ShaderProgram::with_default_locations(ProgramId(7));
        backend.use_program(&program);
        (backend, program)
    }

    // ── construct ─────────────────────────────────────────────────────────

    #[test]
    fn construct_uploads_flattened_points_once() {
        let (mut backend, _) = bound_backend();
        let mut poly = Polygon::new(&mut backend, triangle(), None).unwrap();

        assert_eq!(backend.live_buffers(), 1);
        assert_eq!(backend.buffer_data(0), Some(&[0.0, 0.0, 4.0, 0.0, 0.0, 3.0][..]));
        assert_eq!(poly.fill_color(), Color::BLACK);
        assert!(poly.is_visible());
        poly.destroy(&mut backend);
    }

    #[test]
    fn empty_points_rejected_before_allocation() {
        let mut backend = RecordingBackend::new();
        let err = Polygon::new(&mut backend, Vec::new(), None).err().unwrap();
        assert!(matches!(err, PolygonError::InvalidArgument(_)));
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn allocation_failure_propagates() {
        let mut backend = RecordingBackend::new();
        backend.fail_next_allocation();
        let err = Polygon::new(&mut backend, triangle(), None).err().unwrap();
        assert!(matches!(err, PolygonError::Backend(_)));
        assert_eq!(backend.live_buffers(), 0);
    }

    // ── render ───────────────────────────────────────────────────────────

    #[test]
    fn fill_draws_fan_in_fill_color() {
        let (mut backend, program) = bound_backend();
        let mut poly = Polygon::new(&mut backend, triangle(), Some(Color::RED)).unwrap();
        backend.clear_calls();

        poly.render(&mut backend, &program, false, None);

        assert_eq!(backend.draws(), vec![(DrawMode::TriangleFan, 0, 3)]);
        assert_eq!(backend.last_uniform_4f(program.color), Some([1.0, 0.0, 0.0, 1.0]));
        poly.destroy(&mut backend);
    }

    #[test]
    fn outline_draws_line_loop_in_black() {
        let (mut backend, program) = bound_backend();
        let mut poly = Polygon::new(&mut backend, triangle(), Some(Color::RED)).unwrap();

        poly.render(&mut backend, &program, true, None);

        assert_eq!(backend.draws(), vec![(DrawMode::LineLoop, 0, 3)]);
        assert_eq!(backend.last_uniform_4f(program.color), Some([0.0, 0.0, 0.0, 1.0]));
        poly.destroy(&mut backend);
    }

    #[test]
    fn override_color_wins() {
        let (mut backend, program) = bound_backend();
        let mut poly = Polygon::new(&mut backend, triangle(), Some(Color::RED)).unwrap();

        poly.render(&mut backend, &program, true, Some(Color::BLUE));
        assert_eq!(backend.last_uniform_4f(program.color), Some(Color::BLUE.to_rgba()));
        poly.render(&mut backend, &program, false, Some(Color::WHITE));
        assert_eq!(backend.last_uniform_4f(program.color), Some(Color::WHITE.to_rgba()));
        poly.destroy(&mut backend);
    }

    #[test]
    fn render_uses_identity_transform_and_restores_attributes() {
        let (mut backend, program) = bound_backend();
        let mut poly = Polygon::new(&mut backend, triangle(), None).unwrap();
        backend.clear_calls();

        poly.render(&mut backend, &program, false, None);

        let calls = backend.calls();
        assert!(calls.contains(&BackendCall::BindBuffer { id: 0 }));
        assert!(calls.contains(&BackendCall::Uniform2f(program.center, [0.0, 0.0])));
        assert!(calls.contains(&BackendCall::Uniform1f(program.scale, 1.0)));
        assert!(calls.contains(&BackendCall::Uniform1f(program.angle, 0.0)));
        assert!(calls.contains(&BackendCall::AttribPointer {
            location: AttribLocation(0),
            components: 2,
            buffer: Some(0),
        }));
        assert_eq!(calls.first(), Some(&BackendCall::BindBuffer { id: 0 }));
        assert_eq!(calls.last(), Some(&BackendCall::DisableAttrib(program.position)));
        assert!(backend.enabled_attributes().is_empty());
        poly.destroy(&mut backend);
    }

    #[test]
    fn hidden_polygon_issues_no_draws() {
        let (mut backend, program) = bound_backend();
        let mut poly = Polygon::new(&mut backend, triangle(), None).unwrap();
        backend.clear_calls();

        poly.hide();
        poly.hide();
        poly.render(&mut backend, &program, false, None);
        assert!(backend.calls().is_empty());

        poly.show();
        poly.render(&mut backend, &program, false, None);
        assert_eq!(backend.draws().len(), 1);
        poly.destroy(&mut backend);
    }

    // ── misuse ───────────────────────────────────────────────────────────

    #[test]
    #[should_panic(expected = "usage error")]
    fn render_after_destroy_panics() {
        let (mut backend, program) = bound_backend();
        let mut poly = Polygon::new(&mut backend, triangle(), None).unwrap();
        poly.destroy(&mut backend);
        poly.render(&mut backend, &program, false, None);
    }

    #[test]
    #[should_panic(expected = "usage error")]
    fn hidden_render_after_destroy_still_panics() {
        let (mut backend, program) = bound_backend();
        let mut poly = Polygon::new(&mut backend, triangle(), None).unwrap();
        poly.hide();
        poly.destroy(&mut backend);
        poly.render(&mut backend, &program, true, None);
    }

    #[test]
    #[should_panic(expected = "usage error")]
    fn double_destroy_panics() {
        let mut backend = RecordingBackend::new();
        let mut poly = Polygon::new(&mut backend, triangle(), None).unwrap();
        poly.destroy(&mut backend);
        poly.destroy(&mut backend);
    }

    #[test]
    #[should_panic(expected = "must be active")]
    fn render_without_program_panics() {
        let mut backend = RecordingBackend::new();
        let program = ShaderProgram::with_default_locations(ProgramId(1));
        let poly = Polygon::new(&mut backend, triangle(), None).unwrap();
        poly.render(&mut backend, &program, false, None);
    }

    #[test]
    fn destroy_releases_exactly_once() {
        let mut backend = RecordingBackend::new();
        let mut poly = Polygon::new(&mut backend, triangle(), None).unwrap();
        poly.destroy(&mut backend);

        assert!(poly.is_destroyed());
        assert_eq!(backend.live_buffers(), 0);
        let deletes = backend
            .calls()
            .iter()
            .filter(|c| matches!(c, BackendCall::DeleteBuffer { .. }))
            .count();
        assert_eq!(deletes, 1);
    }

    // ── scoped ───────────────────────────────────────────────────────────

    #[test]
    fn scoped_polygon_releases_on_drop() {
        let (mut backend, program) = bound_backend();
        {
            let mut scoped = ScopedPolygon::new(&mut backend, triangle(), Some(Color::BLUE)).unwrap();
            scoped.render(&program, false, None);
            assert_eq!(scoped.vertex_count(), 3);
            assert_eq!(scoped.backend().live_buffers(), 1);
        }
        assert_eq!(backend.live_buffers(), 0);
        assert_eq!(backend.draws(), vec![(DrawMode::TriangleFan, 0, 3)]);
    }

    #[test]
    fn scoped_explicit_destroy_releases_once() {
        let mut backend = RecordingBackend::new();
        let scoped = ScopedPolygon::new(&mut backend, triangle(), None).unwrap();
        scoped.destroy();
        assert_eq!(backend.live_buffers(), 0);
    }
}
