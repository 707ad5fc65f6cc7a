// tests/render_shapes.rs

use golden_poly::geometry::{fan_area, polygon_area};
use golden_poly::rendering_lib::{
    BackendCall, DrawMode, GraphicsBackend, ProgramId, RecordingBackend, ScopedPolygon,
    ShaderProgram,
};
use golden_poly::{Color, Point2, Polygon, PolygonError, ShapeGenerator, ShapeSpec};

fn program() -> ShaderProgram {
    ShaderProgram::with_default_locations(ProgramId(3))
}

fn all_shapes() -> Vec<ShapeSpec> {
    vec![
        ShapeSpec::Arrow { length: 10.0, width: 4.0, origin: Point2::ORIGIN, direction: Point2::new(1.0, 0.0) },
        ShapeSpec::Pentagram { length: 5.0, tip: Point2::new(0.0, 20.0), inverted: false, centered: false },
        ShapeSpec::Pentagram { length: 5.0, tip: Point2::new(0.0, 20.0), inverted: true, centered: true },
        ShapeSpec::Rhomb { length: 6.0, tip: Point2::new(-10.0, 0.0), direction: 3 },
        ShapeSpec::Triangle { length: 6.0, tip: Point2::new(10.0, 0.0), direction: 4 },
        ShapeSpec::Octagon { length: 3.0, nudge: Point2::new(0.0, -10.0), direction: 2 },
    ]
}

#[test]
fn every_shape_renders_with_its_own_vertex_count() {
    let mut backend = RecordingBackend::new();
    let program = program();
    backend.use_program(&program);

    let mut polygons = Vec::new();
    for spec in all_shapes() {
        let points = spec.points().unwrap();
        polygons.push(Polygon::new(&mut backend, points, Some(Color::RED)).unwrap());
    }
    assert_eq!(backend.live_buffers(), polygons.len());

    backend.clear_calls();
    for polygon in &polygons {
        polygon.render(&mut backend, &program, false, None);
        polygon.render(&mut backend, &program, true, None);
    }

    let expected: Vec<_> = polygons
        .iter()
        .flat_map(|p| {
            [(DrawMode::TriangleFan, 0, p.vertex_count()), (DrawMode::LineLoop, 0, p.vertex_count())]
        })
        .collect();
    assert_eq!(backend.draws(), expected);
    assert_eq!(
        polygons.iter().map(|p| p.vertex_count()).collect::<Vec<_>>(),
        vec![7, 11, 12, 4, 3, 8]
    );
    assert!(backend.enabled_attributes().is_empty());

    for polygon in &mut polygons {
        polygon.destroy(&mut backend);
    }
    assert_eq!(backend.live_buffers(), 0);
}

#[test]
fn uploaded_buffer_holds_generated_points() {
    let mut backend = RecordingBackend::new();
    let points = ShapeGenerator::arrow(10.0, 4.0, Point2::ORIGIN, Point2::new(1.0, 0.0)).unwrap();
    let mut polygon = Polygon::new(&mut backend, points, None).unwrap();

    let data = backend.buffer_data(0).unwrap();
    assert_eq!(data.len(), 14);
    assert!((data[0] - 10.0).abs() < 1e-5 && data[1].abs() < 1e-5);
    assert!((data[2] - 5.0).abs() < 1e-5 && (data[3] - 2.0).abs() < 1e-5);
    polygon.destroy(&mut backend);
}

#[test]
fn hide_show_cycle_controls_draws() {
    let mut backend = RecordingBackend::new();
    let program = program();
    backend.use_program(&program);
    let points = ShapeGenerator::rhomb(2.0, Point2::ORIGIN, 0).unwrap();
    let mut polygon = Polygon::new(&mut backend, points, None).unwrap();

    polygon.hide();
    polygon.render(&mut backend, &program, true, None);
    assert!(backend.draws().is_empty());

    polygon.show();
    polygon.show();
    polygon.render(&mut backend, &program, true, None);
    assert_eq!(backend.draws(), vec![(DrawMode::LineLoop, 0, 4)]);
    polygon.destroy(&mut backend);
}

#[test]
fn invalid_arrow_never_reaches_the_backend() {
    let mut backend = RecordingBackend::new();
    let result = ShapeGenerator::arrow(10.0, 4.0, Point2::ORIGIN, Point2::ORIGIN)
        .and_then(|points| Polygon::new(&mut backend, points, None));
    assert!(matches!(result, Err(PolygonError::InvalidArgument(_))));
    assert!(backend.calls().is_empty());
}

#[test]
fn scoped_polygons_release_even_on_early_return() {
    fn draw_until_error(backend: &mut RecordingBackend, program: &ShaderProgram) -> golden_poly::Result<()> {
        let points = ShapeGenerator::triangle(1.0, Point2::ORIGIN, 1)?;
        let mut scoped = ScopedPolygon::new(backend, points, Some(Color::BLUE))?;
        scoped.render(program, false, None);
        ShapeGenerator::rhomb(1.0, Point2::ORIGIN, 7)?;
        Ok(())
    }

    let mut backend = RecordingBackend::new();
    let program = program();
    backend.use_program(&program);
    assert!(draw_until_error(&mut backend, &program).is_err());
    assert_eq!(backend.live_buffers(), 0);
    assert!(backend.calls().iter().any(|c| matches!(c, BackendCall::DeleteBuffer { id: 0 })));
}

#[test]
fn convex_and_star_shaped_outlines_fill_exactly() {
    let shapes = [
        ShapeGenerator::arrow(12.0, 5.0, Point2::new(1.0, 1.0), Point2::new(-1.0, 2.0)).unwrap(),
        ShapeGenerator::rhomb(4.0, Point2::ORIGIN, 2).unwrap(),
        ShapeGenerator::triangle(4.0, Point2::ORIGIN, 3).unwrap(),
        ShapeGenerator::pentagram_centered(3.0, Point2::ORIGIN, true).unwrap(),
    ];
    for points in &shapes {
        let (fan, exact) = (fan_area(points), polygon_area(points));
        assert!((fan - exact).abs() <= 1e-3 * exact, "fan {fan} vs outline {exact}");
    }
}

#[test]
fn tip_led_pentagram_fan_overdraws_its_outline() {
    // The ring form pivots on an outer point, so its fan spills past the
    // concave edges; the centred form does not.
    let ring = ShapeGenerator::pentagram(3.0, Point2::ORIGIN, false).unwrap();
    assert!(fan_area(&ring) > polygon_area(&ring) * 1.01);
}
