// src/demo_scene.rs

use golden_poly::{Color, Point2, ShapeSpec};

pub struct DemoShape {
    pub label: &'static str,
    pub spec: ShapeSpec,
    pub color: Color,
}

/// One of every generated shape, laid out around the viewport centre.
pub fn create_demo_shapes() -> Vec<DemoShape> {
    vec![
        DemoShape {
            label: "Arrow",
            spec: ShapeSpec::Arrow {
                length: 180.0,
                width: 70.0,
                origin: Point2::new(-430.0, 180.0),
                direction: Point2::new(1.0, 0.35),
            },
            color: Color::rgb(255, 165, 0),
        },
        DemoShape {
            label: "Pentagram (centred fan)",
            spec: ShapeSpec::Pentagram {
                length: 60.0,
                tip: Point2::new(-20.0, 320.0),
                inverted: false,
                centered: true,
            },
            color: Color::rgb(255, 215, 0),
        },
        DemoShape {
            label: "Pentagram (inverted ring)",
            spec: ShapeSpec::Pentagram {
                length: 45.0,
                tip: Point2::new(300.0, 60.0),
                inverted: true,
                centered: false,
            },
            color: Color::rgb(192, 192, 192),
        },
        DemoShape {
            label: "Rhomb",
            spec: ShapeSpec::Rhomb { length: 110.0, tip: Point2::new(-400.0, -200.0), direction: 1 },
            color: Color::rgb(0, 128, 128),
        },
        DemoShape {
            label: "Triangle",
            spec: ShapeSpec::Triangle { length: 110.0, tip: Point2::new(-120.0, -220.0), direction: 0 },
            color: Color::RED,
        },
        DemoShape {
            label: "Octagon",
            spec: ShapeSpec::Octagon { length: 70.0, nudge: Point2::new(220.0, -300.0), direction: 1 },
            color: Color::rgb(128, 0, 128),
        },
    ]
}
