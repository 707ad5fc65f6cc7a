// src/generator.rs

//! Point generators for the pentagon-family shapes.
//!
//! Every generator returns its outline in draw order with the triangle-fan
//! pivot first, so the result can be handed straight to
//! [`Polygon::new`](crate::rendering_lib::Polygon::new). Coordinates follow the
//! crate convention: +X right, +Y up.

use glam::{DVec2, Vec2};

use crate::error::{PolygonError, Result};
use crate::geometry::{Point2, PHI, PI_5};

/// Number of distinct axes a pentagon-aligned shape can point along.
pub const DIRECTIONS: u8 = 5;

pub struct ShapeGenerator;

impl ShapeGenerator {
    /// Seven-point arrow pointing from `origin` along `direction`.
    ///
    /// Order: tip, outer flank, notch, tail, then the same three mirrored.
    /// The tip leads because the silhouette is only star-shaped around it.
    pub fn arrow(length: f32, width: f32, origin: Point2, direction: Point2) -> Result<Vec<Point2>> {
        check_length("arrow length", length)?;
        check_length("arrow width", width)?;
        check_point("arrow origin", origin)?;

        // f64 so the squared length cannot overflow or flush to zero.
        let dir = DVec2::new(f64::from(direction.x), f64::from(direction.y))
            .try_normalize()
            .map(|d| d.as_vec2())
            .ok_or_else(|| PolygonError::invalid("arrow direction must be a nonzero finite vector"))?;
        let normal = dir.perp();
        let base = Vec2::from(origin);
        let head = base + dir * (length / 2.0);

        let flank = normal * (width / 2.0);
        let shaft = normal * (width / 4.0);

        Ok(vec![
            (base + dir * length).into(),
            (head + flank).into(),
            (head + shaft).into(),
            (base + shaft).into(),
            (base - shaft).into(),
            (head - shaft).into(),
            (head - flank).into(),
        ])
    }

    /// Five-pointed star as an 11-point ring, alternating outer radius `R` and
    /// inner radius `r`, starting and ending on `tip`.
    ///
    /// The first vertex is the tip itself, not the centre. Use
    /// [`pentagram_centered`](Self::pentagram_centered) for a fan that fills
    /// the star without spilling over the concave edges.
    pub fn pentagram(length: f32, tip: Point2, inverted: bool) -> Result<Vec<Point2>> {
        let (center, ring) = Self::pentagram_ring(length, tip, inverted)?;
        log::trace!("pentagram centre at {:?}", center);
        Ok(ring)
    }

    /// [`pentagram`](Self::pentagram) prefixed with the star's centre.
    pub fn pentagram_centered(length: f32, tip: Point2, inverted: bool) -> Result<Vec<Point2>> {
        let (center, ring) = Self::pentagram_ring(length, tip, inverted)?;
        let mut points = Vec::with_capacity(ring.len() + 1);
        points.push(center);
        points.extend(ring);
        Ok(points)
    }

    fn pentagram_ring(length: f32, tip: Point2, inverted: bool) -> Result<(Point2, Vec<Point2>)> {
        check_length("pentagram length", length)?;
        check_point("pentagram tip", tip)?;

        let (outer, inner) = pentagram_radii(length);
        let (center, base) = if inverted {
            (Point2::new(tip.x, tip.y + outer), -std::f32::consts::FRAC_PI_2)
        } else {
            (Point2::new(tip.x, tip.y - outer), std::f32::consts::FRAC_PI_2)
        };

        let mut ring = Vec::with_capacity(11);
        ring.push(tip);
        for i in 1..10 {
            let radius = if i % 2 == 0 { outer } else { inner };
            ring.push(center.polar_offset(radius, base + i as f32 * PI_5));
        }
        ring.push(tip);
        Ok((center, ring))
    }

    /// Fat rhomb (72° at the tip) with sides `length`.
    ///
    /// Order: tip, side at `axis + π/5`, far vertex at `φ·length`, side at
    /// `axis − π/5`.
    pub fn rhomb(length: f32, tip: Point2, direction: u8) -> Result<Vec<Point2>> {
        check_length("rhomb length", length)?;
        check_point("rhomb tip", tip)?;
        let axis = axis_angle(direction)?;

        Ok(vec![
            tip,
            tip.polar_offset(length, axis + PI_5),
            tip.polar_offset(PHI * length, axis),
            tip.polar_offset(length, axis - PI_5),
        ])
    }

    /// Golden gnomon half of a rhomb: tip, far vertex, flank at `axis + π/5`.
    pub fn triangle(length: f32, tip: Point2, direction: u8) -> Result<Vec<Point2>> {
        check_length("triangle length", length)?;
        check_point("triangle tip", tip)?;
        let axis = axis_angle(direction)?;

        Ok(vec![
            tip,
            tip.polar_offset(PHI * length, axis),
            tip.polar_offset(length, axis + PI_5),
        ])
    }

    /// Notched octagon traced as a walk of seven `length` steps from `nudge`.
    ///
    /// Turns are `+2π/5` except the fifth step, which turns back by `π/5`
    /// and cuts the notch. The closing edge is implied by the draw mode.
    pub fn octagon(length: f32, nudge: Point2, direction: u8) -> Result<Vec<Point2>> {
        check_length("octagon length", length)?;
        check_point("octagon nudge", nudge)?;
        let mut angle = axis_angle(direction)? - 3.0 * PI_5;

        const TURNS: [f32; 7] = [0.0, 2.0, 2.0, 2.0, -1.0, 2.0, 2.0];

        let mut points = Vec::with_capacity(TURNS.len() + 1);
        let mut cursor = nudge;
        points.push(cursor);
        for turn in TURNS {
            angle += turn * PI_5;
            cursor = cursor.polar_offset(length, angle);
            points.push(cursor);
        }
        Ok(points)
    }
}

/// Outer and inner pentagram radii for edge `length`.
pub fn pentagram_radii(length: f32) -> (f32, f32) {
    let sqrt5 = 5.0f32.sqrt();
    let scale = PHI * PHI * length;
    let outer = scale * ((5.0 - sqrt5) / 10.0).sqrt();
    let inner = scale * ((25.0 - 11.0 * sqrt5) / 10.0).sqrt();
    (outer, inner)
}

fn axis_angle(direction: u8) -> Result<f32> {
    if direction >= DIRECTIONS {
        return Err(PolygonError::invalid(format!(
            "direction must be in 0..{DIRECTIONS}, got {direction}"
        )));
    }
    Ok(direction as f32 * 2.0 * PI_5)
}

fn check_length(what: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PolygonError::invalid(format!("{what} must be finite and positive, got {value}")))
    }
}

fn check_point(what: &str, p: Point2) -> Result<()> {
    if p.is_finite() {
        Ok(())
    } else {
        Err(PolygonError::invalid(format!("{what} must be finite, got {p:?}")))
    }
}

/// A parameterized shape, resolved to points on demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeSpec {
    Arrow { length: f32, width: f32, origin: Point2, direction: Point2 },
    Pentagram { length: f32, tip: Point2, inverted: bool, centered: bool },
    Rhomb { length: f32, tip: Point2, direction: u8 },
    Triangle { length: f32, tip: Point2, direction: u8 },
    Octagon { length: f32, nudge: Point2, direction: u8 },
}

impl ShapeSpec {
    pub fn name(&self) -> &'static str {
        match self {
            ShapeSpec::Arrow { .. } => "arrow",
            ShapeSpec::Pentagram { .. } => "pentagram",
            ShapeSpec::Rhomb { .. } => "rhomb",
            ShapeSpec::Triangle { .. } => "triangle",
            ShapeSpec::Octagon { .. } => "octagon",
        }
    }

    pub fn points(&self) -> Result<Vec<Point2>> {
        match *self {
            ShapeSpec::Arrow { length, width, origin, direction } => {
                ShapeGenerator::arrow(length, width, origin, direction)
            }
            ShapeSpec::Pentagram { length, tip, inverted, centered: false } => {
                ShapeGenerator::pentagram(length, tip, inverted)
            }
            ShapeSpec::Pentagram { length, tip, inverted, centered: true } => {
                ShapeGenerator::pentagram_centered(length, tip, inverted)
            }
            ShapeSpec::Rhomb { length, tip, direction } => ShapeGenerator::rhomb(length, tip, direction),
            ShapeSpec::Triangle { length, tip, direction } => {
                ShapeGenerator::triangle(length, tip, direction)
            }
            ShapeSpec::Octagon { length, nudge, direction } => {
                ShapeGenerator::octagon(length, nudge, direction)
            }
        }
    }
}
