// src/lib.rs

//! Pentagon-family shape generators and a small polygon renderer.
//!
//! [`ShapeGenerator`] produces fan-ordered outlines (arrows, pentagrams,
//! rhombs, triangles, notched octagons); [`Polygon`] uploads one outline to a
//! [`GraphicsBackend`] and draws it filled or outlined.

pub mod color;
pub mod config;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod logging;
pub mod rendering_lib;

pub use color::Color;
pub use error::{BackendError, PolygonError, Result};
pub use generator::{ShapeGenerator, ShapeSpec};
pub use geometry::{Point2, PHI};
pub use rendering_lib::{GraphicsBackend, Polygon, ScopedPolygon, ShaderProgram};
