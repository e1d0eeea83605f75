//! Slab geometry
//!
//! Shape variants, dimension limits, and area formulas for countertop slabs.
//! All lengths are in inches and all areas are reported in square feet.
//!
//! Out-of-range input is clamped, never rejected: every keystroke in the
//! editor must still produce a slab that can be drawn.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Square inches per square foot.
pub const SQ_IN_PER_SQ_FT: f64 = 144.0;

/// Smallest length accepted for any slab dimension (in).
pub const MIN_DIMENSION: f64 = 1.0;
/// Longest rectangle length (in).
pub const MAX_RECT_LENGTH: f64 = 72.0;
/// Widest rectangle width (in).
pub const MAX_RECT_WIDTH: f64 = 62.0;
/// Largest circle diameter, also the polygon circumscribed-diameter ceiling (in).
pub const MAX_DIAMETER: f64 = 62.0;
/// Fewest polygon sides.
pub const MIN_POLYGON_SIDES: u32 = 5;
/// Most polygon sides.
pub const MAX_POLYGON_SIDES: u32 = 18;

/// A 2D point in slab coordinates (inches, origin at the bottom-left corner).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Shape selector used by the shape picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Polygon,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rectangle => write!(f, "rectangle"),
            Self::Circle => write!(f, "circle"),
            Self::Polygon => write!(f, "polygon"),
        }
    }
}

/// Slab outline together with its variant-specific dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SlabShape {
    Rectangle { length: f64, width: f64 },
    Circle { diameter: f64 },
    Polygon { sides: u32, side_length: f64 },
}

impl Default for SlabShape {
    fn default() -> Self {
        Self::default_for(ShapeKind::Rectangle)
    }
}

impl SlabShape {
    /// Rectangle with both dimensions clamped into range.
    pub fn rectangle(length: f64, width: f64) -> Self {
        Self::Rectangle {
            length: clamp_dimension(length, MAX_RECT_LENGTH),
            width: clamp_dimension(width, MAX_RECT_WIDTH),
        }
    }

    /// Circle with the diameter clamped into range.
    pub fn circle(diameter: f64) -> Self {
        Self::Circle {
            diameter: clamp_dimension(diameter, MAX_DIAMETER),
        }
    }

    /// Regular polygon. The side count is clamped first, then the side
    /// length is clamped against the ceiling implied by that side count.
    pub fn polygon(sides: u32, side_length: f64) -> Self {
        let sides = sides.clamp(MIN_POLYGON_SIDES, MAX_POLYGON_SIDES);
        Self::Polygon {
            sides,
            side_length: clamp_dimension(side_length, polygon_max_side_length(sides)),
        }
    }

    /// Starting dimensions used when the buyer picks a shape.
    pub fn default_for(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Rectangle => Self::rectangle(36.0, 25.5),
            ShapeKind::Circle => Self::circle(36.0),
            ShapeKind::Polygon => Self::polygon(6, 12.0),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Rectangle { .. } => ShapeKind::Rectangle,
            Self::Circle { .. } => ShapeKind::Circle,
            Self::Polygon { .. } => ShapeKind::Polygon,
        }
    }

    /// Re-apply the dimension limits for this variant.
    pub fn clamped(self) -> Self {
        match self {
            Self::Rectangle { length, width } => Self::rectangle(length, width),
            Self::Circle { diameter } => Self::circle(diameter),
            Self::Polygon { sides, side_length } => Self::polygon(sides, side_length),
        }
    }

    /// Length and width when this is a rectangle.
    pub fn rectangle_dims(&self) -> Option<(f64, f64)> {
        match *self {
            Self::Rectangle { length, width } => Some((length, width)),
            _ => None,
        }
    }

    /// Top-face area in square feet.
    pub fn area_sqft(&self) -> f64 {
        let sq_in = match *self {
            Self::Rectangle { length, width } => length * width,
            Self::Circle { diameter } => {
                let r = diameter / 2.0;
                PI * r * r
            }
            Self::Polygon { sides, side_length } => {
                let n = sides as f64;
                n * side_length * side_length / (4.0 * (PI / n).tan())
            }
        };
        sq_in / SQ_IN_PER_SQ_FT
    }

    /// Diameter of the smallest circle enclosing the outline.
    pub fn circumscribed_diameter(&self) -> f64 {
        match *self {
            Self::Rectangle { length, width } => length.hypot(width),
            Self::Circle { diameter } => diameter,
            Self::Polygon { sides, side_length } => side_length / (PI / sides as f64).sin(),
        }
    }

    /// Width and height of the axis-aligned bounding box of the outline.
    pub fn bounding_box(&self) -> (f64, f64) {
        match *self {
            Self::Rectangle { length, width } => (length, width),
            Self::Circle { diameter } => (diameter, diameter),
            Self::Polygon { .. } => {
                let vertices = self.polygon_vertices();
                let (min_x, max_x, min_y, max_y) = extents(&vertices);
                (max_x - min_x, max_y - min_y)
            }
        }
    }

    /// Vertices of a polygon outline, counter-clockwise, translated so the
    /// bounding box starts at the origin. Empty for other shapes.
    ///
    /// The first vertex sits at the bottom of the circumscribed circle rotated
    /// by half a step, which puts one flat side along the x axis.
    pub fn polygon_vertices(&self) -> Vec<Point> {
        let Self::Polygon { sides, side_length } = *self else {
            return Vec::new();
        };
        let n = sides as f64;
        let radius = side_length / (2.0 * (PI / n).sin());
        let start = -PI / 2.0 - PI / n;

        let raw: Vec<Point> = (0..sides)
            .map(|i| {
                let theta = start + 2.0 * PI * (i as f64) / n;
                Point::new(radius * theta.cos(), radius * theta.sin())
            })
            .collect();

        let (min_x, _, min_y, _) = extents(&raw);
        raw.into_iter()
            .map(|p| Point::new(p.x - min_x, p.y - min_y))
            .collect()
    }

    /// One-line human summary, e.g. `Rectangle 36" x 25.5"`.
    pub fn summary(&self) -> String {
        match *self {
            Self::Rectangle { length, width } => {
                format!("Rectangle {}\" x {}\"", trim_num(length), trim_num(width))
            }
            Self::Circle { diameter } => format!("Circle {}\" diameter", trim_num(diameter)),
            Self::Polygon { sides, side_length } => format!(
                "{}-sided polygon, {}\" sides",
                sides,
                trim_num(side_length)
            ),
        }
    }
}

/// Longest side allowed for an `n`-gon so its circumscribed diameter stays
/// within [`MAX_DIAMETER`].
pub fn polygon_max_side_length(sides: u32) -> f64 {
    MAX_DIAMETER * (PI / sides as f64).sin()
}

fn clamp_dimension(value: f64, max: f64) -> f64 {
    if value.is_nan() {
        return MIN_DIMENSION;
    }
    value.clamp(MIN_DIMENSION, max)
}

fn extents(points: &[Point]) -> (f64, f64, f64, f64) {
    points.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
        |(min_x, max_x, min_y, max_y), p| {
            (min_x.min(p.x), max_x.max(p.x), min_y.min(p.y), max_y.max(p.y))
        },
    )
}

/// Format a dimension with at most three decimals and no trailing zeros.
pub fn trim_num(value: f64) -> String {
    let s = format!("{:.3}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}
