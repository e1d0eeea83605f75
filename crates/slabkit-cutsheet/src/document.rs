//! Cut-sheet document model
//!
//! A [`CutSheetDocument`] is an ordered list of drawing entities, each on one
//! of a fixed set of layers. It is built once per export and handed to
//! [`DxfWriter`](crate::DxfWriter) for emission.

use std::fmt;

use slabkit_core::Point;

/// Drawing layers, in the order they are declared in the layer table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layer {
    Outline,
    Polished,
    Backsplash,
    Cutout,
    Text,
}

impl Layer {
    pub const ALL: [Layer; 5] = [
        Layer::Outline,
        Layer::Polished,
        Layer::Backsplash,
        Layer::Cutout,
        Layer::Text,
    ];

    /// Layer name as written to the drawing.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Outline => "OUTLINE",
            Self::Polished => "POLISHED",
            Self::Backsplash => "BACKSPLASH",
            Self::Cutout => "CUTOUT",
            Self::Text => "TEXT",
        }
    }

    /// ACI color index used for the layer.
    pub fn color(&self) -> i16 {
        match self {
            Self::Outline => 7,
            Self::Polished => 3,
            Self::Backsplash => 5,
            Self::Cutout => 1,
            Self::Text => 8,
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Geometry of one drawing entity.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    Polyline {
        points: Vec<Point>,
        closed: bool,
    },
    Circle {
        center: Point,
        radius: f64,
    },
    /// `major_axis` is the endpoint of the major axis relative to `center`;
    /// `ratio` is minor over major length.
    Ellipse {
        center: Point,
        major_axis: Point,
        ratio: f64,
    },
    Line {
        start: Point,
        end: Point,
    },
    Text {
        position: Point,
        height: f64,
        value: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub layer: Layer,
    pub kind: EntityKind,
}

impl Entity {
    pub fn new(layer: Layer, kind: EntityKind) -> Self {
        Self { layer, kind }
    }

    /// Closed polyline through the corners of an axis-aligned rectangle.
    pub fn rectangle(layer: Layer, min: Point, max: Point) -> Self {
        Self::new(
            layer,
            EntityKind::Polyline {
                points: vec![
                    Point::new(min.x, min.y),
                    Point::new(max.x, min.y),
                    Point::new(max.x, max.y),
                    Point::new(min.x, max.y),
                ],
                closed: true,
            },
        )
    }
}

/// Ordered entities making up one cut sheet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CutSheetDocument {
    pub entities: Vec<Entity>,
}

impl CutSheetDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, layer: Layer, kind: EntityKind) {
        self.entities.push(Entity::new(layer, kind));
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entities on `layer`, in document order.
    pub fn on_layer(&self, layer: Layer) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.iter().filter(move |e| e.layer == layer)
    }
}
