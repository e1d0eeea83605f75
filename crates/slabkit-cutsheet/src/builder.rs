//! Configuration to cut-sheet conversion
//!
//! Coordinates are inches with the origin at the slab's bottom-left corner.
//! Backsplash strips are drawn outside the slab outline, and annotation lines
//! are stacked below everything else.

use tracing::debug;

use slabkit_core::geometry::trim_num;
use slabkit_core::{Configuration, CutoutKind, Edge, FaucetHoles, Point, SinkPlacement, SlabShape};

use crate::document::{CutSheetDocument, Entity, EntityKind, Layer};
use crate::options::CutSheetOptions;

/// Builds a [`CutSheetDocument`] from a configuration.
#[derive(Debug, Clone, Default)]
pub struct CutSheetBuilder {
    options: CutSheetOptions,
}

impl CutSheetBuilder {
    pub fn new(options: CutSheetOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CutSheetOptions {
        &self.options
    }

    pub fn build(&self, config: &Configuration) -> CutSheetDocument {
        let mut doc = CutSheetDocument::new();
        let shape = config.shape();

        self.add_outline(&mut doc, shape);

        if let Some((length, width)) = shape.rectangle_dims() {
            for edge in config.polished_edges().iter() {
                let (start, end) = edge_segment(edge, length, width);
                doc.push(Layer::Polished, EntityKind::Line { start, end });
            }
            for edge in config.backsplash_edges() {
                doc.entities.push(self.backsplash_strip(edge, length, width));
            }
            for sink in config.sinks() {
                self.add_sink(&mut doc, sink);
            }
        }

        if self.options.annotate {
            self.add_annotations(&mut doc, config);
        }

        debug!(
            "Built cut sheet for {} with {} entities",
            shape.summary(),
            doc.len()
        );
        doc
    }

    fn add_outline(&self, doc: &mut CutSheetDocument, shape: SlabShape) {
        match shape {
            SlabShape::Rectangle { length, width } => {
                doc.entities.push(Entity::rectangle(
                    Layer::Outline,
                    Point::new(0.0, 0.0),
                    Point::new(length, width),
                ));
            }
            SlabShape::Circle { diameter } => {
                let radius = diameter / 2.0;
                doc.push(
                    Layer::Outline,
                    EntityKind::Circle {
                        center: Point::new(radius, radius),
                        radius,
                    },
                );
            }
            SlabShape::Polygon { .. } => {
                doc.push(
                    Layer::Outline,
                    EntityKind::Polyline {
                        points: shape.polygon_vertices(),
                        closed: true,
                    },
                );
            }
        }
    }

    /// Strip of `backsplash_depth` running along `edge`, offset outward.
    fn backsplash_strip(&self, edge: Edge, length: f64, width: f64) -> Entity {
        let gap = self.options.backsplash_offset;
        let depth = self.options.backsplash_depth;
        let (min, max) = match edge {
            Edge::Top => (
                Point::new(0.0, width + gap),
                Point::new(length, width + gap + depth),
            ),
            Edge::Right => (
                Point::new(length + gap, 0.0),
                Point::new(length + gap + depth, width),
            ),
            Edge::Bottom => (
                Point::new(0.0, -gap - depth),
                Point::new(length, -gap),
            ),
            Edge::Left => (
                Point::new(-gap - depth, 0.0),
                Point::new(-gap, width),
            ),
        };
        Entity::rectangle(Layer::Backsplash, min, max)
    }

    fn add_sink(&self, doc: &mut CutSheetDocument, sink: &SinkPlacement) {
        let shrink = self.options.cutout_shrink;
        let w = sink.width() - shrink;
        let h = sink.height() - shrink;
        let c = sink.center;

        match sink.template.cutout_kind() {
            CutoutKind::Oval => {
                let (major_axis, ratio) = if w >= h {
                    (Point::new(w / 2.0, 0.0), h / w)
                } else {
                    (Point::new(0.0, h / 2.0), w / h)
                };
                doc.push(
                    Layer::Cutout,
                    EntityKind::Ellipse {
                        center: c,
                        major_axis,
                        ratio,
                    },
                );
            }
            CutoutKind::Rect => {
                doc.entities.push(Entity::rectangle(
                    Layer::Cutout,
                    Point::new(c.x - w / 2.0, c.y - h / 2.0),
                    Point::new(c.x + w / 2.0, c.y + h / 2.0),
                ));
            }
        }

        let hole_y = c.y + h / 2.0 + self.options.faucet_setback;
        let radius = self.options.faucet_hole_diameter / 2.0;
        for offset in sink.faucet.offsets() {
            doc.push(
                Layer::Cutout,
                EntityKind::Circle {
                    center: Point::new(c.x + offset, hole_y),
                    radius,
                },
            );
        }
    }

    fn add_annotations(&self, doc: &mut CutSheetDocument, config: &Configuration) {
        let mut lines = vec![format!("Slab: {}", config.shape().summary())];
        if config.is_rectangle() {
            let edges = config.polished_edges();
            let polished = if edges.is_empty() {
                "none".to_string()
            } else {
                edges
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            lines.push(format!("Polished edges: {}", polished));
        }
        for sink in config.sinks() {
            lines.push(sink_summary(sink));
        }

        let height = self.options.text_height;
        let below_backsplash = if config.backsplash_edges().contains(&Edge::Bottom) {
            self.options.backsplash_offset + self.options.backsplash_depth
        } else {
            0.0
        };
        let top = -below_backsplash - 2.0 * height;
        for (i, value) in lines.into_iter().enumerate() {
            doc.push(
                Layer::Text,
                EntityKind::Text {
                    position: Point::new(0.0, top - 2.0 * height * i as f64),
                    height,
                    value,
                },
            );
        }
    }
}

/// Segment along `edge` of a `length` x `width` rectangle.
fn edge_segment(edge: Edge, length: f64, width: f64) -> (Point, Point) {
    match edge {
        Edge::Top => (Point::new(0.0, width), Point::new(length, width)),
        Edge::Right => (Point::new(length, 0.0), Point::new(length, width)),
        Edge::Bottom => (Point::new(0.0, 0.0), Point::new(length, 0.0)),
        Edge::Left => (Point::new(0.0, 0.0), Point::new(0.0, width)),
    }
}

fn sink_summary(sink: &SinkPlacement) -> String {
    let faucet = match sink.faucet {
        FaucetHoles::Single => "1 faucet hole".to_string(),
        FaucetHoles::Triple { spread } => {
            format!("3 faucet holes, {}\" spread", trim_num(spread.inches()))
        }
    };
    format!(
        "Sink {}: {} {}\" x {}\" at ({}, {}), {}",
        sink.id,
        sink.template.display_name(),
        trim_num(sink.width()),
        trim_num(sink.height()),
        trim_num(sink.center.x),
        trim_num(sink.center.y),
        faucet
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use slabkit_core::{FaucetSpread, SinkTemplate};

    fn vanity() -> Configuration {
        let mut config = Configuration::new(SlabShape::rectangle(48.0, 24.0));
        config.add_sink(SinkTemplate::BathOval).unwrap();
        config
    }

    #[test]
    fn test_rectangle_outline_corners() {
        let doc = CutSheetBuilder::default().build(&vanity());
        let outline: Vec<_> = doc.on_layer(Layer::Outline).collect();
        assert_eq!(outline.len(), 1);
        assert_eq!(
            outline[0].kind,
            EntityKind::Polyline {
                points: vec![
                    Point::new(0.0, 0.0),
                    Point::new(48.0, 0.0),
                    Point::new(48.0, 24.0),
                    Point::new(0.0, 24.0),
                ],
                closed: true,
            }
        );
    }

    #[test]
    fn test_circle_outline_is_centered() {
        let config = Configuration::new(SlabShape::circle(30.0));
        let doc = CutSheetBuilder::default().build(&config);
        let outline: Vec<_> = doc.on_layer(Layer::Outline).collect();
        assert_eq!(
            outline[0].kind,
            EntityKind::Circle {
                center: Point::new(15.0, 15.0),
                radius: 15.0
            }
        );
        assert_eq!(doc.on_layer(Layer::Cutout).count(), 0);
        assert_eq!(doc.on_layer(Layer::Polished).count(), 0);
    }

    #[test]
    fn test_polygon_outline_has_one_vertex_per_side() {
        let config = Configuration::new(SlabShape::polygon(7, 10.0));
        let doc = CutSheetBuilder::default().build(&config);
        match &doc.entities[0].kind {
            EntityKind::Polyline { points, closed } => {
                assert_eq!(points.len(), 7);
                assert!(closed);
                let min_x = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
                let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
                assert!(min_x.abs() < 1e-9);
                assert!(min_y.abs() < 1e-9);
            }
            other => panic!("unexpected outline {:?}", other),
        }
    }

    #[test]
    fn test_oval_cutout_and_single_hole() {
        let doc = CutSheetBuilder::default().build(&vanity());
        let cutouts: Vec<_> = doc.on_layer(Layer::Cutout).collect();
        assert_eq!(cutouts.len(), 2);
        assert_eq!(
            cutouts[0].kind,
            EntityKind::Ellipse {
                center: Point::new(24.0, 11.0),
                major_axis: Point::new(8.5, 0.0),
                ratio: 14.0 / 17.0,
            }
        );
        // 11 + 7 + 2
        assert_eq!(
            cutouts[1].kind,
            EntityKind::Circle {
                center: Point::new(24.0, 20.0),
                radius: 0.6875,
            }
        );
    }

    #[test]
    fn test_rect_cutout_with_triple_faucet_and_shrink() {
        let mut config = Configuration::new(SlabShape::rectangle(60.0, 30.0));
        let id = config.add_sink(SinkTemplate::KitchenRect).unwrap();
        config
            .set_faucet(
                id,
                FaucetHoles::Triple {
                    spread: FaucetSpread::Eight,
                },
            )
            .unwrap();
        let center = config.sink(id).unwrap().center;

        let builder = CutSheetBuilder::new(CutSheetOptions {
            cutout_shrink: 0.5,
            ..Default::default()
        });
        let doc = builder.build(&config);
        let cutouts: Vec<_> = doc.on_layer(Layer::Cutout).collect();
        assert_eq!(cutouts.len(), 4);

        match &cutouts[0].kind {
            EntityKind::Polyline { points, closed } => {
                assert!(closed);
                assert_eq!(points[0], Point::new(center.x - 10.75, center.y - 7.75));
                assert_eq!(points[2], Point::new(center.x + 10.75, center.y + 7.75));
            }
            other => panic!("unexpected cutout {:?}", other),
        }

        let xs: Vec<f64> = cutouts[1..]
            .iter()
            .map(|e| match e.kind {
                EntityKind::Circle { center, .. } => center.x,
                _ => f64::NAN,
            })
            .collect();
        assert_eq!(xs, vec![center.x - 4.0, center.x, center.x + 4.0]);
    }

    #[test]
    fn test_backsplash_strips_follow_unpolished_edges() {
        let mut config = Configuration::new(SlabShape::rectangle(48.0, 24.0));
        config.toggle_edge(Edge::Top);
        config.toggle_edge(Edge::Left);
        config.set_backsplash(true);
        let doc = CutSheetBuilder::default().build(&config);

        let polished: Vec<_> = doc.on_layer(Layer::Polished).collect();
        assert_eq!(polished.len(), 2);

        let strips: Vec<_> = doc.on_layer(Layer::Backsplash).map(|e| &e.kind).collect();
        assert_eq!(strips.len(), 2);
        // Right edge first, then bottom.
        assert_eq!(
            *strips[0],
            Entity::rectangle(
                Layer::Backsplash,
                Point::new(49.0, 0.0),
                Point::new(53.0, 24.0)
            )
            .kind
        );
        assert_eq!(
            *strips[1],
            Entity::rectangle(
                Layer::Backsplash,
                Point::new(0.0, -5.0),
                Point::new(48.0, -1.0)
            )
            .kind
        );
    }

    #[test]
    fn test_annotations_list_shape_edges_and_sinks() {
        let mut config = vanity();
        config.toggle_edge(Edge::Bottom);
        let doc = CutSheetBuilder::default().build(&config);
        let text: Vec<String> = doc
            .on_layer(Layer::Text)
            .filter_map(|e| match &e.kind {
                EntityKind::Text { value, .. } => Some(value.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(
            text,
            vec![
                "Slab: Rectangle 48\" x 24\"".to_string(),
                "Polished edges: bottom".to_string(),
                "Sink #1: Oval vanity sink 17\" x 14\" at (24, 11), 1 faucet hole".to_string(),
            ]
        );
    }

    #[test]
    fn test_annotations_can_be_disabled() {
        let builder = CutSheetBuilder::new(CutSheetOptions {
            annotate: false,
            ..Default::default()
        });
        let doc = builder.build(&vanity());
        assert_eq!(doc.on_layer(Layer::Text).count(), 0);
    }
}
