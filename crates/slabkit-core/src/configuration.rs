//! The countertop configuration aggregate
//!
//! A [`Configuration`] is owned by exactly one editing session and mutated
//! only through the command handlers below. Every handler either commits a
//! state that satisfies all geometry and placement invariants or leaves the
//! configuration untouched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

use crate::error::{ConfigurationError, PlacementError, PlacementResult};
use crate::geometry::{Point, ShapeKind, SlabShape};
use crate::placement::{self, PlacementBounds, MAX_SINKS};
use crate::sink::{FaucetHoles, SinkId, SinkPlacement, SinkTemplate};

/// Longest stone color key a configuration carries, in characters.
pub const MAX_STONE_COLOR_LEN: usize = 2000;
/// Longest destination ZIP a configuration carries, in characters.
pub const MAX_ZIP_LEN: usize = 32;

/// A rectangular slab edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// Length of this edge on a `length` x `width` rectangle.
    pub fn length_on(&self, length: f64, width: f64) -> f64 {
        match self {
            Self::Top | Self::Bottom => length,
            Self::Left | Self::Right => width,
        }
    }

    /// Single-letter code used in compact encodings.
    pub fn code(&self) -> char {
        match self {
            Self::Top => 'T',
            Self::Right => 'R',
            Self::Bottom => 'B',
            Self::Left => 'L',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'T' => Some(Self::Top),
            'R' => Some(Self::Right),
            'B' => Some(Self::Bottom),
            'L' => Some(Self::Left),
            _ => None,
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Top => write!(f, "top"),
            Self::Right => write!(f, "right"),
            Self::Bottom => write!(f, "bottom"),
            Self::Left => write!(f, "left"),
        }
    }
}

/// Set of polished edges, always iterated top, right, bottom, left.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeSet(BTreeSet<Edge>);

impl EdgeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Edge::ALL.into_iter().collect()
    }

    pub fn contains(&self, edge: Edge) -> bool {
        self.0.contains(&edge)
    }

    pub fn insert(&mut self, edge: Edge) -> bool {
        self.0.insert(edge)
    }

    pub fn remove(&mut self, edge: Edge) -> bool {
        self.0.remove(&edge)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Edge> + '_ {
        self.0.iter().copied()
    }

    /// Edges not in the set, in canonical order.
    pub fn complement(&self) -> Vec<Edge> {
        Edge::ALL.into_iter().filter(|e| !self.contains(*e)).collect()
    }

    /// Canonical subset string such as `"TB"`.
    pub fn codes(&self) -> String {
        self.iter().map(|e| e.code()).collect()
    }
}

impl FromIterator<Edge> for EdgeSet {
    fn from_iter<I: IntoIterator<Item = Edge>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Result of a drag step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    /// The sink moved to this (clamped, snapped) center.
    Moved(Point),
    /// The move would violate clearance; the sink stayed where it was.
    Withheld,
}

/// Report returned by a dimension edit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DimensionChange {
    /// The shape as committed after clamping.
    pub shape: SlabShape,
    /// Sinks removed because they no longer fit the resized slab.
    pub dropped_sinks: Vec<SinkId>,
    /// True when the edit switched shape kind and reset edge/sink state.
    pub shape_reset: bool,
}

/// Unvalidated view of a configuration, used to rebuild one from a token or
/// a design file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigurationParts {
    pub shape: SlabShape,
    pub polished_edges: EdgeSet,
    pub backsplash: bool,
    pub sinks: Vec<SinkPlacement>,
    pub next_sink_id: u32,
    pub stone_color: String,
    pub destination_zip: String,
}

/// Root aggregate describing one countertop design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    shape: SlabShape,
    #[serde(default)]
    polished_edges: EdgeSet,
    #[serde(default)]
    backsplash: bool,
    #[serde(default)]
    sinks: Vec<SinkPlacement>,
    #[serde(default = "first_sink_id")]
    next_sink_id: u32,
    #[serde(default)]
    stone_color: String,
    #[serde(default)]
    destination_zip: String,
}

fn first_sink_id() -> u32 {
    1
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new(SlabShape::default())
    }
}

impl Configuration {
    /// Fresh configuration for `shape` (clamped) with no sinks, no polished
    /// edges and no backsplash.
    pub fn new(shape: SlabShape) -> Self {
        Self {
            shape: shape.clamped(),
            polished_edges: EdgeSet::new(),
            backsplash: false,
            sinks: Vec::new(),
            next_sink_id: first_sink_id(),
            stone_color: String::new(),
            destination_zip: String::new(),
        }
    }

    pub fn shape(&self) -> SlabShape {
        self.shape
    }

    pub fn is_rectangle(&self) -> bool {
        self.shape.kind() == ShapeKind::Rectangle
    }

    pub fn polished_edges(&self) -> &EdgeSet {
        &self.polished_edges
    }

    pub fn backsplash(&self) -> bool {
        self.backsplash
    }

    pub fn sinks(&self) -> &[SinkPlacement] {
        &self.sinks
    }

    pub fn sink(&self, id: SinkId) -> Option<&SinkPlacement> {
        self.sinks.iter().find(|s| s.id == id)
    }

    pub fn next_sink_id(&self) -> u32 {
        self.next_sink_id
    }

    pub fn stone_color(&self) -> &str {
        &self.stone_color
    }

    pub fn destination_zip(&self) -> &str {
        &self.destination_zip
    }

    /// Edges that receive a backsplash: every unpolished edge of a rectangle
    /// when a backsplash was requested.
    pub fn backsplash_edges(&self) -> Vec<Edge> {
        if self.backsplash && self.is_rectangle() {
            self.polished_edges.complement()
        } else {
            Vec::new()
        }
    }

    /// Switch shape kind. Picking a different kind resets sinks, polished
    /// edges and backsplash; picking the current kind changes nothing.
    /// Returns whether the configuration changed.
    pub fn apply_shape_change(&mut self, kind: ShapeKind) -> bool {
        if self.shape.kind() == kind {
            return false;
        }
        self.reset_to(SlabShape::default_for(kind));
        true
    }

    fn reset_to(&mut self, shape: SlabShape) {
        debug!("Shape changed to {}, resetting edges and sinks", shape.kind());
        self.shape = shape.clamped();
        self.sinks.clear();
        self.polished_edges = EdgeSet::new();
        self.backsplash = false;
    }

    /// Edit dimensions. Values are clamped; sinks on a resized rectangle are
    /// re-seated and any that no longer fit are dropped.
    pub fn set_dimensions(&mut self, shape: SlabShape) -> DimensionChange {
        if shape.kind() != self.shape.kind() {
            self.reset_to(shape);
            return DimensionChange {
                shape: self.shape,
                dropped_sinks: Vec::new(),
                shape_reset: true,
            };
        }

        self.shape = shape.clamped();
        let dropped_sinks = match self.shape.rectangle_dims() {
            Some((length, width)) if !self.sinks.is_empty() => {
                let (kept, dropped) = placement::reflow(length, width, &self.sinks);
                self.sinks = kept;
                dropped
            }
            _ => Vec::new(),
        };

        DimensionChange {
            shape: self.shape,
            dropped_sinks,
            shape_reset: false,
        }
    }

    fn rectangle_dims(&self) -> PlacementResult<(f64, f64)> {
        self.shape
            .rectangle_dims()
            .ok_or(PlacementError::RequiresRectangle)
    }

    /// Add a sink, auto-placing it. The first sink goes to the default
    /// position; a second one goes to the first suggested position that
    /// clears the existing sink.
    pub fn add_sink(&mut self, template: SinkTemplate) -> PlacementResult<SinkId> {
        let (length, width) = self.rectangle_dims()?;
        if self.sinks.len() >= MAX_SINKS {
            return Err(PlacementError::AtCapacity { max: MAX_SINKS });
        }

        let center = placement::place_new(template, length, width, &self.sinks)
            .inspect_err(|e| debug!("Rejected {} sink: {}", template, e))?;

        let id = SinkId(self.next_sink_id);
        self.next_sink_id += 1;
        self.sinks.push(SinkPlacement::new(id, template, center));
        debug!("Placed sink {} ({}) at ({}, {})", id, template, center.x, center.y);
        Ok(id)
    }

    /// Drag a sink toward `proposed`. The position is clamped into the valid
    /// region; if it would collide with another sink the move is withheld.
    pub fn move_sink_to(&mut self, id: SinkId, proposed: Point) -> PlacementResult<DragOutcome> {
        let (length, width) = self.rectangle_dims()?;
        let index = self.sink_index(id)?;
        let sink = self.sinks[index];

        match placement::resolve_drag(&sink, proposed, length, width, &self.sinks) {
            Some(center) => {
                self.sinks[index].center = center;
                Ok(DragOutcome::Moved(center))
            }
            None => {
                debug!("Withheld drag of sink {} to ({}, {})", id, proposed.x, proposed.y);
                Ok(DragOutcome::Withheld)
            }
        }
    }

    /// Remove a sink. Remaining sinks keep their ids.
    pub fn remove_sink(&mut self, id: SinkId) -> PlacementResult<SinkPlacement> {
        let index = self.sink_index(id)?;
        Ok(self.sinks.remove(index))
    }

    /// Change the faucet drilling for a sink.
    pub fn set_faucet(&mut self, id: SinkId, faucet: FaucetHoles) -> PlacementResult<()> {
        let index = self.sink_index(id)?;
        self.sinks[index].faucet = faucet;
        Ok(())
    }

    fn sink_index(&self, id: SinkId) -> PlacementResult<usize> {
        self.sinks
            .iter()
            .position(|s| s.id == id)
            .ok_or(PlacementError::UnknownSink(id))
    }

    /// Toggle an edge's polish. Returns the new polished state, or `None`
    /// when the slab is not a rectangle.
    pub fn toggle_edge(&mut self, edge: Edge) -> Option<bool> {
        if !self.is_rectangle() {
            return None;
        }
        if self.polished_edges.contains(edge) {
            self.polished_edges.remove(edge);
            Some(false)
        } else {
            self.polished_edges.insert(edge);
            Some(true)
        }
    }

    /// Replace the polished edge set. Ignored for non-rectangles.
    pub fn set_polished_edges(&mut self, edges: EdgeSet) {
        if self.is_rectangle() {
            self.polished_edges = edges;
        }
    }

    /// Request or cancel a backsplash. Returns the committed value, which is
    /// always `false` for non-rectangles.
    pub fn set_backsplash(&mut self, requested: bool) -> bool {
        self.backsplash = requested && self.is_rectangle();
        self.backsplash
    }

    /// Select a stone color. Keys longer than [`MAX_STONE_COLOR_LEN`]
    /// characters are cut to that length.
    pub fn set_stone_color(&mut self, key: impl Into<String>) {
        let key = key.into();
        self.stone_color = if key.chars().count() > MAX_STONE_COLOR_LEN {
            key.chars().take(MAX_STONE_COLOR_LEN).collect()
        } else {
            key
        };
    }

    /// Set the shipping destination. Surrounding whitespace is dropped and
    /// the rest is cut to [`MAX_ZIP_LEN`] characters.
    pub fn set_destination_zip(&mut self, zip: impl Into<String>) {
        self.destination_zip = zip.into().trim().chars().take(MAX_ZIP_LEN).collect();
    }

    /// Unvalidated copy of every field.
    pub fn to_parts(&self) -> ConfigurationParts {
        ConfigurationParts {
            shape: self.shape,
            polished_edges: self.polished_edges.clone(),
            backsplash: self.backsplash,
            sinks: self.sinks.clone(),
            next_sink_id: self.next_sink_id,
            stone_color: self.stone_color.clone(),
            destination_zip: self.destination_zip.clone(),
        }
    }

    /// Rebuild a configuration from raw parts.
    ///
    /// Dimensions are clamped. Edge and backsplash state on a non-rectangle
    /// is discarded. Sink centers inside their valid region are snapped onto
    /// the 0.01in grid; any other sink state must already satisfy every
    /// placement rule and is never repaired here.
    pub fn from_parts(parts: ConfigurationParts) -> Result<Self, ConfigurationError> {
        let shape = parts.shape.clamped();
        let rectangle = shape.rectangle_dims();

        if rectangle.is_none() && !parts.sinks.is_empty() {
            return Err(ConfigurationError::SinksOnNonRectangle);
        }
        if parts.sinks.len() > MAX_SINKS {
            return Err(ConfigurationError::TooManySinks {
                count: parts.sinks.len(),
                max: MAX_SINKS,
            });
        }

        let mut seen = BTreeSet::new();
        for sink in &parts.sinks {
            if sink.id.0 == 0 || sink.id.0 >= parts.next_sink_id || !seen.insert(sink.id) {
                return Err(ConfigurationError::InvalidSinkId(sink.id));
            }
        }

        if parts.stone_color.chars().count() > MAX_STONE_COLOR_LEN {
            return Err(ConfigurationError::StoneColorTooLong {
                len: parts.stone_color.chars().count(),
                max: MAX_STONE_COLOR_LEN,
            });
        }

        let destination_zip = parts.destination_zip.trim().to_string();
        if destination_zip.chars().count() > MAX_ZIP_LEN {
            return Err(ConfigurationError::ZipTooLong {
                len: destination_zip.chars().count(),
                max: MAX_ZIP_LEN,
            });
        }

        let mut sinks = parts.sinks;
        if let Some((length, width)) = rectangle {
            for sink in &mut sinks {
                let bounds = PlacementBounds::for_template(sink.template, length, width);
                if bounds.contains(sink.center) {
                    sink.center = bounds.snap(sink.center);
                }
            }
            if !placement::layout_is_valid(length, width, &sinks)
                || !sinks.iter().all(|sink| placement::on_grid(sink.center))
            {
                return Err(ConfigurationError::InvalidLayout);
            }
        }

        let is_rectangle = rectangle.is_some();
        Ok(Self {
            shape,
            polished_edges: if is_rectangle {
                parts.polished_edges
            } else {
                EdgeSet::new()
            },
            backsplash: parts.backsplash && is_rectangle,
            sinks,
            next_sink_id: parts.next_sink_id.max(first_sink_id()),
            stone_color: parts.stone_color,
            destination_zip,
        })
    }

    /// Re-check a configuration that arrived through serde (for example a
    /// design file), clamping dimensions and rejecting invalid sink state.
    pub fn validated(self) -> Result<Self, ConfigurationError> {
        Self::from_parts(self.to_parts())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_change_resets_state() {
        let mut config = Configuration::new(SlabShape::rectangle(60.0, 30.0));
        config.add_sink(SinkTemplate::BathOval).unwrap();
        config.toggle_edge(Edge::Top);
        config.set_backsplash(true);

        assert!(config.apply_shape_change(ShapeKind::Circle));
        assert!(config.sinks().is_empty());
        assert!(config.polished_edges().is_empty());
        assert!(!config.backsplash());
        assert_eq!(config.shape(), SlabShape::circle(36.0));
    }

    #[test]
    fn test_same_shape_pick_is_noop() {
        let mut config = Configuration::new(SlabShape::rectangle(60.0, 30.0));
        config.toggle_edge(Edge::Left);
        assert!(!config.apply_shape_change(ShapeKind::Rectangle));
        assert!(config.polished_edges().contains(Edge::Left));
    }

    #[test]
    fn test_edges_and_backsplash_ignored_on_circle() {
        let mut config = Configuration::new(SlabShape::circle(40.0));
        assert_eq!(config.toggle_edge(Edge::Top), None);
        assert!(!config.set_backsplash(true));
        assert_eq!(
            config.add_sink(SinkTemplate::BarOval),
            Err(PlacementError::RequiresRectangle)
        );
    }

    #[test]
    fn test_remove_keeps_other_ids() {
        let mut config = Configuration::new(SlabShape::rectangle(72.0, 26.0));
        let first = config.add_sink(SinkTemplate::BathOval).unwrap();
        let second = config.add_sink(SinkTemplate::BathOval).unwrap();
        config.remove_sink(first).unwrap();

        assert_eq!(config.sinks().len(), 1);
        assert_eq!(config.sinks()[0].id, second);

        let third = config.add_sink(SinkTemplate::BarOval).unwrap();
        assert_ne!(third, first);
        assert_ne!(third, second);
    }

    #[test]
    fn test_unknown_sink() {
        let mut config = Configuration::new(SlabShape::rectangle(72.0, 26.0));
        assert_eq!(
            config.remove_sink(SinkId(9)),
            Err(PlacementError::UnknownSink(SinkId(9)))
        );
    }

    #[test]
    fn test_backsplash_edges_are_unpolished_edges() {
        let mut config = Configuration::new(SlabShape::rectangle(48.0, 24.0));
        config.set_polished_edges([Edge::Top, Edge::Left].into_iter().collect());
        assert!(config.backsplash_edges().is_empty());
        config.set_backsplash(true);
        assert_eq!(config.backsplash_edges(), vec![Edge::Right, Edge::Bottom]);
    }

    #[test]
    fn test_edge_codes_are_canonical() {
        let edges: EdgeSet = [Edge::Left, Edge::Top, Edge::Bottom].into_iter().collect();
        assert_eq!(edges.codes(), "TBL");
    }

    #[test]
    fn test_from_parts_snaps_off_grid_centers() {
        let mut parts = Configuration::new(SlabShape::rectangle(40.337, 24.0)).to_parts();
        parts.sinks.push(SinkPlacement {
            id: SinkId(1),
            template: SinkTemplate::BathOval,
            center: Point::new(27.837, 11.004),
            faucet: FaucetHoles::Single,
        });
        parts.next_sink_id = 2;

        let config = Configuration::from_parts(parts).unwrap();
        assert_eq!(config.sinks()[0].center, Point::new(27.83, 11.0));
        assert!(placement::on_grid(config.sinks()[0].center));
        assert_eq!(config.clone().validated().unwrap(), config);
    }

    #[test]
    fn test_from_parts_rejects_out_of_region_center() {
        let mut parts = Configuration::new(SlabShape::rectangle(40.0, 24.0)).to_parts();
        parts.sinks.push(SinkPlacement {
            id: SinkId(1),
            template: SinkTemplate::BathOval,
            center: Point::new(28.0, 11.0),
            faucet: FaucetHoles::Single,
        });
        parts.next_sink_id = 2;
        assert!(matches!(
            Configuration::from_parts(parts),
            Err(ConfigurationError::InvalidLayout)
        ));
    }

    #[test]
    fn test_selector_lengths_are_bounded() {
        let mut config = Configuration::default();
        config.set_stone_color("g".repeat(MAX_STONE_COLOR_LEN + 5));
        config.set_destination_zip(format!(" {} ", "9".repeat(MAX_ZIP_LEN + 5)));
        assert_eq!(config.stone_color().len(), MAX_STONE_COLOR_LEN);
        assert_eq!(config.destination_zip().len(), MAX_ZIP_LEN);

        let mut parts = config.to_parts();
        parts.stone_color.push('g');
        assert!(matches!(
            Configuration::from_parts(parts),
            Err(ConfigurationError::StoneColorTooLong { len, max }) if len == max + 1
        ));

        let mut parts = config.to_parts();
        parts.destination_zip.push('9');
        assert!(matches!(
            Configuration::from_parts(parts),
            Err(ConfigurationError::ZipTooLong { .. })
        ));
    }

    #[test]
    fn test_from_parts_rejects_duplicate_ids() {
        let mut config = Configuration::new(SlabShape::rectangle(72.0, 26.0));
        config.add_sink(SinkTemplate::BathOval).unwrap();
        config.add_sink(SinkTemplate::BathOval).unwrap();
        let mut parts = config.to_parts();
        parts.sinks[1].id = parts.sinks[0].id;
        assert!(matches!(
            Configuration::from_parts(parts),
            Err(ConfigurationError::InvalidSinkId(_))
        ));
    }

    #[test]
    fn test_serde_round_trip() {
        let mut config = Configuration::new(SlabShape::rectangle(50.0, 25.0));
        config.add_sink(SinkTemplate::BathRect).unwrap();
        config.set_destination_zip(" 62701 ");
        let json = serde_json::to_string(&config).unwrap();
        let back: Configuration = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
        assert_eq!(back.destination_zip(), "62701");
    }
}
