//! # SlabKit Core
//!
//! Geometric domain model and sink placement engine for parametric stone
//! countertops.
//!
//! ## Components
//!
//! - **Geometry**: rectangle, circle, and regular-polygon slabs with clamped
//!   dimensions and square-foot areas
//! - **Sinks**: the sink template catalog and faucet drilling options
//! - **Placement**: edge and inter-sink clearance rules, collision checks,
//!   and second-sink position suggestion
//! - **Configuration**: the aggregate a design session edits through
//!   explicit command handlers
//!
//! ## Usage
//!
//! ```rust
//! use slabkit_core::{Configuration, SinkTemplate, SlabShape};
//!
//! let mut config = Configuration::new(SlabShape::rectangle(72.0, 26.0));
//! let id = config.add_sink(SinkTemplate::BathOval).unwrap();
//! assert_eq!(config.sink(id).map(|s| s.template), Some(SinkTemplate::BathOval));
//! ```

pub mod configuration;
pub mod error;
pub mod geometry;
pub mod placement;
pub mod sink;

pub use configuration::{
    Configuration, ConfigurationParts, DimensionChange, DragOutcome, Edge, EdgeSet,
    MAX_STONE_COLOR_LEN, MAX_ZIP_LEN,
};
pub use error::{ConfigurationError, PlacementError, PlacementResult};
pub use geometry::{Point, ShapeKind, SlabShape};
pub use placement::{PlacementBounds, MAX_SINKS, MIN_EDGE_CLEARANCE, MIN_GAP};
pub use sink::{CutoutKind, FaucetHoles, FaucetSpread, SinkId, SinkPlacement, SinkTemplate};
