//! Error types for the core crate.
//!
//! Geometry never errors (out-of-range input is clamped). The only
//! rejections come from sink placement, where the caller needs to tell the
//! buyer why a sink could not be added.

use thiserror::Error;

use crate::sink::{SinkId, SinkTemplate};

/// Reasons a sink operation was rejected. The configuration is left
/// unchanged whenever one of these is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlacementError {
    /// Sinks can only be placed on rectangular slabs.
    #[error("Sinks can only be placed on rectangular slabs")]
    RequiresRectangle,

    /// The template plus its edge clearance is larger than the slab.
    #[error("{template} does not fit a {length}\" x {width}\" slab with the required edge clearance")]
    DoesNotFit {
        template: SinkTemplate,
        length: f64,
        width: f64,
    },

    /// The template fits the slab, but not next to the existing sink.
    #[error("Not enough room for a second sink ({template})")]
    NoRoomForSecond { template: SinkTemplate },

    /// The slab already holds the maximum number of sinks.
    #[error("At most {max} sinks can be placed")]
    AtCapacity { max: usize },

    /// No sink with this id exists.
    #[error("Unknown sink {0}")]
    UnknownSink(SinkId),
}

/// Reasons a configuration assembled from raw parts (a decoded token or a
/// design file) is not a state the editor could have produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// Sinks were supplied for a circle or polygon slab.
    #[error("Sinks are only allowed on rectangular slabs")]
    SinksOnNonRectangle,

    /// More sinks than the slab may hold.
    #[error("Too many sinks: {count} (max {max})")]
    TooManySinks { count: usize, max: usize },

    /// Two sinks share an id, or an id was issued past the id counter.
    #[error("Invalid sink id {0}")]
    InvalidSinkId(SinkId),

    /// A sink is outside its valid region or violates clearance.
    #[error("Sink layout violates clearance rules")]
    InvalidLayout,

    /// The stone color key is longer than a configuration may carry.
    #[error("Stone color key is {len} characters (max {max})")]
    StoneColorTooLong { len: usize, max: usize },

    /// The destination ZIP is longer than a configuration may carry.
    #[error("Destination ZIP is {len} characters (max {max})")]
    ZipTooLong { len: usize, max: usize },
}

/// Result type alias for placement operations.
pub type PlacementResult<T> = Result<T, PlacementError>;
