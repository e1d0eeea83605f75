//! Sink templates and placed sinks

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::geometry::Point;

/// Cutout outline drawn for a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CutoutKind {
    Oval,
    Rect,
}

/// Catalog of undermount sink templates.
///
/// Each template has a fixed footprint (width along the slab length, height
/// along the slab width) and a cutout kind. The string key is what the codec
/// and the price list use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SinkTemplate {
    BathOval,
    BathRect,
    BarOval,
    KitchenRect,
    KitchenDouble,
}

impl SinkTemplate {
    pub const ALL: [SinkTemplate; 5] = [
        SinkTemplate::BathOval,
        SinkTemplate::BathRect,
        SinkTemplate::BarOval,
        SinkTemplate::KitchenRect,
        SinkTemplate::KitchenDouble,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::BathOval => "bath-oval",
            Self::BathRect => "bath-rect",
            Self::BarOval => "bar-oval",
            Self::KitchenRect => "kitchen-rect",
            Self::KitchenDouble => "kitchen-double",
        }
    }

    /// Nominal footprint `(width, height)` in inches.
    pub fn footprint(&self) -> (f64, f64) {
        match self {
            Self::BathOval => (17.0, 14.0),
            Self::BathRect => (18.0, 13.0),
            Self::BarOval => (15.0, 12.0),
            Self::KitchenRect => (22.0, 16.0),
            Self::KitchenDouble => (30.0, 18.0),
        }
    }

    pub fn width(&self) -> f64 {
        self.footprint().0
    }

    pub fn height(&self) -> f64 {
        self.footprint().1
    }

    pub fn cutout_kind(&self) -> CutoutKind {
        match self {
            Self::BathOval | Self::BarOval => CutoutKind::Oval,
            Self::BathRect | Self::KitchenRect | Self::KitchenDouble => CutoutKind::Rect,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::BathOval => "Oval vanity sink",
            Self::BathRect => "Rectangular vanity sink",
            Self::BarOval => "Oval bar sink",
            Self::KitchenRect => "Single-bowl kitchen sink",
            Self::KitchenDouble => "Double-bowl kitchen sink",
        }
    }
}

impl fmt::Display for SinkTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SinkTemplate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.key() == s)
            .ok_or_else(|| format!("Unknown sink template: {}", s))
    }
}

/// Center-to-center distance of the outer holes in a 3-hole faucet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaucetSpread {
    Four,
    Eight,
}

impl FaucetSpread {
    pub fn inches(&self) -> f64 {
        match self {
            Self::Four => 4.0,
            Self::Eight => 8.0,
        }
    }

    pub fn from_inches(inches: u32) -> Option<Self> {
        match inches {
            4 => Some(Self::Four),
            8 => Some(Self::Eight),
            _ => None,
        }
    }
}

/// Faucet hole drilling above a sink cutout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "holes", rename_all = "lowercase")]
pub enum FaucetHoles {
    Single,
    Triple { spread: FaucetSpread },
}

impl Default for FaucetHoles {
    fn default() -> Self {
        Self::Single
    }
}

impl FaucetHoles {
    pub fn count(&self) -> u32 {
        match self {
            Self::Single => 1,
            Self::Triple { .. } => 3,
        }
    }

    /// Horizontal offsets of each hole from the sink centerline, left to right.
    pub fn offsets(&self) -> Vec<f64> {
        match self {
            Self::Single => vec![0.0],
            Self::Triple { spread } => {
                let half = spread.inches() / 2.0;
                vec![-half, 0.0, half]
            }
        }
    }
}

/// Stable identity of a placed sink. Never reused within a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SinkId(pub u32);

impl fmt::Display for SinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A sink template placed on the slab.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SinkPlacement {
    pub id: SinkId,
    pub template: SinkTemplate,
    /// Cutout center, inches from the slab's bottom-left corner.
    pub center: Point,
    #[serde(default)]
    pub faucet: FaucetHoles,
}

impl SinkPlacement {
    pub fn new(id: SinkId, template: SinkTemplate, center: Point) -> Self {
        Self {
            id,
            template,
            center,
            faucet: FaucetHoles::default(),
        }
    }

    pub fn width(&self) -> f64 {
        self.template.width()
    }

    pub fn height(&self) -> f64 {
        self.template.height()
    }
}
