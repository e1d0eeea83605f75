//! Fabrication constants for cut-sheet generation

use serde::{Deserialize, Serialize};

use slabkit_core::SinkTemplate;

use crate::error::CutSheetError;

/// Shop-tunable dimensions used when drawing a cut sheet. All values are in
/// inches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CutSheetOptions {
    /// Diameter of each faucet hole.
    pub faucet_hole_diameter: f64,
    /// Distance from the cutout's top edge to the faucet hole centers.
    pub faucet_setback: f64,
    /// Amount subtracted from each nominal sink footprint dimension.
    pub cutout_shrink: f64,
    /// Depth of each backsplash strip.
    pub backsplash_depth: f64,
    /// Gap between the slab edge and its backsplash strip on the sheet.
    pub backsplash_offset: f64,
    /// Annotation text height.
    pub text_height: f64,
    /// Emit the annotation lines on the TEXT layer.
    pub annotate: bool,
}

impl Default for CutSheetOptions {
    fn default() -> Self {
        Self {
            faucet_hole_diameter: 1.375,
            faucet_setback: 2.0,
            cutout_shrink: 0.0,
            backsplash_depth: 4.0,
            backsplash_offset: 1.0,
            text_height: 0.5,
            annotate: true,
        }
    }
}

impl CutSheetOptions {
    /// Check that every dimension can be drawn.
    pub fn validate(&self) -> Result<(), CutSheetError> {
        let positive = [
            ("faucet_hole_diameter", self.faucet_hole_diameter),
            ("faucet_setback", self.faucet_setback),
            ("backsplash_depth", self.backsplash_depth),
            ("text_height", self.text_height),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(CutSheetError::InvalidOption {
                    name: name.to_string(),
                    value,
                });
            }
        }

        let non_negative = [
            ("cutout_shrink", self.cutout_shrink),
            ("backsplash_offset", self.backsplash_offset),
        ];
        for (name, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(CutSheetError::InvalidOption {
                    name: name.to_string(),
                    value,
                });
            }
        }

        let smallest = SinkTemplate::ALL
            .iter()
            .map(|t| t.width().min(t.height()))
            .fold(f64::INFINITY, f64::min);
        if self.cutout_shrink >= smallest {
            return Err(CutSheetError::InvalidOption {
                name: "cutout_shrink".to_string(),
                value: self.cutout_shrink,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(CutSheetOptions::default().validate().is_ok());
    }

    #[test]
    fn test_shrink_cannot_swallow_cutout() {
        let options = CutSheetOptions {
            cutout_shrink: 12.0,
            ..Default::default()
        };
        assert!(matches!(
            options.validate(),
            Err(CutSheetError::InvalidOption { ref name, .. }) if name == "cutout_shrink"
        ));
    }

    #[test]
    fn test_zero_hole_diameter_rejected() {
        let options = CutSheetOptions {
            faucet_hole_diameter: 0.0,
            ..Default::default()
        };
        assert!(options.validate().is_err());
    }
}
