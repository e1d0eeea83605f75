//! Rate tables used by the pricing engine
//!
//! The defaults are the shop's published rates. A settings file can override
//! any of them; the same table must be used on the client and the server for
//! quotes to agree.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use slabkit_core::SinkTemplate;

use crate::error::RatesError;
use crate::zip::ZipCode;

/// A mileage band and the freight multiplier applied within it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceBand {
    /// Inclusive upper bound of the band in miles.
    pub max_miles: f64,
    pub multiplier: f64,
}

/// Sales-tax rate for destinations whose ZIP starts with `prefix`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxRule {
    pub prefix: String,
    pub rate: f64,
}

/// Every constant the pricing engine reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingRates {
    /// Stone price in dollars per square foot (slab and backsplash).
    pub material_per_sqft: f64,
    /// Backsplash height in inches.
    pub backsplash_height: f64,
    /// Add-on price per sink, keyed by template key.
    pub sink_prices: BTreeMap<String, f64>,
    /// Slab weight in pounds per square foot.
    pub weight_per_sqft: f64,
    /// Freight charge in dollars per hundredweight.
    pub freight_per_cwt: f64,
    /// Multiplier applied after the distance multiplier.
    pub packing_surcharge: f64,
    /// Shop ZIP code the mileage estimate is measured from.
    pub origin_zip: String,
    /// Miles per unit of difference between 3-digit ZIP prefixes.
    pub miles_per_prefix_step: f64,
    /// Mileage added to every estimate.
    pub base_miles: f64,
    /// Bands checked in order; the first whose ceiling covers the mileage wins.
    pub distance_bands: Vec<DistanceBand>,
    /// Multiplier beyond the last band.
    pub beyond_multiplier: f64,
    pub tax_rules: Vec<TaxRule>,
    /// Rate for any ZIP not matched by a rule, including invalid ones.
    pub default_tax_rate: f64,
}

impl Default for PricingRates {
    fn default() -> Self {
        let sink_prices = [
            (SinkTemplate::BathOval, 150.0),
            (SinkTemplate::BathRect, 150.0),
            (SinkTemplate::BarOval, 125.0),
            (SinkTemplate::KitchenRect, 250.0),
            (SinkTemplate::KitchenDouble, 325.0),
        ]
        .into_iter()
        .map(|(t, price)| (t.key().to_string(), price))
        .collect();

        Self {
            material_per_sqft: 55.0,
            backsplash_height: 4.0,
            sink_prices,
            weight_per_sqft: 10.9,
            freight_per_cwt: 35.9,
            packing_surcharge: 1.20,
            origin_zip: "63010".to_string(),
            miles_per_prefix_step: 20.0,
            base_miles: 100.0,
            distance_bands: vec![
                DistanceBand {
                    max_miles: 250.0,
                    multiplier: 1.00,
                },
                DistanceBand {
                    max_miles: 600.0,
                    multiplier: 1.25,
                },
                DistanceBand {
                    max_miles: 1000.0,
                    multiplier: 1.50,
                },
                DistanceBand {
                    max_miles: 1500.0,
                    multiplier: 1.70,
                },
            ],
            beyond_multiplier: 1.85,
            tax_rules: vec![
                TaxRule {
                    prefix: "63".to_string(),
                    rate: 0.0825,
                },
                TaxRule {
                    prefix: "62".to_string(),
                    rate: 0.0875,
                },
            ],
            default_tax_rate: 0.07,
        }
    }
}

impl PricingRates {
    /// Add-on price for a sink template. Templates missing from the table
    /// price at zero; [`validate`](Self::validate) catches that case.
    pub fn sink_price(&self, template: SinkTemplate) -> f64 {
        self.sink_prices.get(template.key()).copied().unwrap_or(0.0)
    }

    /// Check that the table can produce a meaningful quote.
    pub fn validate(&self) -> Result<(), RatesError> {
        let positive = [
            ("material_per_sqft", self.material_per_sqft),
            ("backsplash_height", self.backsplash_height),
            ("weight_per_sqft", self.weight_per_sqft),
            ("freight_per_cwt", self.freight_per_cwt),
            ("packing_surcharge", self.packing_surcharge),
            ("beyond_multiplier", self.beyond_multiplier),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(RatesError::NotPositive {
                    name: name.to_string(),
                    value,
                });
            }
        }

        if ZipCode::parse(&self.origin_zip).is_none() {
            return Err(RatesError::InvalidZip(self.origin_zip.clone()));
        }

        if self
            .distance_bands
            .windows(2)
            .any(|pair| pair[0].max_miles >= pair[1].max_miles)
        {
            return Err(RatesError::UnsortedBands);
        }

        for template in SinkTemplate::ALL {
            if !self.sink_prices.contains_key(template.key()) {
                return Err(RatesError::MissingSinkPrice(template.key().to_string()));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rates_are_valid() {
        let rates = PricingRates::default();
        assert!(rates.validate().is_ok());
        assert_eq!(rates.sink_price(SinkTemplate::KitchenRect), 250.0);
    }

    #[test]
    fn test_validate_rejects_unsorted_bands() {
        let mut rates = PricingRates::default();
        rates.distance_bands.swap(0, 1);
        assert_eq!(rates.validate(), Err(RatesError::UnsortedBands));
    }

    #[test]
    fn test_validate_rejects_missing_sink_price() {
        let mut rates = PricingRates::default();
        rates.sink_prices.remove("bar-oval");
        assert_eq!(
            rates.validate(),
            Err(RatesError::MissingSinkPrice("bar-oval".to_string()))
        );
    }
}
