//! Freight estimate
//!
//! Mileage is approximated from the 3-digit ZIP prefixes of the shop and the
//! destination, mapped to a distance band, and applied to a per-hundredweight
//! base rate.

use serde::{Deserialize, Serialize};

use crate::rates::PricingRates;
use crate::zip::prefix3_or_zero;

/// Pounds per hundredweight.
pub const LBS_PER_CWT: f64 = 100.0;

/// Breakdown of the freight charge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShippingEstimate {
    pub weight_lbs: f64,
    /// Billable hundredweight, never less than one.
    pub cwt: u32,
    pub miles: f64,
    pub distance_multiplier: f64,
    pub freight: f64,
}

/// Approximate road miles between the shop and `destination_zip`. An invalid
/// destination is treated as prefix `000`.
pub fn estimate_miles(rates: &PricingRates, destination_zip: &str) -> f64 {
    let origin = prefix3_or_zero(&rates.origin_zip);
    let dest = prefix3_or_zero(destination_zip);
    f64::from(origin.abs_diff(dest)) * rates.miles_per_prefix_step + rates.base_miles
}

/// Multiplier of the first band whose ceiling covers `miles`.
pub fn distance_multiplier(rates: &PricingRates, miles: f64) -> f64 {
    rates
        .distance_bands
        .iter()
        .find(|band| miles <= band.max_miles)
        .map(|band| band.multiplier)
        .unwrap_or(rates.beyond_multiplier)
}

/// Billable hundredweight for a shipment.
pub fn billable_cwt(weight_lbs: f64) -> u32 {
    let cwt = (weight_lbs / LBS_PER_CWT).ceil();
    if cwt.is_finite() && cwt > 1.0 {
        cwt as u32
    } else {
        1
    }
}

/// Freight for `area_sqft` of stone shipped to `destination_zip`.
pub fn estimate(rates: &PricingRates, area_sqft: f64, destination_zip: &str) -> ShippingEstimate {
    let weight_lbs = area_sqft * rates.weight_per_sqft;
    let cwt = billable_cwt(weight_lbs);
    let miles = estimate_miles(rates, destination_zip);
    let distance_multiplier = distance_multiplier(rates, miles);
    let freight =
        f64::from(cwt) * rates.freight_per_cwt * distance_multiplier * rates.packing_surcharge;

    ShippingEstimate {
        weight_lbs,
        cwt,
        miles,
        distance_multiplier,
        freight,
    }
}
