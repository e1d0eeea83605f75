//! Quote derivation
//!
//! [`PricingEngine::quote`] is a pure function of a configuration and a rate
//! table. The server re-runs it on the configuration reconstructed from the
//! checkout token and charges its own result, never a client-reported total.

use serde::{Deserialize, Serialize};
use tracing::debug;

use slabkit_core::geometry::SQ_IN_PER_SQ_FT;
use slabkit_core::Configuration;

use crate::rates::PricingRates;
use crate::shipping::{self, ShippingEstimate};
use crate::tax;

/// Everything the buyer sees on the price breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    /// Top-face slab area in square feet.
    pub slab_area_sqft: f64,
    /// Backsplash strip area in square feet.
    pub backsplash_area_sqft: f64,
    pub material_cost: f64,
    pub sink_addons: f64,
    pub backsplash_cost: f64,
    pub shipping: ShippingEstimate,
    /// Material, add-ons, backsplash and freight before tax.
    pub services: f64,
    pub tax_rate: f64,
    pub tax: f64,
    pub total: f64,
}

impl PricingResult {
    /// Grand total in cents, as charged by the payment gateway.
    pub fn total_cents(&self) -> i64 {
        to_cents(self.total)
    }
}

/// Convert dollars to whole cents, rounding half away from zero.
pub fn to_cents(dollars: f64) -> i64 {
    (dollars * 100.0).round() as i64
}

/// Stateless quote calculator bound to one rate table.
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    rates: PricingRates,
}

impl PricingEngine {
    pub fn new(rates: PricingRates) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &PricingRates {
        &self.rates
    }

    /// Backsplash strip area: every unpolished edge of a rectangle times the
    /// backsplash height, when a backsplash was requested.
    pub fn backsplash_area_sqft(&self, config: &Configuration) -> f64 {
        let Some((length, width)) = config.shape().rectangle_dims() else {
            return 0.0;
        };
        let sq_in: f64 = config
            .backsplash_edges()
            .iter()
            .map(|edge| edge.length_on(length, width) * self.rates.backsplash_height)
            .sum();
        sq_in / SQ_IN_PER_SQ_FT
    }

    /// Price implied by `config` right now.
    pub fn quote(&self, config: &Configuration) -> PricingResult {
        let rates = &self.rates;

        let slab_area_sqft = config.shape().area_sqft();
        let backsplash_area_sqft = self.backsplash_area_sqft(config);

        let material_cost = slab_area_sqft * rates.material_per_sqft;
        let backsplash_cost = backsplash_area_sqft * rates.material_per_sqft;
        let sink_addons: f64 = config
            .sinks()
            .iter()
            .map(|sink| rates.sink_price(sink.template))
            .sum();

        let shipping = shipping::estimate(
            rates,
            slab_area_sqft + backsplash_area_sqft,
            config.destination_zip(),
        );

        let services = material_cost + sink_addons + backsplash_cost + shipping.freight;
        let tax_rate = tax::tax_rate(rates, config.destination_zip());
        let tax = services * tax_rate;
        let total = services + tax;

        debug!(
            "Quoted {} at {:.2} (services {:.2}, tax {:.2})",
            config.shape().summary(),
            total,
            services,
            tax
        );

        PricingResult {
            slab_area_sqft,
            backsplash_area_sqft,
            material_cost,
            sink_addons,
            backsplash_cost,
            shipping,
            services,
            tax_rate,
            tax,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slabkit_core::{SinkTemplate, SlabShape};

    #[test]
    fn test_sink_addons_sum_per_template() {
        let mut config = Configuration::new(SlabShape::rectangle(72.0, 30.0));
        config.add_sink(SinkTemplate::BathOval).unwrap();
        config.add_sink(SinkTemplate::BarOval).unwrap();
        let quote = PricingEngine::default().quote(&config);
        assert_eq!(quote.sink_addons, 275.0);
    }

    #[test]
    fn test_no_backsplash_on_circle() {
        let config = Configuration::new(SlabShape::circle(40.0));
        let quote = PricingEngine::default().quote(&config);
        assert_eq!(quote.backsplash_area_sqft, 0.0);
        assert_eq!(quote.backsplash_cost, 0.0);
    }

    #[test]
    fn test_to_cents_rounds_to_nearest() {
        assert_eq!(to_cents(426.1857), 42619);
        assert_eq!(to_cents(10.004), 1000);
    }
}
