//! Sales tax by destination ZIP prefix

use crate::rates::PricingRates;
use crate::zip::ZipCode;

/// Tax rate for a destination. The first matching prefix rule wins; invalid
/// ZIP codes and unmatched prefixes get the default rate.
pub fn tax_rate(rates: &PricingRates, destination_zip: &str) -> f64 {
    let Some(zip) = ZipCode::parse(destination_zip) else {
        return rates.default_tax_rate;
    };
    rates
        .tax_rules
        .iter()
        .find(|rule| zip.starts_with(&rule.prefix))
        .map(|rule| rule.rate)
        .unwrap_or(rates.default_tax_rate)
}
