//! # SlabKit Pricing
//!
//! Derives an authoritative price from a countertop configuration:
//!
//! - **Material**: slab area at the per-square-foot stone rate
//! - **Sink add-ons**: fixed price per sink template
//! - **Backsplash**: 4" strips along unpolished edges, at the stone rate
//! - **Shipping**: weight in hundredweight, ZIP-distance band, packing surcharge
//! - **Tax**: by destination ZIP prefix
//!
//! The engine is a pure function, so the browser quote and the server's
//! re-validation agree to the cent when they share a rate table.

pub mod engine;
pub mod error;
pub mod rates;
pub mod shipping;
pub mod tax;
pub mod zip;

pub use engine::{to_cents, PricingEngine, PricingResult};
pub use error::RatesError;
pub use rates::{DistanceBand, PricingRates, TaxRule};
pub use shipping::ShippingEstimate;
pub use zip::ZipCode;
