//! # SlabKit
//!
//! Parametric stone countertop configurator: slab geometry, sink placement,
//! pricing, checkout tokens and DXF cut sheets.
//!
//! ## Architecture
//!
//! SlabKit is organized as a workspace with multiple crates:
//!
//! 1. **slabkit-core** - Slab geometry, sink templates, placement engine, configuration
//! 2. **slabkit-pricing** - Material, add-on, backsplash, freight and tax pricing
//! 3. **slabkit-codec** - Compact design token and metadata chunking
//! 4. **slabkit-cutsheet** - Layered DXF cut sheets
//! 5. **slabkit-settings** - Rate and fabrication tables on disk
//! 6. **slabkit** - Checkout and preview-mail orchestration, CLI binary

pub mod checkout;
pub mod mail;

pub use slabkit_codec as codec;
pub use slabkit_cutsheet as cutsheet;
pub use slabkit_pricing as pricing;
pub use slabkit_settings as settings;

pub use slabkit_core::{
    Configuration, ConfigurationError, DimensionChange, DragOutcome, Edge, EdgeSet, FaucetHoles,
    FaucetSpread, PlacementError, Point, ShapeKind, SinkId, SinkPlacement, SinkTemplate,
    SlabShape,
};
pub use slabkit_cutsheet::{CutSheetBuilder, CutSheetOptions, DxfWriter};
pub use slabkit_pricing::{PricingEngine, PricingRates, PricingResult};
pub use slabkit_settings::Config;

pub use checkout::{
    CheckoutError, CheckoutRequest, CheckoutService, CheckoutSession, FabricationTicket,
    PaymentGateway,
};
pub use mail::{preview_email, send_preview, MailTransport, PreviewEmail};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Log lines go to stderr so command output on stdout stays clean. The
/// `RUST_LOG` environment variable overrides the default `info` level.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
