//! Checkout orchestration
//!
//! Opening a checkout prices the design with the shop's own rates and sends
//! the encoded design along as session metadata. Completing one rebuilds the
//! design from that metadata and prices it again; the client never supplies
//! the amount that gets charged.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use slabkit_codec::CodecError;
use slabkit_core::{Configuration, ConfigurationError};
use slabkit_cutsheet::{render_dxf, CutSheetOptions};
use slabkit_pricing::{PricingEngine, PricingResult};
use slabkit_settings::Config;

/// Currency every session is opened in.
pub const CURRENCY: &str = "usd";

/// What the gateway is asked to charge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    /// Lets the gateway collapse retried submissions into one session.
    pub idempotency_key: Uuid,
    pub amount_cents: i64,
    pub currency: String,
    pub description: String,
    /// Encoded design, split to fit the gateway's per-field limit.
    pub metadata: BTreeMap<String, String>,
}

/// Session handle returned by the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub redirect_url: String,
}

/// Hosted payment provider.
pub trait PaymentGateway: Send + Sync {
    fn create_session(&self, request: &CheckoutRequest) -> anyhow::Result<CheckoutSession>;
}

#[derive(Error, Debug)]
pub enum CheckoutError {
    /// The design is not a state the editor could have produced.
    #[error("Design is invalid: {0}")]
    InvalidDesign(#[from] ConfigurationError),

    /// The design could not be packed into session metadata.
    #[error("Design could not be encoded: {0}")]
    Encoding(#[from] CodecError),

    /// The design prices to nothing.
    #[error("Design has nothing to charge for")]
    EmptyDesign,

    /// Session metadata held no decodable design.
    #[error("Session metadata does not contain a valid design")]
    MissingDesign,

    /// The gateway refused or failed to open a session.
    #[error("Payment gateway error: {0}")]
    Gateway(#[source] anyhow::Error),
}

/// Everything the shop needs to cut a paid order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FabricationTicket {
    pub configuration: Configuration,
    pub quote: PricingResult,
    /// Amount recomputed from the configuration, in cents.
    pub amount_cents: i64,
    pub cut_sheet_dxf: String,
    pub created_at: DateTime<Utc>,
}

/// Opens and completes checkouts against one gateway.
pub struct CheckoutService<G> {
    gateway: G,
    engine: PricingEngine,
    fabrication: CutSheetOptions,
}

impl<G: PaymentGateway> CheckoutService<G> {
    pub fn new(gateway: G, engine: PricingEngine, fabrication: CutSheetOptions) -> Self {
        Self {
            gateway,
            engine,
            fabrication,
        }
    }

    /// Service using the rate and fabrication tables from `config`.
    pub fn from_config(gateway: G, config: &Config) -> Self {
        Self::new(
            gateway,
            PricingEngine::new(config.pricing.clone()),
            config.fabrication.clone(),
        )
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn engine(&self) -> &PricingEngine {
        &self.engine
    }

    /// Price `config` and open a payment session for it.
    pub fn begin(&self, config: &Configuration) -> Result<CheckoutSession, CheckoutError> {
        let config = config.clone().validated()?;
        let quote = self.engine.quote(&config);
        let amount_cents = quote.total_cents();
        if amount_cents <= 0 {
            return Err(CheckoutError::EmptyDesign);
        }

        let request = CheckoutRequest {
            idempotency_key: Uuid::new_v4(),
            amount_cents,
            currency: CURRENCY.to_string(),
            description: format!("Stone countertop: {}", config.shape().summary()),
            metadata: slabkit_codec::encode_metadata(&config)?,
        };

        let session = self
            .gateway
            .create_session(&request)
            .map_err(CheckoutError::Gateway)?;
        info!(
            "Opened checkout session {} for {} cents",
            session.id, amount_cents
        );
        Ok(session)
    }

    /// Rebuild the paid design from session metadata and produce its
    /// fabrication ticket. `reported_cents` is what the gateway says was
    /// charged; it is only compared, never trusted.
    pub fn complete(
        &self,
        metadata: &BTreeMap<String, String>,
        reported_cents: i64,
    ) -> Result<FabricationTicket, CheckoutError> {
        let configuration =
            slabkit_codec::decode_metadata(metadata).ok_or(CheckoutError::MissingDesign)?;
        let quote = self.engine.quote(&configuration);
        let amount_cents = quote.total_cents();

        if amount_cents != reported_cents {
            warn!(
                "Reported amount {} cents differs from recomputed {} cents; using recomputed",
                reported_cents, amount_cents
            );
        }

        let cut_sheet_dxf = render_dxf(&configuration, &self.fabrication);
        info!(
            "Fabrication ticket ready: {} at {} cents",
            configuration.shape().summary(),
            amount_cents
        );

        Ok(FabricationTicket {
            configuration,
            quote,
            amount_cents,
            cut_sheet_dxf,
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_error_display() {
        assert_eq!(
            CheckoutError::MissingDesign.to_string(),
            "Session metadata does not contain a valid design"
        );
        let err = CheckoutError::from(ConfigurationError::InvalidLayout);
        assert_eq!(
            err.to_string(),
            "Design is invalid: Sink layout violates clearance rules"
        );
    }
}
