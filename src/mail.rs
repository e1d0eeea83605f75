//! Design preview emails
//!
//! A preview carries a plain-text price summary and the cut sheet as a
//! base64 attachment. Delivery goes through a [`MailTransport`].

use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};
use tracing::info;

use slabkit_core::Configuration;
use slabkit_cutsheet::{render_dxf, to_base64, CutSheetOptions};
use slabkit_pricing::PricingResult;

pub const ATTACHMENT_NAME: &str = "cut-sheet.dxf";
pub const ATTACHMENT_TYPE: &str = "application/dxf";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub filename: String,
    pub content_type: String,
    /// Base64-encoded file body.
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewEmail {
    pub recipient: String,
    pub subject: String,
    pub summary: String,
    pub attachment: Attachment,
}

/// Outbound mail delivery.
pub trait MailTransport: Send + Sync {
    fn send(&self, email: &PreviewEmail) -> anyhow::Result<()>;
}

/// Assemble a preview email for `config` priced at `quote`, attaching `dxf`.
pub fn preview_email(
    recipient: &str,
    config: &Configuration,
    quote: &PricingResult,
    dxf: &str,
) -> PreviewEmail {
    PreviewEmail {
        recipient: recipient.trim().to_string(),
        subject: format!(
            "Your countertop design: {} ({})",
            config.shape().summary(),
            dollars(quote.total)
        ),
        summary: summary(config, quote),
        attachment: Attachment {
            filename: ATTACHMENT_NAME.to_string(),
            content_type: ATTACHMENT_TYPE.to_string(),
            content: to_base64(dxf),
        },
    }
}

/// Render the cut sheet, build the preview and hand it to `transport`.
pub fn send_preview<T: MailTransport>(
    transport: &T,
    recipient: &str,
    config: &Configuration,
    quote: &PricingResult,
    options: &CutSheetOptions,
) -> anyhow::Result<()> {
    ensure!(
        recipient.contains('@'),
        "Invalid recipient address: {}",
        recipient
    );
    let dxf = render_dxf(config, options);
    let email = preview_email(recipient, config, quote, &dxf);
    transport
        .send(&email)
        .with_context(|| format!("Failed to send design preview to {}", email.recipient))?;
    info!("Sent design preview to {}", email.recipient);
    Ok(())
}

fn dollars(amount: f64) -> String {
    format!("${:.2}", amount)
}

fn summary(config: &Configuration, quote: &PricingResult) -> String {
    let mut lines = vec![
        format!("Slab: {}", config.shape().summary()),
        format!("Area: {:.2} sq ft", quote.slab_area_sqft),
    ];
    if !config.stone_color().is_empty() {
        lines.push(format!("Stone: {}", config.stone_color()));
    }
    for sink in config.sinks() {
        lines.push(format!(
            "Sink {}: {} ({} faucet hole{})",
            sink.id,
            sink.template.display_name(),
            sink.faucet.count(),
            if sink.faucet.count() == 1 { "" } else { "s" }
        ));
    }
    if quote.backsplash_area_sqft > 0.0 {
        lines.push(format!("Backsplash: {:.2} sq ft", quote.backsplash_area_sqft));
    }

    lines.push(String::new());
    lines.push(format!("Material: {}", dollars(quote.material_cost)));
    if quote.sink_addons > 0.0 {
        lines.push(format!("Sinks: {}", dollars(quote.sink_addons)));
    }
    if quote.backsplash_cost > 0.0 {
        lines.push(format!("Backsplash: {}", dollars(quote.backsplash_cost)));
    }
    lines.push(format!(
        "Shipping: {} ({} cwt, ~{:.0} mi)",
        dollars(quote.shipping.freight),
        quote.shipping.cwt,
        quote.shipping.miles
    ));
    lines.push(format!(
        "Tax ({:.2}%): {}",
        quote.tax_rate * 100.0,
        dollars(quote.tax)
    ));
    lines.push(format!("Total: {}", dollars(quote.total)));
    lines.join("\n")
}
