//! SlabKit command-line tool
//!
//! Quotes designs, produces checkout tokens and cut sheets, and decodes
//! tokens back into design files.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, warn};

use slabkit::{
    codec, init_logging, Config, Configuration, CutSheetBuilder, DxfWriter, PricingEngine,
    PricingResult, BUILD_DATE, VERSION,
};

#[derive(Parser)]
#[command(name = "slabkit")]
#[command(about = "Stone countertop quoting, tokens and cut sheets", long_about = None)]
#[command(version = VERSION)]
struct Cli {
    /// Settings file (TOML or JSON); defaults to the platform config directory
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the price breakdown for a design file
    Quote {
        /// Design file (JSON)
        design: PathBuf,
    },

    /// Print the checkout metadata fields for a design file
    Token {
        /// Design file (JSON)
        design: PathBuf,
    },

    /// Write the DXF cut sheet for a design file
    Cutsheet {
        /// Design file (JSON)
        design: PathBuf,
        /// Output DXF path
        output: PathBuf,
    },

    /// Decode a token file back into a design
    Decode {
        /// File holding a token, or `key=value` metadata lines
        token: PathBuf,
    },
}

fn main() -> Result<()> {
    init_logging()?;
    let cli = Cli::parse();
    debug!("slabkit {} built {}", VERSION, BUILD_DATE);

    let settings = load_settings(cli.config.as_deref())?;

    match cli.command {
        Commands::Quote { design } => {
            let config = load_design(&design)?;
            let quote = PricingEngine::new(settings.pricing).quote(&config);
            print_quote(&quote);
        }
        Commands::Token { design } => {
            let config = load_design(&design)?;
            for (key, value) in codec::encode_metadata(&config)? {
                println!("{}={}", key, value);
            }
        }
        Commands::Cutsheet { design, output } => {
            let config = load_design(&design)?;
            let doc = CutSheetBuilder::new(settings.fabrication).build(&config);
            let dxf = DxfWriter::new().write(&doc);
            std::fs::write(&output, dxf)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("Wrote {} entities to {}", doc.len(), output.display());
        }
        Commands::Decode { token } => {
            let text = std::fs::read_to_string(&token)
                .with_context(|| format!("Failed to read {}", token.display()))?;
            let Some(config) = decode_text(&text) else {
                bail!("{} does not contain a valid design token", token.display());
            };
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

fn load_settings(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => {
            let path = Config::default_path().inspect_err(|e| warn!("{}", e)).ok();
            Ok(Config::load_optional(path.as_deref())?)
        }
    }
}

fn load_design(path: &Path) -> Result<Configuration> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read design {}", path.display()))?;
    let config: Configuration = serde_json::from_str(&content)
        .with_context(|| format!("Invalid design file {}", path.display()))?;
    config
        .validated()
        .with_context(|| format!("Design {} failed validation", path.display()))
}

/// A bare token, or metadata fields written one `key=value` per line.
fn decode_text(text: &str) -> Option<Configuration> {
    let text = text.trim();
    if text.starts_with('{') {
        return codec::decode(text);
    }
    let fields = text
        .lines()
        .filter_map(|line| line.split_once('='))
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .collect();
    codec::decode_metadata(&fields)
}

fn print_quote(quote: &PricingResult) {
    println!("Slab area:       {:>10.3} sq ft", quote.slab_area_sqft);
    println!("Backsplash area: {:>10.3} sq ft", quote.backsplash_area_sqft);
    println!("Material:        {:>10.2}", quote.material_cost);
    println!("Sink add-ons:    {:>10.2}", quote.sink_addons);
    println!("Backsplash:      {:>10.2}", quote.backsplash_cost);
    println!(
        "Shipping:        {:>10.2}  ({:.1} lb, {} cwt, {:.0} mi, x{:.2})",
        quote.shipping.freight,
        quote.shipping.weight_lbs,
        quote.shipping.cwt,
        quote.shipping.miles,
        quote.shipping.distance_multiplier
    );
    println!("Services:        {:>10.2}", quote.services);
    println!(
        "Tax ({:.2}%):    {:>10.2}",
        quote.tax_rate * 100.0,
        quote.tax
    );
    println!("Total:           {:>10.2}", quote.total);
}
