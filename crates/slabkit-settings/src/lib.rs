//! SlabKit Settings Crate
//!
//! Loads and saves the pricing and fabrication tables shared by quoting,
//! checkout and cut-sheet export.

pub mod config;
pub mod error;

pub use config::{Config, APP_DIR, CONFIG_FILE};
pub use error::{SettingsError, SettingsResult};
