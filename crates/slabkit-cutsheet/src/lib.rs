//! # SlabKit Cut Sheet
//!
//! Turns a countertop configuration into a layered DXF drawing for the
//! fabrication shop.
//!
//! | Layer | Contents |
//! |---|---|
//! | `OUTLINE` | slab outline |
//! | `POLISHED` | one line per polished edge |
//! | `BACKSPLASH` | backsplash strips, offset outside the slab |
//! | `CUTOUT` | sink cutouts and faucet holes |
//! | `TEXT` | shape, edge and sink annotations |
//!
//! ```
//! use slabkit_core::{Configuration, SlabShape};
//! use slabkit_cutsheet::{CutSheetOptions, render_dxf};
//!
//! let config = Configuration::new(SlabShape::circle(30.0));
//! let dxf = render_dxf(&config, &CutSheetOptions::default());
//! assert!(dxf.contains("CIRCLE"));
//! ```

pub mod builder;
pub mod document;
pub mod dxf_writer;
pub mod error;
pub mod options;

use slabkit_core::Configuration;

pub use builder::CutSheetBuilder;
pub use document::{CutSheetDocument, Entity, EntityKind, Layer};
pub use dxf_writer::{to_base64, DxfWriter};
pub use error::CutSheetError;
pub use options::CutSheetOptions;

/// Build and emit the cut sheet for `config` in one step.
pub fn render_dxf(config: &Configuration, options: &CutSheetOptions) -> String {
    let doc = CutSheetBuilder::new(options.clone()).build(config);
    DxfWriter::new().write(&doc)
}
