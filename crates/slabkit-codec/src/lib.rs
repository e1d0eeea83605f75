//! # SlabKit Codec
//!
//! Serializes a [`Configuration`] into a compact token that survives a trip
//! through payment-session metadata, and reconstructs it on the server side.
//!
//! ```
//! use slabkit_codec::{decode, encode};
//! use slabkit_core::{Configuration, SinkTemplate, SlabShape};
//!
//! let mut config = Configuration::new(SlabShape::rectangle(48.0, 24.0));
//! config.add_sink(SinkTemplate::BathOval).unwrap();
//!
//! let token = encode(&config).unwrap();
//! assert_eq!(decode(&token), Some(config));
//! assert_eq!(decode("{not json"), None);
//! ```

pub mod chunking;
pub mod error;
pub mod token;

use std::collections::BTreeMap;

use tracing::warn;

use slabkit_core::Configuration;

pub use chunking::{CHUNK_SIZE, COUNT_FIELD, FIELD_LIMIT, MAX_CHUNKS, MAX_TOKEN_LEN, TOKEN_FIELD};
pub use error::{CodecError, CodecResult};
pub use token::{encode, try_decode, TOKEN_VERSION};

/// Decode a token. Any malformed or invalid token yields `None`.
pub fn decode(token: &str) -> Option<Configuration> {
    try_decode(token)
        .inspect_err(|e| warn!("Rejected design token: {}", e))
        .ok()
}

/// Place a token into metadata fields, chunking it when it exceeds
/// [`FIELD_LIMIT`].
pub fn to_metadata(token: &str) -> BTreeMap<String, String> {
    chunking::split(token)
}

/// Reassemble a token from metadata fields. Missing chunks, a bad chunk
/// count or an oversized field yield `None`.
pub fn from_metadata(fields: &BTreeMap<String, String>) -> Option<String> {
    chunking::join(fields)
        .inspect_err(|e| warn!("Rejected design metadata: {}", e))
        .ok()
}

/// Encode a configuration straight into metadata fields.
pub fn encode_metadata(config: &Configuration) -> CodecResult<BTreeMap<String, String>> {
    Ok(to_metadata(&encode(config)?))
}

/// Reassemble and decode a token from metadata fields.
pub fn try_decode_metadata(fields: &BTreeMap<String, String>) -> CodecResult<Configuration> {
    let token = chunking::join(fields)?;
    try_decode(&token)
}

/// Reassemble and decode a token from metadata fields, failing closed.
pub fn decode_metadata(fields: &BTreeMap<String, String>) -> Option<Configuration> {
    try_decode_metadata(fields)
        .inspect_err(|e| warn!("Rejected design metadata: {}", e))
        .ok()
}
