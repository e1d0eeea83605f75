//! Compact design token
//!
//! The token is minified JSON with one- or two-letter keys:
//!
//! ```text
//! {"v":1,"s":"r","d":[48.0,24.0],"e":"TL","b":1,"k":[{"i":1,"t":"bath-oval","x":24.0,"y":11.0,"f":1}],"n":2,"c":"white","z":"63052"}
//! ```
//!
//! Field order is fixed by the struct definitions, sink positions are rounded
//! to hundredths of an inch and edges are written in canonical order, so equal
//! configurations always produce equal tokens.

use serde::{Deserialize, Serialize};

use slabkit_core::{
    Configuration, ConfigurationParts, Edge, EdgeSet, FaucetHoles, FaucetSpread, Point, SinkId,
    SinkPlacement, SinkTemplate, SlabShape,
};

use crate::chunking::MAX_TOKEN_LEN;
use crate::error::{CodecError, CodecResult};

/// Current token format version.
pub const TOKEN_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct WireDesign {
    v: u32,
    s: String,
    d: Vec<f64>,
    #[serde(default)]
    e: String,
    #[serde(default)]
    b: u8,
    #[serde(default)]
    k: Vec<WireSink>,
    n: u32,
    #[serde(default)]
    c: String,
    #[serde(default)]
    z: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireSink {
    i: u32,
    t: String,
    x: f64,
    y: f64,
    f: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    p: Option<u32>,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Encode a configuration as a compact canonical token.
///
/// Fails if the token would need more than [`MAX_CHUNKS`] metadata chunks.
///
/// [`MAX_CHUNKS`]: crate::chunking::MAX_CHUNKS
pub fn encode(config: &Configuration) -> CodecResult<String> {
    let (s, d) = match config.shape() {
        SlabShape::Rectangle { length, width } => ("r", vec![length, width]),
        SlabShape::Circle { diameter } => ("c", vec![diameter]),
        SlabShape::Polygon { sides, side_length } => ("p", vec![f64::from(sides), side_length]),
    };

    let k = config
        .sinks()
        .iter()
        .map(|sink| {
            let (f, p) = match sink.faucet {
                FaucetHoles::Single => (1, None),
                FaucetHoles::Triple { spread } => (3, Some(spread.inches() as u32)),
            };
            WireSink {
                i: sink.id.0,
                t: sink.template.key().to_string(),
                x: round2(sink.center.x),
                y: round2(sink.center.y),
                f,
                p,
            }
        })
        .collect();

    let wire = WireDesign {
        v: TOKEN_VERSION,
        s: s.to_string(),
        d,
        e: config.polished_edges().codes(),
        b: u8::from(config.backsplash()),
        k,
        n: config.next_sink_id(),
        c: config.stone_color().to_string(),
        z: config.destination_zip().to_string(),
    };

    let token = serde_json::to_string(&wire)?;
    let len = token.chars().count();
    if len > MAX_TOKEN_LEN {
        return Err(CodecError::TokenTooLong {
            len,
            max: MAX_TOKEN_LEN,
        });
    }
    Ok(token)
}

/// Decode a token, reporting why it was rejected.
pub fn try_decode(token: &str) -> CodecResult<Configuration> {
    let wire: WireDesign = serde_json::from_str(token)?;
    if wire.v == 0 || wire.v > TOKEN_VERSION {
        return Err(CodecError::UnsupportedVersion(wire.v));
    }

    let shape = decode_shape(&wire.s, &wire.d)?;
    let polished_edges = decode_edges(&wire.e)?;
    let backsplash = match wire.b {
        0 => false,
        1 => true,
        other => return Err(CodecError::invalid("b", format!("expected 0 or 1, got {}", other))),
    };
    let sinks = wire
        .k
        .iter()
        .map(decode_sink)
        .collect::<CodecResult<Vec<_>>>()?;

    let config = Configuration::from_parts(ConfigurationParts {
        shape,
        polished_edges,
        backsplash,
        sinks,
        next_sink_id: wire.n,
        stone_color: wire.c,
        destination_zip: wire.z,
    })?;
    Ok(config)
}

fn decode_shape(tag: &str, dims: &[f64]) -> CodecResult<SlabShape> {
    if dims.iter().any(|d| !d.is_finite()) {
        return Err(CodecError::invalid("d", "non-finite dimension"));
    }
    match (tag, dims) {
        ("r", [length, width]) => Ok(SlabShape::rectangle(*length, *width)),
        ("c", [diameter]) => Ok(SlabShape::circle(*diameter)),
        ("p", [sides, side_length]) => {
            if sides.fract() != 0.0 || *sides < 0.0 || *sides > f64::from(u32::MAX) {
                return Err(CodecError::invalid("d", format!("bad side count {}", sides)));
            }
            Ok(SlabShape::polygon(*sides as u32, *side_length))
        }
        ("r" | "c" | "p", _) => Err(CodecError::invalid(
            "d",
            format!("{} values for shape '{}'", dims.len(), tag),
        )),
        _ => Err(CodecError::invalid("s", format!("unknown shape tag '{}'", tag))),
    }
}

fn decode_edges(codes: &str) -> CodecResult<EdgeSet> {
    let mut edges = EdgeSet::new();
    for code in codes.chars() {
        let edge = Edge::from_code(code)
            .ok_or_else(|| CodecError::invalid("e", format!("unknown edge code '{}'", code)))?;
        if !edges.insert(edge) {
            return Err(CodecError::invalid("e", format!("duplicate edge '{}'", code)));
        }
    }
    Ok(edges)
}

fn decode_sink(wire: &WireSink) -> CodecResult<SinkPlacement> {
    let template: SinkTemplate = wire.t.parse().map_err(|e: String| CodecError::invalid("t", e))?;
    if !wire.x.is_finite() || !wire.y.is_finite() {
        return Err(CodecError::invalid("x", "non-finite position"));
    }
    let faucet = match (wire.f, wire.p) {
        (1, None) => FaucetHoles::Single,
        (3, Some(inches)) => FaucetHoles::Triple {
            spread: FaucetSpread::from_inches(inches)
                .ok_or_else(|| CodecError::invalid("p", format!("unsupported spread {}", inches)))?,
        },
        (f, p) => {
            return Err(CodecError::invalid(
                "f",
                format!("unsupported faucet option {} / {:?}", f, p),
            ))
        }
    };
    Ok(SinkPlacement {
        id: SinkId(wire.i),
        template,
        center: Point::new(wire.x, wire.y),
        faucet,
    })
}
