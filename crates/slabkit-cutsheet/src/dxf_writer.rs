//! ASCII DXF emission
//!
//! Writes a [`CutSheetDocument`] as an AutoCAD 2000 (`AC1015`) drawing in
//! inches. Output is a pure function of the document: coordinates are fixed
//! at four decimals and negative zero is written as zero, so the same design
//! always yields byte-identical text.

use base64::{engine::general_purpose, Engine as _};

use slabkit_core::Point;

use crate::document::{CutSheetDocument, EntityKind, Layer};

const ACAD_VERSION: &str = "AC1015";
/// `$INSUNITS` value for inches.
const UNITS_INCHES: i32 = 1;

/// Serializes cut-sheet documents to DXF text.
#[derive(Debug, Clone, Copy, Default)]
pub struct DxfWriter;

impl DxfWriter {
    pub fn new() -> Self {
        Self
    }

    /// Emit `doc` as a complete DXF file.
    pub fn write(&self, doc: &CutSheetDocument) -> String {
        let mut out = DxfOutput::default();
        out.header();
        out.tables();
        out.entities(doc);
        out.pair(0, "EOF");
        out.text
    }
}

#[derive(Default)]
struct DxfOutput {
    text: String,
}

impl DxfOutput {
    fn pair(&mut self, code: i32, value: &str) {
        self.text.push_str(&format!("{}\n{}\n", code, value));
    }

    fn int(&mut self, code: i32, value: i64) {
        self.pair(code, &value.to_string());
    }

    fn num(&mut self, code: i32, value: f64) {
        self.pair(code, &format_coord(value));
    }

    /// Point as `code`, `code + 10` and a zero Z at `code + 20`.
    fn point(&mut self, code: i32, p: Point) {
        self.num(code, p.x);
        self.num(code + 10, p.y);
        self.num(code + 20, 0.0);
    }

    fn begin_section(&mut self, name: &str) {
        self.pair(0, "SECTION");
        self.pair(2, name);
    }

    fn end_section(&mut self) {
        self.pair(0, "ENDSEC");
    }

    fn header(&mut self) {
        self.begin_section("HEADER");
        self.pair(9, "$ACADVER");
        self.pair(1, ACAD_VERSION);
        self.pair(9, "$INSUNITS");
        self.int(70, i64::from(UNITS_INCHES));
        self.end_section();
    }

    fn tables(&mut self) {
        self.begin_section("TABLES");
        self.pair(0, "TABLE");
        self.pair(2, "LAYER");
        self.int(70, Layer::ALL.len() as i64);
        for layer in Layer::ALL {
            self.pair(0, "LAYER");
            self.pair(2, layer.name());
            self.int(70, 0);
            self.int(62, i64::from(layer.color()));
            self.pair(6, "CONTINUOUS");
        }
        self.pair(0, "ENDTAB");
        self.end_section();
    }

    fn entities(&mut self, doc: &CutSheetDocument) {
        self.begin_section("ENTITIES");
        for entity in &doc.entities {
            let layer = entity.layer.name();
            match &entity.kind {
                EntityKind::Polyline { points, closed } => {
                    self.pair(0, "LWPOLYLINE");
                    self.pair(8, layer);
                    self.int(90, points.len() as i64);
                    self.int(70, i64::from(*closed));
                    for p in points {
                        self.num(10, p.x);
                        self.num(20, p.y);
                    }
                }
                EntityKind::Circle { center, radius } => {
                    self.pair(0, "CIRCLE");
                    self.pair(8, layer);
                    self.point(10, *center);
                    self.num(40, *radius);
                }
                EntityKind::Ellipse {
                    center,
                    major_axis,
                    ratio,
                } => {
                    self.pair(0, "ELLIPSE");
                    self.pair(8, layer);
                    self.point(10, *center);
                    self.point(11, *major_axis);
                    self.pair(40, &format!("{:.6}", ratio));
                    self.pair(41, "0.000000");
                    self.pair(42, &format!("{:.6}", std::f64::consts::TAU));
                }
                EntityKind::Line { start, end } => {
                    self.pair(0, "LINE");
                    self.pair(8, layer);
                    self.point(10, *start);
                    self.point(11, *end);
                }
                EntityKind::Text {
                    position,
                    height,
                    value,
                } => {
                    self.pair(0, "TEXT");
                    self.pair(8, layer);
                    self.point(10, *position);
                    self.num(40, *height);
                    self.pair(1, &single_line(value));
                }
            }
        }
        self.end_section();
    }
}

/// Four-decimal coordinate with negative zero folded to zero.
pub fn format_coord(value: f64) -> String {
    let s = format!("{:.4}", value);
    if s == "-0.0000" {
        "0.0000".to_string()
    } else {
        s
    }
}

/// DXF string values cannot span lines.
fn single_line(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}

/// Base64 form of a DXF document, for mail attachments.
pub fn to_base64(dxf: &str) -> String {
    general_purpose::STANDARD.encode(dxf.as_bytes())
}
