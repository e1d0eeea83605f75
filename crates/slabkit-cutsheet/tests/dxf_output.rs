//! Cut-sheet output checks against a real DXF reader

use std::io::Cursor;

use dxf::entities::EntityType;
use dxf::Drawing;
use slabkit_core::{Configuration, Edge, FaucetHoles, FaucetSpread, SinkTemplate, SlabShape};
use slabkit_cutsheet::{render_dxf, to_base64, CutSheetBuilder, CutSheetOptions, DxfWriter, Layer};

fn kitchen() -> Configuration {
    let mut config = Configuration::new(SlabShape::rectangle(72.0, 30.0));
    let a = config.add_sink(SinkTemplate::KitchenRect).unwrap();
    config
        .set_faucet(
            a,
            FaucetHoles::Triple {
                spread: FaucetSpread::Eight,
            },
        )
        .unwrap();
    config.add_sink(SinkTemplate::BarOval).unwrap();
    config.toggle_edge(Edge::Bottom);
    config.set_backsplash(true);
    config
}

fn load(text: &str) -> Drawing {
    let mut reader = Cursor::new(text.as_bytes().to_vec());
    Drawing::load(&mut reader).unwrap()
}

#[test]
fn test_identical_configurations_give_identical_bytes() {
    let options = CutSheetOptions::default();
    let first = render_dxf(&kitchen(), &options);
    let second = render_dxf(&kitchen(), &options);
    assert_eq!(first, second);
    assert!(!first.contains("-0.0000"));
}

#[test]
fn test_reader_sees_every_entity() {
    let config = kitchen();
    let doc = CutSheetBuilder::default().build(&config);
    let drawing = load(&DxfWriter::new().write(&doc));

    let entities: Vec<_> = drawing.entities().collect();
    assert_eq!(entities.len(), doc.len());

    for (parsed, built) in entities.iter().zip(&doc.entities) {
        assert_eq!(parsed.common.layer, built.layer.name());
    }

    // Outline, polished bottom, three backsplash strips, two cutouts, four
    // faucet holes, four annotation lines.
    assert_eq!(doc.on_layer(Layer::Outline).count(), 1);
    assert_eq!(doc.on_layer(Layer::Polished).count(), 1);
    assert_eq!(doc.on_layer(Layer::Backsplash).count(), 3);
    assert_eq!(doc.on_layer(Layer::Cutout).count(), 6);
    assert_eq!(doc.on_layer(Layer::Text).count(), 4);
}

#[test]
fn test_reader_sees_layers_and_geometry_kinds() {
    let drawing = load(&render_dxf(&kitchen(), &CutSheetOptions::default()));

    let layers: Vec<String> = drawing.layers().map(|l| l.name.clone()).collect();
    for layer in Layer::ALL {
        assert!(layers.iter().any(|name| name == layer.name()));
    }

    let ellipses = drawing
        .entities()
        .filter(|e| matches!(e.specific, EntityType::Ellipse(_)))
        .count();
    let circles = drawing
        .entities()
        .filter(|e| matches!(e.specific, EntityType::Circle(_)))
        .count();
    assert_eq!(ellipses, 1);
    assert_eq!(circles, 4);
}

#[test]
fn test_polygon_and_circle_sheets_parse() {
    for shape in [SlabShape::polygon(9, 15.0), SlabShape::circle(62.0)] {
        let config = Configuration::new(shape);
        let doc = CutSheetBuilder::default().build(&config);
        let drawing = load(&render_dxf(&config, &CutSheetOptions::default()));
        assert_eq!(drawing.entities().count(), doc.len());
    }
}

#[test]
fn test_base64_attachment_is_ascii() {
    let encoded = to_base64(&render_dxf(&kitchen(), &CutSheetOptions::default()));
    assert!(encoded
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/' || b == b'='));
}
