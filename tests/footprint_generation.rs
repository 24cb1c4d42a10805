//! End-to-end tests: generate SlimStack footprints and write them to disk.

use std::fs;

use slimstack_footprint::config::load_config;
use slimstack_footprint::error::LayoutError;
use slimstack_footprint::kicad::{KicadFileHandler, Layer};
use slimstack_footprint::slimstack::{naming, Generator};
use tempfile::tempdir;

const TIMESTAMP: i64 = 0x5A00_0000;

fn count_prefix(text: &str, prefix: &str) -> usize {
    text.lines().filter(|l| l.trim_start().starts_with(prefix)).count()
}

fn render(pin_count: u32, part_number: &str) -> String {
    let fp = Generator::new().generate(pin_count, part_number).unwrap();
    KicadFileHandler::new(&fp)
        .with_timestamp(TIMESTAMP)
        .serialize()
        .unwrap()
}

#[test]
fn forty_pin_receptacle() {
    let text = render(40, "0200");

    assert!(text.starts_with(
        "(module Molex_SlimStack_Receptacle_2x20_Pitch0.5mm_52991-0200 (layer F.Cu) (tedit 5A000000)"
    ));
    assert!(text.contains("(attr smd)"));
    assert!(text.contains("(tags \"connector molex slimstack 52991-0200\")"));
    assert!(text.contains("02x20 contacts 0.5mm pitch 4mm height"));

    assert_eq!(count_prefix(&text, "(fp_text "), 3);
    assert_eq!(count_prefix(&text, "(fp_line "), 28);
    assert_eq!(count_prefix(&text, "(pad "), 40);
    assert_eq!(count_prefix(&text, "(model "), 1);

    assert!(text.contains(
        "(pad 1 smd rect (at -4.75 -2) (size 0.3 1.8) (layers F.Cu F.Paste F.Mask))"
    ));
    assert!(text.contains(
        "(pad 2 smd rect (at -4.75 2) (size 0.3 1.8) (layers F.Cu F.Paste F.Mask))"
    ));
    assert!(text.contains("(pad 40 smd rect (at 4.75 2)"));

    assert!(text.contains(
        "(model ${KISYS3DMOD}/Connectors_Molex.3dshapes/Molex_SlimStack_Receptacle_2x20_Pitch0.5mm_52991-0200.wrl"
    ));
    assert!(text.trim_end().ends_with(')'));
}

#[test]
fn courtyard_encloses_pads() {
    let fp = Generator::new().generate(40, "0200").unwrap();
    let courtyard: Vec<_> = fp
        .lines()
        .into_iter()
        .filter(|l| l.layer == Layer::FrontCourtyard)
        .collect();
    assert_eq!(courtyard.len(), 4);

    let max_x = courtyard
        .iter()
        .flat_map(|l| [l.start.x.abs(), l.end.x.abs()])
        .fold(0.0_f64, f64::max);
    let max_y = courtyard
        .iter()
        .flat_map(|l| [l.start.y.abs(), l.end.y.abs()])
        .fold(0.0_f64, f64::max);

    for pad in fp.pads() {
        assert!(pad.at.x.abs() + pad.size.0 / 2.0 < max_x);
        assert!(pad.at.y.abs() + pad.size.1 / 2.0 < max_y);
    }
    assert!((max_x - 7.75).abs() < 1e-9);
    assert!((max_y - 3.4).abs() < 1e-9);
}

#[test]
fn small_receptacle() {
    let text = render(8, "0100");

    assert!(text.contains("Molex_SlimStack_Receptacle_2x04_Pitch0.5mm_52991-0100"));
    assert_eq!(count_prefix(&text, "(pad "), 8);
    assert_eq!(count_prefix(&text, "(fp_line "), 28);
    assert!(text.contains("(pad 1 smd rect (at -0.75 -2)"));
    assert!(text.contains("(pad 8 smd rect (at 0.75 2)"));
}

#[test]
fn output_is_reproducible_with_fixed_timestamp() {
    assert_eq!(render(20, "0050"), render(20, "0050"));
}

#[test]
fn invalid_inputs_are_rejected() {
    let generator = Generator::new();

    assert_eq!(
        generator.generate(41, "0200").unwrap_err(),
        LayoutError::InvalidPinCount { pin_count: 41 }
    );
    assert_eq!(
        generator.generate(0, "0200").unwrap_err(),
        LayoutError::InvalidPinCount { pin_count: 0 }
    );
    assert!(matches!(
        generator.generate(40, "02/00"),
        Err(LayoutError::InvalidPartNumber { .. })
    ));
}

#[test]
fn write_file_uses_canonical_name() {
    let dir = tempdir().unwrap();
    let fp = Generator::new().generate(40, "0200").unwrap();
    let path = dir.path().join(naming::file_name(&fp.name));

    KicadFileHandler::new(&fp).write_file(&path).unwrap();

    assert!(dir
        .path()
        .join("Molex_SlimStack_Receptacle_2x20_Pitch0.5mm_52991-0200.kicad_mod")
        .exists());
    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(count_prefix(&contents, "(pad "), 40);
}

#[test]
fn write_file_into_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let fp = Generator::new().generate(8, "0100").unwrap();
    let path = dir.path().join("missing").join("out.kicad_mod");

    assert!(KicadFileHandler::new(&fp).write_file(&path).is_err());
}

#[test]
fn config_file_drives_generation() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.json");
    fs::write(
        &config_path,
        r#"{
            "output": { "model_path_prefix": "${KIPRJMOD}/3d/" },
            "style": { "silkscreen_line_width": 0.15, "courtyard_line_width": 0.06 }
        }"#,
    )
    .unwrap();

    let config = load_config(Some(&config_path)).unwrap();
    let fp = Generator::from_config(&config).generate(8, "0100").unwrap();
    let text = KicadFileHandler::new(&fp)
        .with_timestamp(TIMESTAMP)
        .serialize()
        .unwrap();

    assert!(text.contains("(layer F.SilkS) (width 0.15))"));
    assert!(text.contains("(layer F.CrtYd) (width 0.06))"));
    assert!(text.contains(
        "(model ${KIPRJMOD}/3d/Molex_SlimStack_Receptacle_2x04_Pitch0.5mm_52991-0100.wrl"
    ));
}
