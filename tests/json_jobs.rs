//! # JSON Print Job Tests
//!
//! Jobs are parsed from JSON and run against an encoder; the output must
//! match what the same calls produce through the library API.

use std::path::Path;

use image::{DynamicImage, Rgb, RgbImage};
use pretty_assertions::assert_eq;

use starline::encoder::{CellContent, CutType, PulseOptions, TableColumn};
use starline::json_api::{Job, JobError};
use starline::protocol::text::Alignment;
use starline::{Encoder, EncoderError, EncoderOptions};

fn run(json: &str) -> Result<Vec<u8>, JobError> {
    Job::from_json(json)?.encode(Path::new("tests/fixtures"))
}

#[test]
fn test_job_matches_library_calls() {
    let job = run(r#"{
        "options": {"width": 12},
        "commands": [
            {"type": "initialize"},
            {"type": "codepage", "value": "cp858"},
            {"type": "underline", "value": true},
            {"type": "line", "value": "Total 5 €"},
            {"type": "underline", "value": false},
            {"type": "table",
             "columns": [{"width": 6}, {"width": 6, "align": "right"}],
             "rows": [["Tea", "2.00"]]},
            {"type": "pulse", "device": 1, "onMs": 100},
            {"type": "cut"}
        ]
    }"#)
    .unwrap();

    let mut encoder = Encoder::new(EncoderOptions::default().with_width(12));
    encoder
        .initialize()
        .codepage("cp858")
        .unwrap()
        .underline(true)
        .line("Total 5 €")
        .underline(false)
        .table(
            &[TableColumn::new(6), TableColumn::new(6).align(Alignment::Right)],
            vec![vec!["Tea".into(), "2.00".into()]],
        )
        .unwrap()
        .pulse(PulseOptions {
            device: 1,
            on_ms: 100,
            ..Default::default()
        })
        .unwrap()
        .cut(CutType::Full)
        .unwrap();

    assert_eq!(job, encoder.encode());
}

#[test]
fn test_nested_commands_match_composed_cells() {
    let job = run(r#"{
        "commands": [{
            "type": "table",
            "columns": [{"width": 5}],
            "rows": [[[{"type": "invert"}, {"type": "text", "value": "hey"}, {"type": "invert"}]]]
        }]
    }"#)
    .unwrap();

    let mut encoder = Encoder::default();
    encoder
        .table(
            &[TableColumn::new(5)],
            vec![vec![CellContent::composed(|cell| {
                cell.invert(true).text("hey").invert(false);
                Ok(())
            })]],
        )
        .unwrap();

    assert_eq!(job, encoder.encode());
}

#[test]
fn test_receipt_fixture() {
    let json = std::fs::read_to_string("tests/fixtures/receipt.json").unwrap();
    let bytes = Job::from_json(&json)
        .unwrap()
        .encode(Path::new("tests/fixtures"))
        .unwrap();

    assert_eq!(&bytes[..3], &[0x1B, 0x40, 0x18]);
    assert_eq!(&bytes[bytes.len() - 3..], &[0x1B, 0x64, 0x01]);
    // € switches to cp858 (id 4) and back to the cp437 border afterwards
    assert!(bytes.windows(5).any(|w| w == [0x1B, 0x1D, 0x74, 0x04, 0xD5]));
    assert!(bytes.windows(4).any(|w| w == [0x1B, 0x62, 0x06, 0x01]));
}

#[test]
fn test_image_command_uses_loader() {
    let job = Job::from_json(
        r#"{"commands": [
            {"type": "image", "path": "logo.png", "width": 8, "height": 24, "algorithm": "atkinson"}
        ]}"#,
    )
    .unwrap();

    let mut loaded = Vec::new();
    let bytes = job
        .encode_with(|path| {
            loaded.push(path.to_path_buf());
            Ok(DynamicImage::ImageRgb8(RgbImage::from_pixel(
                8,
                24,
                Rgb([0, 0, 0]),
            )))
        })
        .unwrap();

    assert_eq!(loaded, vec![Path::new("logo.png").to_path_buf()]);
    assert_eq!(&bytes[..6], &[0x1B, 0x30, 0x1B, 0x58, 0x08, 0x00]);
    assert!(bytes[6..30].iter().all(|&b| b == 0xFF));
}

#[test]
fn test_missing_image_file() {
    let result = run(
        r#"{"commands": [{"type": "image", "path": "missing.png", "width": 8, "height": 24}]}"#,
    );
    match result {
        Err(JobError::Image { path, .. }) => assert_eq!(path, Path::new("missing.png")),
        other => panic!("expected image error, got {:?}", other),
    }
}

#[test]
fn test_invalid_values_report_encoder_errors() {
    let cases = [
        (
            r#"{"type": "codepage", "value": "cp1"}"#,
            EncoderError::UnknownCodepage("cp1".into()),
        ),
        (
            r#"{"type": "qrcode", "value": "x", "size": 9}"#,
            EncoderError::InvalidQrSize("9".into()),
        ),
        (
            r#"{"type": "qrcode", "value": "x", "model": 3}"#,
            EncoderError::InvalidQrModel("3".into()),
        ),
        (
            r#"{"type": "image", "path": "a.png", "width": 8, "height": 24, "algorithm": "noise"}"#,
            EncoderError::UnsupportedDithering("noise".into()),
        ),
    ];

    for (command, expected) in cases {
        let json = format!(r#"{{"commands": [{command}]}}"#);
        let job = Job::from_json(&json).unwrap();
        let result = job.encode_with(|_| Ok(DynamicImage::new_rgb8(8, 24)));
        match result {
            Err(JobError::Encoder(error)) => assert_eq!(error, expected),
            other => panic!("{command}: expected {expected:?}, got {other:?}"),
        }
    }
}

#[test]
fn test_unknown_command_type() {
    assert!(matches!(
        Job::from_json(r#"{"commands": [{"type": "staple"}]}"#),
        Err(JobError::Json(_))
    ));
}
