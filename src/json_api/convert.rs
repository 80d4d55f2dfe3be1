//! Running JSON print jobs against the encoder.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use thiserror::Error;
use tracing::debug;

use super::schema::*;
use crate::encoder::{CellContent, Encoder, ImageOptions, QrOptions};
use crate::error::{EncoderError, Result};
use crate::protocol::barcode::Symbology;
use crate::protocol::text::Alignment;
use crate::render::dither::DitheringAlgorithm;

/// Errors from reading or running a print job.
#[derive(Debug, Error)]
pub enum JobError {
    /// A command was rejected by the encoder.
    #[error(transparent)]
    Encoder(#[from] EncoderError),

    /// The job is not valid JSON or does not match the schema.
    #[error("Invalid job: {0}")]
    Json(#[from] serde_json::Error),

    /// An image referenced by the job could not be loaded.
    #[error("Failed to load image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

type Images = HashMap<String, DynamicImage>;

impl Job {
    /// Parse a job from JSON text.
    pub fn from_json(json: &str) -> std::result::Result<Self, JobError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Run the job, loading images relative to `base_dir`.
    pub fn encode(&self, base_dir: &Path) -> std::result::Result<Vec<u8>, JobError> {
        self.encode_with(|path| image::open(base_dir.join(path)))
    }

    /// Run the job with a custom image loader.
    ///
    /// All images are loaded before the first command runs, so a missing file
    /// fails the job without partial output.
    pub fn encode_with<F>(&self, mut load_image: F) -> std::result::Result<Vec<u8>, JobError>
    where
        F: FnMut(&Path) -> image::ImageResult<DynamicImage>,
    {
        let mut images = Images::new();
        let mut paths = Vec::new();
        collect_image_paths(&self.commands, &mut paths);
        for path in paths {
            if images.contains_key(path) {
                continue;
            }
            let image = load_image(Path::new(path)).map_err(|source| JobError::Image {
                path: PathBuf::from(path),
                source,
            })?;
            images.insert(path.to_string(), image);
        }

        let mut encoder = Encoder::new(self.options.clone());
        apply_all(&mut encoder, &self.commands, &images)?;
        let bytes = encoder.encode();
        debug!(commands = self.commands.len(), bytes = bytes.len(), "encoded job");
        Ok(bytes)
    }
}

fn collect_image_paths<'a>(commands: &'a [Command], paths: &mut Vec<&'a str>) {
    for command in commands {
        match command {
            Command::Image { path, .. } => paths.push(path),
            Command::Table { rows, .. } => {
                for cell in rows.iter().flatten() {
                    collect_cell_image_paths(cell, paths);
                }
            }
            Command::TextBox { content, .. } => collect_cell_image_paths(content, paths),
            _ => {}
        }
    }
}

fn collect_cell_image_paths<'a>(cell: &'a Cell, paths: &mut Vec<&'a str>) {
    if let Cell::Commands(nested) = cell {
        collect_image_paths(nested, paths);
    }
}

fn apply_all(encoder: &mut Encoder, commands: &[Command], images: &Images) -> Result<()> {
    for command in commands {
        apply(encoder, command, images)?;
    }
    Ok(())
}

fn cell_content<'a>(cell: &'a Cell, images: &'a Images) -> CellContent<'a> {
    match cell {
        Cell::Text(value) => CellContent::text(value.as_str()),
        Cell::Commands(commands) => {
            CellContent::composed(move |nested| apply_all(nested, commands, images))
        }
    }
}

/// Multiplier from an arbitrary JSON value; `None` unless it is a whole
/// number (`2` or `2.0`) that fits a byte.
fn multiplier(value: &serde_json::Value) -> Option<u8> {
    if let Some(n) = value.as_u64() {
        return u8::try_from(n).ok();
    }
    value
        .as_f64()
        .filter(|n| n.fract() == 0.0 && (0.0..=255.0).contains(n))
        .map(|n| n as u8)
}

fn apply(encoder: &mut Encoder, command: &Command, images: &Images) -> Result<()> {
    match command {
        Command::Initialize => {
            encoder.initialize();
        }
        Command::Codepage { value } => {
            encoder.codepage(value)?;
        }
        Command::Text { value, wrap } => {
            encoder.text_wrapped(value, *wrap);
        }
        Command::Line { value } => {
            encoder.line(value);
        }
        Command::Newline => {
            encoder.newline();
        }
        Command::Bold { value } => {
            encoder.bold(*value);
        }
        Command::Italic { value } => {
            encoder.italic(*value);
        }
        Command::Underline { value } => {
            encoder.underline(*value);
        }
        Command::Invert { value } => {
            encoder.invert(*value);
        }
        Command::Width { value } => {
            let width =
                multiplier(value).ok_or_else(|| EncoderError::InvalidWidth(value.to_string()))?;
            encoder.width(width)?;
        }
        Command::Height { value } => {
            let height =
                multiplier(value).ok_or_else(|| EncoderError::InvalidHeight(value.to_string()))?;
            encoder.height(height)?;
        }
        Command::Font { value } => {
            encoder.font(*value);
        }
        Command::Align { value } => {
            encoder.align(value.parse::<Alignment>()?);
        }
        Command::Rule { options } => {
            encoder.rule(*options)?;
        }
        Command::Table { columns, rows } => {
            let rows = rows
                .iter()
                .map(|row| row.iter().map(|cell| cell_content(cell, images)).collect())
                .collect();
            encoder.table(columns, rows)?;
        }
        Command::TextBox { options, content } => {
            encoder.text_box(*options, cell_content(content, images))?;
        }
        Command::Barcode {
            value,
            symbology,
            height,
        } => {
            encoder.barcode(value, symbology.parse::<Symbology>()?, *height)?;
        }
        Command::Qrcode {
            value,
            model,
            size,
            error_level,
        } => {
            // Same error precedence as the library call with a typed level
            encoder.check_qrcode(*model, *size)?;
            let options = QrOptions {
                model: *model,
                size: *size,
                error_level: error_level.parse()?,
            };
            encoder.qrcode(value, options)?;
        }
        Command::Image {
            path,
            width,
            height,
            algorithm,
            threshold,
        } => {
            let algorithm = match algorithm {
                Some(name) => name.parse::<DitheringAlgorithm>()?,
                None => DitheringAlgorithm::default(),
            };
            let options = ImageOptions {
                algorithm,
                threshold: *threshold,
            };
            // Every path was loaded by `encode_with`.
            if let Some(image) = images.get(path.as_str()) {
                encoder.image(image, *width, *height, options)?;
            }
        }
        Command::Cut { value } => {
            encoder.cut(*value)?;
        }
        Command::Pulse { options } => {
            encoder.pulse(*options)?;
        }
        Command::Raw { bytes } => {
            encoder.raw(bytes);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(json: &str) -> std::result::Result<Vec<u8>, JobError> {
        Job::from_json(json)?.encode_with(|path| {
            Err(image::ImageError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                path.display().to_string(),
            )))
        })
    }

    fn encoder_error(json: &str) -> EncoderError {
        match run(json) {
            Err(JobError::Encoder(error)) => error,
            other => panic!("expected encoder error, got {:?}", other),
        }
    }

    #[test]
    fn test_text_commands() {
        let bytes = run(r#"{"commands": [
            {"type": "bold"},
            {"type": "text", "value": "hi"},
            {"type": "bold"}
        ]}"#)
        .unwrap();
        assert_eq!(bytes, vec![0x1B, 0x45, b'h', b'i', 0x1B, 0x46]);
    }

    #[test]
    fn test_width_rejects_non_numbers() {
        assert_eq!(
            encoder_error(r#"{"commands": [{"type": "width", "value": "x"}]}"#),
            EncoderError::InvalidWidth("\"x\"".into())
        );
        assert_eq!(
            encoder_error(r#"{"commands": [{"type": "height", "value": 7}]}"#),
            EncoderError::InvalidHeight("7".into())
        );
    }

    #[test]
    fn test_width_accepts_whole_floats() {
        let bytes = run(r#"{"commands": [{"type": "width", "value": 2.0}]}"#).unwrap();
        assert_eq!(bytes, vec![0x1B, 0x69, 0x00, 0x01]);
        assert_eq!(
            encoder_error(r#"{"commands": [{"type": "width", "value": 2.5}]}"#),
            EncoderError::InvalidWidth("2.5".into())
        );
        assert_eq!(
            encoder_error(r#"{"commands": [{"type": "height", "value": -1}]}"#),
            EncoderError::InvalidHeight("-1".into())
        );
    }

    #[test]
    fn test_align_and_symbology_errors() {
        assert_eq!(
            encoder_error(r#"{"commands": [{"type": "align", "value": "justify"}]}"#),
            EncoderError::UnsupportedAlignment("justify".into())
        );
        assert_eq!(
            encoder_error(
                r#"{"commands": [{"type": "barcode", "value": "1", "symbology": "qr"}]}"#
            ),
            EncoderError::UnsupportedSymbology("qr".into())
        );
        assert_eq!(
            encoder_error(
                r#"{"commands": [{"type": "qrcode", "value": "1", "errorlevel": "x"}]}"#
            ),
            EncoderError::InvalidQrErrorLevel("x".into())
        );
    }

    #[test]
    fn test_qrcode_error_precedence() {
        assert_eq!(
            encoder_error(
                r#"{"commands": [{"type": "qrcode", "value": "1", "model": 3, "errorlevel": "x"}]}"#
            ),
            EncoderError::InvalidQrModel("3".into())
        );
        assert_eq!(
            encoder_error(
                r#"{"commands": [{"type": "qrcode", "value": "1", "size": 0, "errorlevel": "x"}]}"#
            ),
            EncoderError::InvalidQrSize("0".into())
        );
        assert_eq!(
            encoder_error(
                r#"{"options": {"width": 8}, "commands": [{
                    "type": "box",
                    "content": [{"type": "qrcode", "value": "1", "errorlevel": "x"}]
                }]}"#
            ),
            EncoderError::UnsupportedInEmbeddedContext("qrcode")
        );
    }

    #[test]
    fn test_nested_cell_commands() {
        let bytes = run(r#"{
            "options": {"width": 8},
            "commands": [{
                "type": "table",
                "columns": [{"width": 4}, {"width": 4}],
                "rows": [[[{"type": "text", "value": "ab"}], "cd"]]
            }]
        }"#)
        .unwrap();
        assert_eq!(bytes, b"ab  cd  \x0A\x0D".to_vec());
    }

    #[test]
    fn test_cut_inside_cell_is_rejected() {
        assert_eq!(
            encoder_error(
                r#"{"options": {"width": 8}, "commands": [{
                    "type": "box",
                    "content": [{"type": "cut"}]
                }]}"#
            ),
            EncoderError::UnsupportedInEmbeddedContext("cut")
        );
    }

    #[test]
    fn test_missing_image_fails_before_output() {
        let result = run(r#"{"commands": [
            {"type": "text", "value": "x"},
            {"type": "image", "path": "logo.png", "width": 8, "height": 24}
        ]}"#);
        assert!(matches!(result, Err(JobError::Image { .. })));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            Job::from_json(r#"{"commands": [{"type": "teleport"}]}"#),
            Err(JobError::Json(_))
        ));
    }
}
