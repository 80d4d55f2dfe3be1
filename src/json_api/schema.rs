//! JSON schema types for print jobs.

use serde::Deserialize;

use crate::encoder::{BoxOptions, CutType, EncoderOptions, PulseOptions, RuleOptions, TableColumn};
use crate::protocol::text::Font;

fn default_barcode_height() -> u8 {
    60
}

fn default_qr_model() -> u8 {
    2
}

fn default_qr_size() -> u8 {
    6
}

fn default_error_level() -> String {
    "m".to_string()
}

fn default_threshold() -> u8 {
    128
}

/// Top-level print job.
#[derive(Debug, Deserialize)]
pub struct Job {
    /// Encoder construction options.
    #[serde(default)]
    pub options: EncoderOptions,
    /// Commands, run in order against one encoder.
    pub commands: Vec<Command>,
}

/// One encoder call.
///
/// String-valued enums (alignment, symbology, error level, dithering) are
/// kept as strings and parsed when the job runs, so a bad value reports the
/// same error the library call would.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    Initialize,
    Codepage {
        value: String,
    },
    Text {
        value: String,
        /// Wrap width overriding the paper width.
        #[serde(default)]
        wrap: Option<usize>,
    },
    Line {
        value: String,
    },
    Newline,
    Bold {
        #[serde(default)]
        value: Option<bool>,
    },
    Italic {
        #[serde(default)]
        value: Option<bool>,
    },
    Underline {
        #[serde(default)]
        value: Option<bool>,
    },
    Invert {
        #[serde(default)]
        value: Option<bool>,
    },
    /// Any JSON value; non-numbers are rejected when the job runs.
    Width {
        value: serde_json::Value,
    },
    Height {
        value: serde_json::Value,
    },
    #[serde(alias = "size")]
    Font {
        value: Font,
    },
    Align {
        value: String,
    },
    Rule {
        #[serde(flatten)]
        options: RuleOptions,
    },
    Table {
        columns: Vec<TableColumn>,
        rows: Vec<Vec<Cell>>,
    },
    #[serde(rename = "box")]
    TextBox {
        #[serde(flatten)]
        options: BoxOptions,
        content: Cell,
    },
    Barcode {
        value: String,
        symbology: String,
        #[serde(default = "default_barcode_height")]
        height: u8,
    },
    Qrcode {
        value: String,
        #[serde(default = "default_qr_model")]
        model: u8,
        #[serde(default = "default_qr_size")]
        size: u8,
        #[serde(default = "default_error_level", rename = "errorlevel", alias = "errorLevel")]
        error_level: String,
    },
    Image {
        /// Image file, relative to the job's base directory.
        path: String,
        width: u32,
        height: u32,
        #[serde(default)]
        algorithm: Option<String>,
        #[serde(default = "default_threshold")]
        threshold: u8,
    },
    Cut {
        #[serde(default)]
        value: CutType,
    },
    Pulse {
        #[serde(flatten)]
        options: PulseOptions,
    },
    Raw {
        bytes: Vec<u8>,
    },
}

/// Table cell or box content: a string or nested commands.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Commands(Vec<Command>),
}
