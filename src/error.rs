//! # Error Types
//!
//! This module defines the error type returned by the encoder. Every variant
//! is a programmer or input error raised synchronously by the call that
//! received the bad value; none of them are transient.

use thiserror::Error;

/// Main error type for encoder operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncoderError {
    /// The character encoder does not know this code page name
    #[error("Unknown codepage: {0}")]
    UnknownCodepage(String),

    /// The code page is known, but the printer mapping has no id for it
    #[error("Codepage not supported by printer: {0}")]
    UnsupportedCodepage(String),

    /// Alignment other than left, center or right
    #[error("Unknown alignment: {0}")]
    UnsupportedAlignment(String),

    /// Text width multiplier is not a number in 1..=6
    #[error("Width must be a number between 1 and 6, got {0}")]
    InvalidWidth(String),

    /// Text height multiplier is not a number in 1..=6
    #[error("Height must be a number between 1 and 6, got {0}")]
    InvalidHeight(String),

    /// QR code model other than 1 or 2
    #[error("QR code model is not supported: {0}")]
    InvalidQrModel(String),

    /// QR code cell size is not a number in 1..=8
    #[error("QR code size must be a number between 1 and 8, got {0}")]
    InvalidQrSize(String),

    /// QR code error level other than l, m, q or h
    #[error("QR code error level is not supported: {0}")]
    InvalidQrErrorLevel(String),

    /// Barcode symbology the printer does not know
    #[error("Symbology not supported by printer: {0}")]
    UnsupportedSymbology(String),

    /// Image width must be a multiple of 8 and height a multiple of 24
    #[error("Invalid image dimensions {width}x{height}: width must be a multiple of 8, height a multiple of 24")]
    InvalidImageDimensions { width: u32, height: u32 },

    /// Dithering algorithm other than threshold, bayer, floydsteinberg or atkinson
    #[error("Unknown dithering algorithm: {0}")]
    UnsupportedDithering(String),

    /// Barcodes, QR codes, images, cuts and pulses cannot go into table cells or boxes
    #[error("{0} is not supported in table cells or boxes")]
    UnsupportedInEmbeddedContext(&'static str),
}

/// Result alias used throughout the encoder
pub type Result<T> = std::result::Result<T, EncoderError>;
