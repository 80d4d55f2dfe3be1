//! # Star Line Mode Protocol Implementation
//!
//! This module provides low-level command builders for the Star Line mode
//! command set of Star Micronics thermal receipt printers. Every function is
//! a pure `-> Vec<u8>` builder; state tracking lives in [`crate::encoder`].
//!
//! ## Module Structure
//!
//! - [`commands`]: Control bytes, init, cutter, drawer pulse
//! - [`text`]: Alignment, fonts, bold, underline, invert, size, code page
//! - [`barcode`]: 1D barcodes and QR codes
//! - [`graphics`]: 24-dot bit image bands
//!
//! ## Usage Example
//!
//! ```
//! use starline::protocol::{commands, text};
//!
//! let mut data = Vec::new();
//! data.extend(commands::init());
//! data.extend(text::align(text::Alignment::Center));
//! data.extend(text::bold_on());
//! data.extend(b"RECEIPT");
//! data.extend(commands::LINE_TERMINATOR);
//! data.extend(text::bold_off());
//! data.extend(commands::cut_partial());
//! ```
//!
//! ## Protocol Reference
//!
//! This implementation is based on "StarPRNT Command Specifications Rev. 4.10"
//! by Star Micronics Co., Ltd.

pub mod barcode;
pub mod commands;
pub mod graphics;
pub mod text;
