//! # Star Line Mode Text Styling Commands
//!
//! This module implements text formatting commands for Star Micronics printers.
//!
//! ## Text Styling Overview
//!
//! | Style | Command | Effect |
//! |-------|---------|--------|
//! | Bold | ESC E / ESC F | **Emphasized** text |
//! | Underline | ESC - n | Underlined text |
//! | Invert | ESC 4 / ESC 5 | White on black |
//! | Size | ESC i n1 n2 | 1x to 6x height and width |
//! | Font | ESC RS F n | Font A (12x24) or Font B (9x24) |
//! | Code page | ESC GS t n | Character table for bytes 0x80-0xFF |
//!
//! ## Text Alignment
//!
//! ```text
//! Left aligned (default)    |LEFT TEXT
//! Center aligned            |  CENTER TEXT
//! Right aligned             |      RIGHT TEXT
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::commands::{ESC, GS, RS};
use crate::error::EncoderError;

// ============================================================================
// TEXT ALIGNMENT
// ============================================================================

/// Text alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left = 0,
    Center = 1,
    Right = 2,
}

impl FromStr for Alignment {
    type Err = EncoderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Alignment::Left),
            "center" => Ok(Alignment::Center),
            "right" => Ok(Alignment::Right),
            other => Err(EncoderError::UnsupportedAlignment(other.to_string())),
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        };
        f.write_str(name)
    }
}

/// # Set Text Alignment (ESC GS a n)
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC GS a n |
/// | Hex     | 1B 1D 61 n |
/// | Decimal | 27 29 97 n |
///
/// ## Parameters
///
/// - `n = 0`: Left alignment (default)
/// - `n = 1`: Center alignment
/// - `n = 2`: Right alignment
///
/// ## Example
///
/// ```
/// use starline::protocol::text::{align, Alignment};
///
/// assert_eq!(align(Alignment::Center), vec![0x1B, 0x1D, 0x61, 0x01]);
/// ```
pub fn align(alignment: Alignment) -> Vec<u8> {
    vec![ESC, GS, b'a', alignment as u8]
}

// ============================================================================
// FONT SELECTION
// ============================================================================

/// Available fonts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Font {
    /// Font A: 12x24 dots
    #[default]
    #[serde(alias = "a", alias = "normal")]
    A = 0,
    /// Font B: 9x24 dots
    #[serde(alias = "b", alias = "small")]
    B = 1,
}

/// # Select Font (ESC RS F n)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC RS F n |
/// | Hex     | 1B 1E 46 n |
pub fn font(f: Font) -> Vec<u8> {
    vec![ESC, RS, b'F', f as u8]
}

// ============================================================================
// EMPHASIS, UNDERLINE, INVERT
// ============================================================================

/// # Enable Bold/Emphasis (ESC E)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC E |
/// | Hex     | 1B 45 |
#[inline]
pub fn bold_on() -> Vec<u8> {
    vec![ESC, b'E']
}

/// # Disable Bold/Emphasis (ESC F)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC F |
/// | Hex     | 1B 46 |
#[inline]
pub fn bold_off() -> Vec<u8> {
    vec![ESC, b'F']
}

/// Bold on or off in one call
#[inline]
pub fn bold(enabled: bool) -> Vec<u8> {
    if enabled { bold_on() } else { bold_off() }
}

/// # Set Underline Mode (ESC - n)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC - n |
/// | Hex     | 1B 2D n |
///
/// `n = 0` turns underline off, `n = 1` turns it on.
#[inline]
pub fn underline(enabled: bool) -> Vec<u8> {
    vec![ESC, b'-', u8::from(enabled)]
}

/// # Enable Inverted Printing (ESC 4)
///
/// Prints white text on a black background.
#[inline]
pub fn invert_on() -> Vec<u8> {
    vec![ESC, b'4']
}

/// # Disable Inverted Printing (ESC 5)
#[inline]
pub fn invert_off() -> Vec<u8> {
    vec![ESC, b'5']
}

/// Invert on or off in one call
#[inline]
pub fn invert(enabled: bool) -> Vec<u8> {
    if enabled { invert_on() } else { invert_off() }
}

// ============================================================================
// CHARACTER SIZE
// ============================================================================

/// # Set Character Size (ESC i n1 n2)
///
/// Sets vertical and horizontal expansion together. The printer has no
/// command that changes only one of them.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC i n1 n2 |
/// | Hex     | 1B 69 n1 n2 |
///
/// ## Parameters
///
/// - `height_mult`: Vertical multiplier, 1-6
/// - `width_mult`: Horizontal multiplier, 1-6
///
/// The wire values are zero based (`n = mult - 1`).
///
/// ## Example
///
/// ```
/// use starline::protocol::text::size;
///
/// assert_eq!(size(2, 2), vec![0x1B, 0x69, 0x01, 0x01]);
/// assert_eq!(size(1, 3), vec![0x1B, 0x69, 0x00, 0x02]);
/// ```
pub fn size(height_mult: u8, width_mult: u8) -> Vec<u8> {
    let h = height_mult.clamp(1, 6) - 1;
    let w = width_mult.clamp(1, 6) - 1;
    vec![ESC, b'i', h, w]
}

// ============================================================================
// CODE PAGE SELECTION
// ============================================================================

/// # Set Code Page (ESC GS t n)
///
/// Selects the character table used for bytes 0x80-0xFF. The id comes from
/// the printer's code page mapping, see [`crate::codepage::CodepageMapping`].
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC GS t n |
/// | Hex     | 1B 1D 74 n |
///
/// ## Example
///
/// ```
/// use starline::protocol::text::codepage;
///
/// assert_eq!(codepage(1), vec![0x1B, 0x1D, 0x74, 0x01]);
/// ```
#[inline]
pub fn codepage(id: u8) -> Vec<u8> {
    vec![ESC, GS, b't', id]
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align() {
        assert_eq!(align(Alignment::Left), vec![0x1B, 0x1D, 0x61, 0x00]);
        assert_eq!(align(Alignment::Center), vec![0x1B, 0x1D, 0x61, 0x01]);
        assert_eq!(align(Alignment::Right), vec![0x1B, 0x1D, 0x61, 0x02]);
    }

    #[test]
    fn test_alignment_from_str() {
        assert_eq!("center".parse::<Alignment>(), Ok(Alignment::Center));
        assert_eq!(
            "middle".parse::<Alignment>(),
            Err(EncoderError::UnsupportedAlignment("middle".into()))
        );
    }

    #[test]
    fn test_font() {
        assert_eq!(font(Font::A), vec![0x1B, 0x1E, 0x46, 0x00]);
        assert_eq!(font(Font::B), vec![0x1B, 0x1E, 0x46, 0x01]);
    }

    #[test]
    fn test_bold() {
        assert_eq!(bold(true), vec![0x1B, 0x45]);
        assert_eq!(bold(false), vec![0x1B, 0x46]);
    }

    #[test]
    fn test_underline() {
        assert_eq!(underline(true), vec![0x1B, 0x2D, 0x01]);
        assert_eq!(underline(false), vec![0x1B, 0x2D, 0x00]);
    }

    #[test]
    fn test_invert() {
        assert_eq!(invert(true), vec![0x1B, 0x34]);
        assert_eq!(invert(false), vec![0x1B, 0x35]);
    }

    #[test]
    fn test_size_is_zero_based() {
        assert_eq!(size(1, 1), vec![0x1B, 0x69, 0x00, 0x00]);
        assert_eq!(size(6, 6), vec![0x1B, 0x69, 0x05, 0x05]);
        assert_eq!(size(3, 1), vec![0x1B, 0x69, 0x02, 0x00]);
    }

    #[test]
    fn test_codepage() {
        assert_eq!(codepage(0x20), vec![0x1B, 0x1D, 0x74, 0x20]);
    }
}
