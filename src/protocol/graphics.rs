//! # Star Line Mode Bit Image Commands
//!
//! Images are printed as a stack of 24-dot high bands. Each band is one
//! `ESC X` command followed by a line terminator, with the line spacing
//! switched to 24 dots first so consecutive bands touch.
//!
//! ## Band Data Layout
//!
//! Unlike raster mode, band data is column major: every dot column of the
//! band is three bytes, top to bottom.
//!
//! ```text
//!            column 0   column 1   ...
//! rows 0-7   d[0]       d[3]
//! rows 8-15  d[1]       d[4]
//! rows 16-23 d[2]       d[5]
//!
//! Each byte: bit7 = top row of its group, bit0 = bottom row
//! 1 = black (print), 0 = white (no print)
//! ```
//!
//! ## Sequence
//!
//! ```text
//! ESC 0                       line spacing = 24 dots
//! ESC X nL nH d... LF CR      band 1
//! ESC X nL nH d... LF CR      band 2
//! ...
//! ESC z 1                     line spacing back to default
//! ```

use super::commands::{CR, ESC, LF, u16_le};

/// Height of one bit image band in dots.
pub const BAND_HEIGHT: usize = 24;

/// # Set Line Spacing to 24 Dots (ESC 0)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | Hex     | 1B 30 |
#[inline]
pub fn line_spacing_band() -> Vec<u8> {
    vec![ESC, b'0']
}

/// # Restore Default Line Spacing (ESC z 1)
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | Hex     | 1B 7A 01 |
#[inline]
pub fn line_spacing_default() -> Vec<u8> {
    vec![ESC, b'z', 1]
}

/// # Fine Density Bit Image Band (ESC X nL nH d1...dk LF CR)
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC X nL nH d1...dk LF CR |
/// | Hex     | 1B 58 nL nH d1...dk 0A 0D |
///
/// ## Parameters
///
/// - `nL, nH`: Width in dots, little-endian
/// - `d1...dk`: Column data, k = width × 3 bytes
///
/// ## Example
///
/// ```
/// use starline::protocol::graphics;
///
/// let cmd = graphics::band(8, &[0u8; 24]);
/// assert_eq!(&cmd[..4], &[0x1B, 0x58, 8, 0]);
/// assert_eq!(&cmd[cmd.len() - 2..], &[0x0A, 0x0D]);
/// ```
pub fn band(width_dots: u16, data: &[u8]) -> Vec<u8> {
    debug_assert!(
        data.len() == width_dots as usize * 3,
        "Band data must be exactly width_dots * 3 bytes. Expected {}, got {}",
        width_dots as usize * 3,
        data.len()
    );

    let mut cmd = Vec::with_capacity(4 + data.len() + 2);
    cmd.push(ESC);
    cmd.push(b'X');
    cmd.extend_from_slice(&u16_le(width_dots));
    cmd.extend_from_slice(data);
    cmd.push(LF);
    cmd.push(CR);
    cmd
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_spacing() {
        assert_eq!(line_spacing_band(), vec![0x1B, 0x30]);
        assert_eq!(line_spacing_default(), vec![0x1B, 0x7A, 0x01]);
    }

    #[test]
    fn test_band_header_width_is_little_endian() {
        let data = vec![0xFF; 576 * 3];
        let cmd = band(576, &data);
        assert_eq!(&cmd[..4], &[0x1B, 0x58, 0x40, 0x02]);
        assert_eq!(cmd.len(), 4 + 576 * 3 + 2);
    }

    #[test]
    fn test_band_ends_with_line_terminator() {
        let cmd = band(16, &[0xAA; 48]);
        assert_eq!(&cmd[4..52], &[0xAA; 48][..]);
        assert_eq!(&cmd[52..], &[0x0A, 0x0D]);
    }
}
