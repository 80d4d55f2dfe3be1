//! # Star Line Mode Control Commands
//!
//! This module implements the control bytes shared by every other command
//! builder, plus the few commands that are not about text or graphics:
//! initialization, the cutter and the cash drawer.
//!
//! ## Escape Sequence Structure
//!
//! Commands follow these patterns:
//! - Single byte: `LF`, `CR`, `CAN`
//! - Two bytes: `ESC @`, `ESC E`, `ESC F`
//! - Multi-byte with parameters: `ESC d n`, `ESC b n1 n2 n3 n4 data RS`
//!
//! ## Byte Order
//!
//! Multi-byte integers use **little-endian** encoding:
//! - `u16` value 0x1234 is sent as bytes `[0x34, 0x12]`
//!
//! ## Reference
//!
//! Based on "StarPRNT Command Specifications Rev. 4.10" (Star Line mode)
//! by Star Micronics Co., Ltd.

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix, used as `ESC GS`
pub const GS: u8 = 0x1D;

/// RS (Record Separator) - Font commands (`ESC RS F`) and barcode terminator
pub const RS: u8 = 0x1E;

/// LF (Line Feed) - Print the line buffer and advance one line
pub const LF: u8 = 0x0A;

/// CR (Carriage Return) - Second half of the line terminator
pub const CR: u8 = 0x0D;

/// CAN (Cancel) - Clears the print buffer, sent right after `ESC @`
pub const CAN: u8 = 0x18;

/// BEL - Drive external device 1 (cash drawer) when used as a pulse target
pub const BEL: u8 = 0x07;

/// SUB - Drive external device 2 when used as a pulse target
pub const SUB: u8 = 0x1A;

/// The two-byte sequence that ends every printed line.
///
/// Table and box composition split nested output at this pair, so it must
/// never appear inside text bytes of an embedded encoder.
pub const LINE_TERMINATOR: [u8; 2] = [LF, CR];

// ============================================================================
// INITIALIZATION COMMANDS
// ============================================================================

/// # Initialize Printer (ESC @ CAN)
///
/// Resets the printer to its power-on default state and clears whatever is
/// left in the print buffer.
///
/// ## Protocol Details
///
/// | Format  | Bytes        |
/// |---------|--------------|
/// | ASCII   | ESC @ CAN    |
/// | Hex     | 1B 40 18     |
/// | Decimal | 27 64 24     |
///
/// ## What Gets Reset
///
/// - Text formatting (bold, underline, invert) disabled
/// - Character size reset to 1x1
/// - Alignment reset to left
/// - Code page reset to the memory switch default
///
/// ## Example
///
/// ```
/// use starline::protocol::commands;
///
/// assert_eq!(commands::init(), vec![0x1B, 0x40, 0x18]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@', CAN]
}

// ============================================================================
// CUTTER CONTROL COMMANDS
// ============================================================================

/// # Full Cut at Current Position (ESC d 0)
///
/// ## Protocol Details
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | ESC d 0  |
/// | Hex     | 1B 64 00 |
/// | Decimal | 27 100 0 |
#[inline]
pub fn cut_full() -> Vec<u8> {
    vec![ESC, b'd', 0]
}

/// # Partial Cut at Current Position (ESC d 1)
///
/// Leaves a small "hinge" connecting the receipt to the roll.
///
/// ## Protocol Details
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | ESC d 1  |
/// | Hex     | 1B 64 01 |
/// | Decimal | 27 100 1 |
#[inline]
pub fn cut_partial() -> Vec<u8> {
    vec![ESC, b'd', 1]
}

// ============================================================================
// EXTERNAL DEVICE (CASH DRAWER)
// ============================================================================

/// # External Device Drive Pulse (ESC BEL n1 n2 BEL|SUB)
///
/// Sets the pulse on/off times and fires the pulse on the selected device.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC BEL n1 n2 BEL (device 1) / SUB (device 2) |
/// | Hex     | 1B 07 n1 n2 07 / 1A |
///
/// ## Parameters
///
/// - `device`: 0 drives device 1 (`BEL`), anything else device 2 (`SUB`)
/// - `on_ms` / `off_ms`: Pulse timing in milliseconds, sent in 10 ms units
///   and clamped to 127 units (1270 ms)
///
/// ## Example
///
/// ```
/// use starline::protocol::commands;
///
/// assert_eq!(commands::pulse(0, 200, 200), vec![0x1B, 0x07, 20, 20, 0x07]);
/// ```
pub fn pulse(device: u8, on_ms: u32, off_ms: u32) -> Vec<u8> {
    let on = pulse_units(on_ms);
    let off = pulse_units(off_ms);
    let target = if device == 0 { BEL } else { SUB };
    vec![ESC, BEL, on, off, target]
}

/// Convert milliseconds to the 10 ms pulse units, rounding to nearest.
fn pulse_units(ms: u32) -> u8 {
    (ms.saturating_add(5) / 10).min(127) as u8
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Encode a u16 value as little-endian bytes [low, high]
///
/// ## Example
///
/// ```
/// use starline::protocol::commands::u16_le;
///
/// assert_eq!(u16_le(0x1234), [0x34, 0x12]);
/// assert_eq!(u16_le(576), [0x40, 0x02]);
/// ```
#[inline]
pub const fn u16_le(value: u16) -> [u8; 2] {
    [value as u8, (value >> 8) as u8]
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init() {
        assert_eq!(init(), vec![0x1B, 0x40, 0x18]);
    }

    #[test]
    fn test_cut_full() {
        assert_eq!(cut_full(), vec![0x1B, 0x64, 0x00]);
    }

    #[test]
    fn test_cut_partial() {
        assert_eq!(cut_partial(), vec![0x1B, 0x64, 0x01]);
    }

    #[test]
    fn test_pulse_devices() {
        assert_eq!(pulse(0, 200, 200), vec![0x1B, 0x07, 20, 20, 0x07]);
        assert_eq!(pulse(1, 200, 200), vec![0x1B, 0x07, 20, 20, 0x1A]);
    }

    #[test]
    fn test_pulse_rounds_and_clamps() {
        assert_eq!(pulse(0, 105, 94), vec![0x1B, 0x07, 11, 9, 0x07]);
        assert_eq!(pulse(0, 5000, 0), vec![0x1B, 0x07, 127, 0, 0x07]);
        assert_eq!(pulse(0, u32::MAX, u32::MAX - 4), vec![0x1B, 0x07, 127, 127, 0x07]);
    }

    #[test]
    fn test_u16_le() {
        assert_eq!(u16_le(0x0000), [0x00, 0x00]);
        assert_eq!(u16_le(0x00FF), [0xFF, 0x00]);
        assert_eq!(u16_le(0x1234), [0x34, 0x12]);
        assert_eq!(u16_le(576), [0x40, 0x02]);
    }
}
