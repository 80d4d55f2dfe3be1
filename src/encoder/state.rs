//! Style state carried by one encoder context.

use crate::codepage::Codepage;
use crate::protocol::text::Alignment;

/// Current text formatting, as last sent to the printer.
///
/// `codepage` is the printer table id (not the name), so it can be re-sent
/// verbatim when a nested context restores state at a line start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleState {
    pub codepage: u8,
    pub align: Alignment,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub invert: bool,
    pub width: u8,
    pub height: u8,
}

impl Default for StyleState {
    fn default() -> Self {
        Self {
            codepage: 0,
            align: Alignment::Left,
            bold: false,
            italic: false,
            underline: false,
            invert: false,
            width: 1,
            height: 1,
        }
    }
}

/// How text is turned into bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodepageSelection {
    /// Pick a candidate code page per run of text.
    Auto,
    /// Encode everything in one code page.
    Fixed(Codepage),
}

impl Default for CodepageSelection {
    fn default() -> Self {
        CodepageSelection::Fixed(Codepage::Ascii)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_state_default() {
        let state = StyleState::default();
        assert_eq!(state.codepage, 0);
        assert_eq!(state.align, Alignment::Left);
        assert!(!state.bold && !state.italic && !state.underline && !state.invert);
        assert_eq!((state.width, state.height), (1, 1));
    }

    #[test]
    fn test_default_selection_is_ascii() {
        assert_eq!(
            CodepageSelection::default(),
            CodepageSelection::Fixed(Codepage::Ascii)
        );
    }
}
