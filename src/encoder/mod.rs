//! # Print Job Encoder
//!
//! A chainable builder that turns print operations into a Star Line mode
//! byte stream.
//!
//! ## Design
//!
//! ```text
//! ┌──────────┐   style, text   ┌──────────────┐   flush    ┌────────────┐
//! │ Encoder  │ ──────────────► │ CommandQueue │ ─────────► │   buffer   │
//! │ (facade) │                 │  (pending)   │  (+ pad)   │ (committed)│
//! └──────────┘                 └──────────────┘            └────────────┘
//!      │ table / text_box
//!      ▼
//! nested embedded Encoder per cell, output split at LF CR
//! ```
//!
//! Style calls update [`StyleState`] and queue the matching command. Text is
//! wrapped, encoded in the selected code page and queued while the cursor
//! column advances. A flush (newline, barcode, QR code, image, `encode`)
//! commits the pending fragments.
//!
//! An *embedded* encoder is the nested context a table cell or box renders
//! into. It has a fixed width, pads every line to it according to the
//! alignment, re-sends its style at each line start, and refuses commands
//! that cannot live inside a cell.
//!
//! ## Example
//!
//! ```
//! use starline::encoder::{CutType, Encoder};
//! use starline::protocol::text::Alignment;
//!
//! let mut encoder = Encoder::default();
//! encoder
//!     .initialize()
//!     .codepage("cp437")?
//!     .align(Alignment::Center)
//!     .bold(true)
//!     .line("CHURRA MART")
//!     .bold(false)
//!     .cut(CutType::Partial)?;
//! let bytes = encoder.encode();
//! assert_eq!(&bytes[..3], &[0x1B, 0x40, 0x18]);
//! # Ok::<(), starline::EncoderError>(())
//! ```

mod graphics;
mod layout;
mod options;
mod queue;
mod state;

pub use graphics::{ImageOptions, QrOptions};
pub use layout::{BoxOptions, BoxStyle, CellContent, TableColumn, VerticalAlign};
pub use options::{DEFAULT_CANDIDATES, EncoderOptions};
pub use state::{CodepageSelection, StyleState};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::codepage::{self, Codepage, cp437};
use crate::error::{EncoderError, Result};
use crate::protocol::commands::{self, LINE_TERMINATOR};
use crate::protocol::text::{self, Alignment, Font};
use crate::wrap;
use queue::{CommandQueue, Padding};

/// Default width for rules and boxes when the paper width is unknown.
const FALLBACK_WIDTH: usize = 30;

/// Paper cut type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CutType {
    #[default]
    Full,
    Partial,
}

/// Line style for rules and box borders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Single,
    Double,
}

/// Horizontal rule options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleOptions {
    pub style: LineStyle,
    /// Rule length in columns; defaults to the paper width.
    pub width: Option<usize>,
}

/// Cash drawer pulse options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PulseOptions {
    /// 0 for the first drawer port, anything else for the second.
    pub device: u8,
    pub on_ms: u32,
    pub off_ms: u32,
}

impl Default for PulseOptions {
    fn default() -> Self {
        Self {
            device: 0,
            on_ms: 200,
            off_ms: 200,
        }
    }
}

/// Chainable Star Line mode command encoder.
///
/// Infallible calls return `&mut Self`; calls that validate input return
/// `Result<&mut Self>` so chains continue with `?`.
#[derive(Debug)]
pub struct Encoder {
    options: EncoderOptions,
    codepage: CodepageSelection,
    queue: CommandQueue,
    state: StyleState,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new(EncoderOptions::default())
    }
}

impl Encoder {
    /// Create an encoder.
    ///
    /// Auto mode candidates the code page mapping has no id for are dropped,
    /// since the printer could not be switched to them.
    pub fn new(mut options: EncoderOptions) -> Self {
        let mapping = &options.codepage_mapping;
        options.codepage_candidates.retain(|&candidate| {
            let known = mapping.id(candidate).is_some();
            if !known {
                warn!(%candidate, "codepage candidate has no printer id, skipping");
            }
            known
        });

        Self {
            options,
            codepage: CodepageSelection::default(),
            queue: CommandQueue::default(),
            state: StyleState::default(),
        }
    }

    pub fn options(&self) -> &EncoderOptions {
        &self.options
    }

    pub fn state(&self) -> &StyleState {
        &self.state
    }

    /// Current cursor column on the line being built.
    pub fn cursor(&self) -> usize {
        self.queue.cursor
    }

    /// Embedding only takes effect together with a width.
    fn embedded(&self) -> bool {
        self.options.embedded && self.options.width.is_some()
    }

    fn reject_embedded(&self, command: &'static str) -> Result<()> {
        if self.embedded() {
            return Err(EncoderError::UnsupportedInEmbeddedContext(command));
        }
        Ok(())
    }

    fn cp437_id(&self) -> Result<u8> {
        self.options
            .codepage_mapping
            .id(Codepage::Cp437)
            .ok_or_else(|| EncoderError::UnsupportedCodepage(Codepage::Cp437.to_string()))
    }

    // ========================================================================
    // QUEUE PLUMBING
    // ========================================================================

    fn flush(&mut self, force: bool) {
        let padding = match self.options.width {
            Some(width) if self.embedded() && (force || self.queue.line_open) => Some(Padding {
                width,
                align: self.state.align,
            }),
            _ => None,
        };
        self.queue.flush(padding);
    }

    /// Queue bytes that print `columns` characters.
    fn queue_columns(&mut self, bytes: Vec<u8>, columns: usize) {
        self.queue.push_columns(bytes, columns);
    }

    /// Re-send bold, underline, invert and code page from [`StyleState`].
    fn restore_state(&mut self) {
        self.queue.push(text::bold(self.state.bold));
        self.queue.push(text::underline(self.state.underline));
        self.queue.push(text::invert(self.state.invert));
        self.queue.push(text::codepage(self.state.codepage));
    }

    /// Encode a string with the current code page selection.
    ///
    /// In auto mode each run is preceded by its code page select and the
    /// tracked code page follows the last run.
    fn encode_text(&mut self, value: &str) -> Vec<u8> {
        match self.codepage {
            CodepageSelection::Fixed(codepage) => codepage::encode(value, codepage),
            CodepageSelection::Auto if self.options.codepage_candidates.is_empty() => {
                warn!("auto codepage without candidates, encoding as ascii");
                codepage::encode(value, Codepage::Ascii)
            }
            CodepageSelection::Auto => {
                let mut out = Vec::with_capacity(value.len());
                for segment in codepage::auto_encode(value, &self.options.codepage_candidates) {
                    if let Some(id) = self.options.codepage_mapping.id(segment.codepage) {
                        self.state.codepage = id;
                        out.extend(text::codepage(id));
                    }
                    out.extend(segment.bytes);
                }
                out
            }
        }
    }

    // ========================================================================
    // PRINTER CONTROL
    // ========================================================================

    /// Reset the printer (`ESC @ CAN`) and commit it.
    pub fn initialize(&mut self) -> &mut Self {
        self.queue.push(commands::init());
        self.flush(false);
        self
    }

    /// Select a code page by name, or `"auto"` for per-run detection.
    ///
    /// ## Errors
    ///
    /// - [`EncoderError::UnknownCodepage`] if the name is not a known code page
    /// - [`EncoderError::UnsupportedCodepage`] if the printer mapping has no id
    ///   for it
    pub fn codepage(&mut self, name: &str) -> Result<&mut Self> {
        if name == "auto" {
            self.codepage = CodepageSelection::Auto;
            return Ok(self);
        }

        let codepage: Codepage = name.parse()?;
        let id = self
            .options
            .codepage_mapping
            .id(codepage)
            .ok_or_else(|| EncoderError::UnsupportedCodepage(name.to_string()))?;

        self.codepage = CodepageSelection::Fixed(codepage);
        self.state.codepage = id;
        self.queue.push(text::codepage(id));
        Ok(self)
    }

    /// Queue bytes verbatim. The cursor does not move.
    pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.queue.push(bytes.to_vec());
        self
    }

    /// Cut the paper.
    pub fn cut(&mut self, cut: CutType) -> Result<&mut Self> {
        self.reject_embedded("cut")?;
        self.queue.push(match cut {
            CutType::Full => commands::cut_full(),
            CutType::Partial => commands::cut_partial(),
        });
        Ok(self)
    }

    /// Kick a cash drawer.
    pub fn pulse(&mut self, pulse: PulseOptions) -> Result<&mut Self> {
        self.reject_embedded("pulse")?;
        self.queue
            .push(commands::pulse(pulse.device, pulse.on_ms, pulse.off_ms));
        Ok(self)
    }

    // ========================================================================
    // TEXT
    // ========================================================================

    /// Print text, wrapped at the paper width when word wrap is on.
    pub fn text(&mut self, value: &str) -> &mut Self {
        self.text_wrapped(value, None)
    }

    /// Print text wrapped at `wrap_width` columns, falling back to the paper
    /// width when word wrap is on.
    ///
    /// Wrapping starts from the current cursor column, so text appended to a
    /// partly filled line breaks where the printer would run out of room.
    pub fn text_wrapped(&mut self, value: &str, wrap_width: Option<usize>) -> &mut Self {
        let multiplier = self.state.width as usize;
        let wrap_width = wrap_width
            .or(self.options.width.filter(|_| self.options.word_wrap))
            .map(|width| width / multiplier);
        let lines = wrap::wrap(value, wrap_width, self.queue.cursor / multiplier);
        let last = lines.len().saturating_sub(1);

        for (index, line) in lines.iter().enumerate() {
            let bytes = self.encode_text(line);
            self.queue_columns(bytes, line.chars().count() * multiplier);
            self.queue.line_open = true;

            if let Some(width) = self.options.width
                && !self.embedded()
                && width > 0
            {
                self.queue.cursor %= width;
            }

            if index < last {
                self.newline();
            }
        }
        self
    }

    /// End the current line.
    ///
    /// In an embedded context the line is padded to the cell width and the
    /// style is re-sent so the next line starts formatted.
    pub fn newline(&mut self) -> &mut Self {
        self.flush(true);
        self.queue.commit(&LINE_TERMINATOR);
        if self.embedded() {
            self.restore_state();
        }
        self
    }

    /// [`text`](Self::text) followed by [`newline`](Self::newline).
    pub fn line(&mut self, value: &str) -> &mut Self {
        self.text(value).newline()
    }

    // ========================================================================
    // STYLE
    // ========================================================================

    /// Bold on, off, or toggled with `None`.
    pub fn bold(&mut self, value: impl Into<Option<bool>>) -> &mut Self {
        let value = value.into().unwrap_or(!self.state.bold);
        self.state.bold = value;
        self.queue.push(text::bold(value));
        self
    }

    /// Tracked for state restoration only; Star Line mode has no italics.
    pub fn italic(&mut self, value: impl Into<Option<bool>>) -> &mut Self {
        self.state.italic = value.into().unwrap_or(!self.state.italic);
        self
    }

    /// Underline on, off, or toggled with `None`.
    pub fn underline(&mut self, value: impl Into<Option<bool>>) -> &mut Self {
        let value = value.into().unwrap_or(!self.state.underline);
        self.state.underline = value;
        self.queue.push(text::underline(value));
        self
    }

    /// White on black, or toggled with `None`.
    pub fn invert(&mut self, value: impl Into<Option<bool>>) -> &mut Self {
        let value = value.into().unwrap_or(!self.state.invert);
        self.state.invert = value;
        self.queue.push(text::invert(value));
        self
    }

    /// Horizontal character expansion, 1-6.
    pub fn width(&mut self, width: u8) -> Result<&mut Self> {
        if !(1..=6).contains(&width) {
            return Err(EncoderError::InvalidWidth(width.to_string()));
        }
        self.state.width = width;
        self.queue.push(text::size(self.state.height, self.state.width));
        Ok(self)
    }

    /// Vertical character expansion, 1-6.
    pub fn height(&mut self, height: u8) -> Result<&mut Self> {
        if !(1..=6).contains(&height) {
            return Err(EncoderError::InvalidHeight(height.to_string()));
        }
        self.state.height = height;
        self.queue.push(text::size(self.state.height, self.state.width));
        Ok(self)
    }

    /// Select Font A (normal) or Font B (small).
    pub fn font(&mut self, font: Font) -> &mut Self {
        self.queue.push(text::font(font));
        self
    }

    /// Line alignment.
    ///
    /// Embedded contexts send nothing; their lines are padded on flush.
    pub fn align(&mut self, align: Alignment) -> &mut Self {
        self.state.align = align;
        if !self.embedded() {
            self.queue.push(text::align(align));
        }
        self
    }

    /// Horizontal line of box drawing characters across the paper.
    pub fn rule(&mut self, rule: RuleOptions) -> Result<&mut Self> {
        let cp437_id = self.cp437_id()?;
        let width = rule
            .width
            .or(self.options.width)
            .unwrap_or(FALLBACK_WIDTH);
        let glyph = match rule.style {
            LineStyle::Single => '─',
            LineStyle::Double => '═',
        };

        if self.queue.cursor != 0 {
            self.newline();
        }
        self.queue.push(text::codepage(cp437_id));
        self.queue_columns(glyphs(glyph, width), width);
        self.queue.push(text::codepage(self.state.codepage));
        self.queue.line_open = true;
        self.newline();
        Ok(self)
    }

    // ========================================================================
    // OUTPUT
    // ========================================================================

    /// Commit everything and return the byte stream.
    ///
    /// The encoder is reset afterwards; a second call returns nothing until
    /// new commands are added.
    pub fn encode(&mut self) -> Vec<u8> {
        self.flush(false);
        let bytes = self.queue.take();

        self.queue = CommandQueue::default();
        self.state = StyleState::default();
        self.codepage = CodepageSelection::default();
        bytes
    }
}

/// `count` copies of a CP437 box drawing glyph.
fn glyphs(glyph: char, count: usize) -> Vec<u8> {
    cp437::encode_char(glyph)
        .map(|byte| vec![byte; count])
        .unwrap_or_default()
}

/// `count` spaces.
fn spaces(count: usize) -> Vec<u8> {
    vec![b' '; count]
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codepage::CodepageMapping;

    fn embedded(width: usize) -> Encoder {
        Encoder::new(
            EncoderOptions::default()
                .with_width(width)
                .with_embedded(true),
        )
    }

    #[test]
    fn test_ascii_by_default() {
        let mut encoder = Encoder::default();
        assert_eq!(encoder.text("hello").encode(), b"hello".to_vec());
    }

    #[test]
    fn test_fixed_codepage() {
        let mut encoder = Encoder::default();
        encoder.codepage("cp437").unwrap().text("héllo");
        assert_eq!(
            encoder.encode(),
            vec![0x1B, 0x1D, 0x74, 0x01, 0x68, 0x82, 0x6C, 0x6C, 0x6F]
        );
    }

    #[test]
    fn test_codepage_errors() {
        let mut encoder = Encoder::default();
        assert_eq!(
            encoder.codepage("cp999").unwrap_err(),
            EncoderError::UnknownCodepage("cp999".into())
        );
        assert_eq!(
            encoder.codepage("ascii").unwrap_err(),
            EncoderError::UnsupportedCodepage("ascii".into())
        );
        assert!(encoder.codepage("auto").is_ok());
    }

    #[test]
    fn test_custom_codepage_mapping() {
        let mapping = CodepageMapping::Custom(
            [(Codepage::Cp437, 0), (Codepage::Cp1252, 16)].into_iter().collect(),
        );
        let mut encoder = Encoder::new(EncoderOptions::default().with_codepage_mapping(mapping));
        encoder.codepage("cp1252").unwrap().text("€");
        assert_eq!(encoder.encode(), vec![0x1B, 0x1D, 0x74, 0x10, 0x80]);
        assert_eq!(
            encoder.codepage("cp858").unwrap_err(),
            EncoderError::UnsupportedCodepage("cp858".into())
        );
    }

    #[test]
    fn test_auto_codepage_prefixes_runs() {
        let mut encoder = Encoder::default();
        encoder.codepage("auto").unwrap().text("a€");
        assert_eq!(
            encoder.encode(),
            vec![0x1B, 0x1D, 0x74, 0x01, b'a', 0x1B, 0x1D, 0x74, 0x04, 0xD5]
        );
    }

    #[test]
    fn test_auto_codepage_tracks_state() {
        let mut encoder = Encoder::default();
        encoder.codepage("auto").unwrap().text("€");
        assert_eq!(encoder.state().codepage, 4);
    }

    #[test]
    fn test_candidates_without_id_are_dropped() {
        let encoder = Encoder::new(
            EncoderOptions::default()
                .with_codepage_candidates(vec![Codepage::Ascii, Codepage::Cp437]),
        );
        assert_eq!(encoder.options().codepage_candidates, vec![Codepage::Cp437]);
    }

    #[test]
    fn test_bold_toggle() {
        let mut toggled = Encoder::default();
        toggled.bold(None).bold(None);
        let mut explicit = Encoder::default();
        explicit.bold(true).bold(false);
        assert_eq!(toggled.encode(), explicit.encode());
    }

    #[test]
    fn test_size_combines_width_and_height() {
        let mut encoder = Encoder::default();
        encoder.width(2).unwrap().height(3).unwrap();
        assert_eq!(
            encoder.encode(),
            vec![0x1B, 0x69, 0x00, 0x01, 0x1B, 0x69, 0x02, 0x01]
        );
    }

    #[test]
    fn test_width_and_height_range() {
        let mut encoder = Encoder::default();
        assert_eq!(
            encoder.width(0).unwrap_err(),
            EncoderError::InvalidWidth("0".into())
        );
        assert_eq!(
            encoder.width(7).unwrap_err(),
            EncoderError::InvalidWidth("7".into())
        );
        assert_eq!(
            encoder.height(7).unwrap_err(),
            EncoderError::InvalidHeight("7".into())
        );
    }

    #[test]
    fn test_cursor_scales_with_width() {
        let mut encoder = Encoder::default();
        encoder.width(2).unwrap().text("abc");
        assert_eq!(encoder.cursor(), 6);
    }

    #[test]
    fn test_cursor_wraps_at_paper_width() {
        let mut encoder = Encoder::new(EncoderOptions::default().with_width(4).with_word_wrap(false));
        encoder.text("abcdef");
        assert_eq!(encoder.cursor(), 2);
    }

    #[test]
    fn test_text_wraps_from_cursor() {
        let mut encoder = Encoder::new(EncoderOptions::default().with_width(10));
        encoder.text("abcdef").text(" ghijk");
        assert_eq!(encoder.encode(), b"abcdef\x0A\x0Dghijk".to_vec());
    }

    #[test]
    fn test_raw_keeps_cursor() {
        let mut encoder = Encoder::default();
        encoder.raw(&[0x1B, 0x40]);
        assert_eq!(encoder.cursor(), 0);
        assert_eq!(encoder.encode(), vec![0x1B, 0x40]);
    }

    #[test]
    fn test_align_not_sent_when_embedded() {
        let mut encoder = embedded(4);
        encoder.align(Alignment::Right).text("ab");
        assert_eq!(encoder.encode(), b"  ab".to_vec());
    }

    #[test]
    fn test_embedded_newline_pads_and_restores() {
        let mut encoder = embedded(4);
        encoder.line("ab");
        assert_eq!(
            encoder.encode(),
            vec![
                b'a', b'b', b' ', b' ', 0x0A, 0x0D, 0x1B, 0x46, 0x1B, 0x2D, 0x00, 0x1B, 0x35,
                0x1B, 0x1D, 0x74, 0x00
            ]
        );
    }

    #[test]
    fn test_embedded_rejects_cut_and_pulse() {
        let mut encoder = embedded(10);
        assert_eq!(
            encoder.cut(CutType::Full).unwrap_err(),
            EncoderError::UnsupportedInEmbeddedContext("cut")
        );
        assert_eq!(
            encoder.pulse(PulseOptions::default()).unwrap_err(),
            EncoderError::UnsupportedInEmbeddedContext("pulse")
        );
    }

    #[test]
    fn test_embedded_needs_width() {
        let mut encoder = Encoder::new(EncoderOptions::default().with_embedded(true));
        assert!(encoder.cut(CutType::Full).is_ok());
    }

    #[test]
    fn test_rule() {
        let mut encoder = Encoder::default();
        encoder
            .rule(RuleOptions {
                style: LineStyle::Double,
                width: Some(3),
            })
            .unwrap();
        assert_eq!(
            encoder.encode(),
            vec![
                0x1B, 0x1D, 0x74, 0x01, 0xCD, 0xCD, 0xCD, 0x1B, 0x1D, 0x74, 0x00, 0x0A, 0x0D
            ]
        );
    }

    #[test]
    fn test_pulse_defaults() {
        let mut encoder = Encoder::default();
        encoder.pulse(PulseOptions::default()).unwrap();
        assert_eq!(encoder.encode(), vec![0x1B, 0x07, 20, 20, 0x07]);
    }

    #[test]
    fn test_encode_resets() {
        let mut encoder = Encoder::default();
        encoder.bold(true).codepage("cp858").unwrap().text("x");
        assert!(!encoder.encode().is_empty());
        assert!(encoder.encode().is_empty());
        assert_eq!(encoder.state(), &StyleState::default());
    }
}
