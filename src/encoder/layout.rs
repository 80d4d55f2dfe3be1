//! # Tables and Boxes
//!
//! Both layouts render every cell into a list of per-line byte fragments of
//! exactly the cell width, then interleave those fragments line by line.
//!
//! ```text
//! row:   ┌ col 0 (width 6) ┐ ┌ col 1 (width 4, right) ┐
//!        "Coffee with milk"   "3.50"
//!
//! lines: "Coffee"  "3.50"        <- line 0
//!        "with  "  "    "        <- line 1, col 1 padded (vertical align top)
//!        "milk  "  "    "        <- line 2
//! ```
//!
//! A cell is either literal text, which is wrapped and padded here, or a
//! closure that draws into a nested embedded [`Encoder`] of the cell width.
//! The nested output is split at every `LF CR` to recover its lines.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Encoder, EncoderOptions, LineStyle, spaces};
use crate::codepage::cp437;
use crate::error::Result;
use crate::protocol::commands::LINE_TERMINATOR;
use crate::protocol::text::{self, Alignment};
use crate::wrap;

/// Contents of a table cell or box.
pub enum CellContent<'a> {
    /// Wrapped to the cell width and padded.
    Text(String),
    /// Draws into a nested encoder of the cell width.
    Composed(Box<dyn FnOnce(&mut Encoder) -> Result<()> + 'a>),
}

impl<'a> CellContent<'a> {
    pub fn text(value: impl Into<String>) -> Self {
        CellContent::Text(value.into())
    }

    pub fn composed(render: impl FnOnce(&mut Encoder) -> Result<()> + 'a) -> Self {
        CellContent::Composed(Box::new(render))
    }
}

impl From<&str> for CellContent<'_> {
    fn from(value: &str) -> Self {
        CellContent::Text(value.to_string())
    }
}

impl From<String> for CellContent<'_> {
    fn from(value: String) -> Self {
        CellContent::Text(value)
    }
}

impl std::fmt::Debug for CellContent<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellContent::Text(value) => f.debug_tuple("Text").field(value).finish(),
            CellContent::Composed(_) => f.write_str("Composed(..)"),
        }
    }
}

/// Where short cells sit within a taller row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    #[default]
    Top,
    Bottom,
}

/// One table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumn {
    pub width: usize,
    #[serde(default)]
    pub margin_left: usize,
    #[serde(default)]
    pub margin_right: usize,
    #[serde(default)]
    pub align: Alignment,
    #[serde(default)]
    pub vertical_align: VerticalAlign,
}

impl TableColumn {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            margin_left: 0,
            margin_right: 0,
            align: Alignment::Left,
            vertical_align: VerticalAlign::Top,
        }
    }

    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    pub fn vertical_align(mut self, vertical_align: VerticalAlign) -> Self {
        self.vertical_align = vertical_align;
        self
    }

    pub fn margins(mut self, left: usize, right: usize) -> Self {
        self.margin_left = left;
        self.margin_right = right;
        self
    }
}

/// Box border glyphs.
pub type BoxStyle = LineStyle;

/// Options for [`Encoder::text_box`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoxOptions {
    pub style: BoxStyle,
    /// Outer width including borders; defaults to the paper width.
    pub width: Option<usize>,
    pub margin_left: usize,
    pub margin_right: usize,
    pub padding_left: usize,
    pub padding_right: usize,
    pub align: Alignment,
}

struct BorderGlyphs {
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
    horizontal: char,
    vertical: char,
}

impl BoxStyle {
    fn glyphs(self) -> BorderGlyphs {
        match self {
            LineStyle::Single => BorderGlyphs {
                top_left: '┌',
                top_right: '┐',
                bottom_left: '└',
                bottom_right: '┘',
                horizontal: '─',
                vertical: '│',
            },
            LineStyle::Double => BorderGlyphs {
                top_left: '╔',
                top_right: '╗',
                bottom_left: '╚',
                bottom_right: '╝',
                horizontal: '═',
                vertical: '║',
            },
        }
    }
}

/// CP437 bytes for a border string.
fn border(glyphs: &[char]) -> Vec<u8> {
    glyphs
        .iter()
        .filter_map(|&glyph| cp437::encode_char(glyph))
        .collect()
}

/// Split nested output into printed lines at each `LF CR`.
fn split_lines(bytes: &[u8]) -> Vec<Vec<u8>> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i + 1 < bytes.len() {
        if bytes[i..i + 2] == LINE_TERMINATOR {
            lines.push(bytes[start..i].to_vec());
            i += 2;
            start = i;
        } else {
            i += 1;
        }
    }
    lines.push(bytes[start..].to_vec());
    lines
}

impl Encoder {
    /// Render one cell to per-line fragments of `width` columns.
    fn render_cell(
        &mut self,
        width: usize,
        align: Alignment,
        content: CellContent<'_>,
    ) -> Result<Vec<Vec<u8>>> {
        match content {
            CellContent::Text(value) => Ok(wrap::wrap(&value, Some(width), 0)
                .into_iter()
                .map(|line| {
                    let line = line.trim_end();
                    let indent = width.saturating_sub(line.chars().count());
                    // Center matches the embedded flush: odd space in front
                    let (front, back) = match align {
                        Alignment::Left => (0, indent),
                        Alignment::Right => (indent, 0),
                        Alignment::Center => (indent - indent / 2, indent / 2),
                    };
                    let padded = format!("{}{line}{}", " ".repeat(front), " ".repeat(back));
                    self.encode_text(&padded)
                })
                .collect()),
            CellContent::Composed(render) => {
                let mut cell = Encoder::new(EncoderOptions {
                    width: Some(width),
                    embedded: true,
                    word_wrap: self.options.word_wrap,
                    codepage_mapping: self.options.codepage_mapping.clone(),
                    codepage_candidates: self.options.codepage_candidates.clone(),
                });
                cell.codepage = self.codepage;
                cell.state.codepage = self.state.codepage;
                cell.state.align = align;

                render(&mut cell)?;

                let line_open = cell.queue.line_open;
                let mut lines = split_lines(&cell.encode());
                if !line_open {
                    lines.pop();
                }
                debug!(width, lines = lines.len(), "rendered nested cell");
                Ok(lines)
            }
        }
    }

    /// Print rows of cells in fixed-width columns.
    ///
    /// Each row is as tall as its tallest cell; shorter cells get blank lines
    /// below them, or above with [`VerticalAlign::Bottom`]. Missing cells
    /// print blank.
    ///
    /// ## Example
    ///
    /// ```
    /// use starline::encoder::{CellContent, Encoder, TableColumn};
    /// use starline::protocol::text::Alignment;
    ///
    /// let mut encoder = Encoder::default();
    /// encoder.table(
    ///     &[TableColumn::new(6), TableColumn::new(4).align(Alignment::Right)],
    ///     vec![vec!["Tea".into(), "2.00".into()]],
    /// )?;
    /// assert_eq!(encoder.encode(), b"Tea   2.00\x0A\x0D".to_vec());
    /// # Ok::<(), starline::EncoderError>(())
    /// ```
    pub fn table(
        &mut self,
        columns: &[TableColumn],
        rows: Vec<Vec<CellContent<'_>>>,
    ) -> Result<&mut Self> {
        if self.queue.cursor != 0 {
            self.newline();
        }

        for row in rows {
            let mut cells = row.into_iter();
            let mut rendered = Vec::with_capacity(columns.len());
            for column in columns {
                let content = cells.next().unwrap_or_else(|| CellContent::text(""));
                rendered.push(self.render_cell(column.width, column.align, content)?);
            }

            let max_lines = rendered.iter().map(Vec::len).max().unwrap_or(0);
            for (column, lines) in columns.iter().zip(rendered.iter_mut()) {
                let missing = max_lines - lines.len();
                let blank = spaces(column.width);
                match column.vertical_align {
                    VerticalAlign::Top => lines.extend(std::iter::repeat_n(blank, missing)),
                    VerticalAlign::Bottom => {
                        lines.splice(0..0, std::iter::repeat_n(blank, missing));
                    }
                }
            }

            for index in 0..max_lines {
                for (column, lines) in columns.iter().zip(rendered.iter_mut()) {
                    self.queue_columns(spaces(column.margin_left), column.margin_left);
                    self.queue_columns(std::mem::take(&mut lines[index]), column.width);
                    self.queue_columns(spaces(column.margin_right), column.margin_right);
                }
                self.queue.line_open = true;
                self.newline();
            }
        }

        Ok(self)
    }

    /// Draw a border around text or nested content.
    ///
    /// Named `text_box` since `box` is a keyword. Borders are CP437 box
    /// drawing characters, so the printer mapping must have an id for cp437.
    pub fn text_box(&mut self, options: BoxOptions, content: CellContent<'_>) -> Result<&mut Self> {
        let cp437_id = self.cp437_id()?;
        // Room for at least the two corners
        let width = options
            .width
            .or(self.options.width)
            .unwrap_or(super::FALLBACK_WIDTH)
            .max(2);
        let fill = width - 2;
        let glyphs = options.style.glyphs();

        if self.queue.cursor != 0 {
            self.newline();
        }

        self.restore_state();
        self.queue.push(text::codepage(cp437_id));
        self.queue_columns(spaces(options.margin_left), options.margin_left);
        let mut top = vec![glyphs.top_left];
        top.extend(std::iter::repeat_n(glyphs.horizontal, fill));
        top.push(glyphs.top_right);
        self.queue_columns(border(&top), width);
        self.queue_columns(spaces(options.margin_right), options.margin_right);
        self.queue.line_open = true;
        self.newline();

        let inner = fill.saturating_sub(options.padding_left + options.padding_right);
        let lines = self.render_cell(inner, options.align, content)?;

        for line in lines {
            self.queue_columns(spaces(options.margin_left), options.margin_left);
            self.queue_columns(border(&[glyphs.vertical]), 1);
            self.queue_columns(spaces(options.padding_left), options.padding_left);
            self.queue.push(text::codepage(self.state.codepage));
            self.queue_columns(line, inner);
            self.restore_state();
            self.queue.push(text::codepage(cp437_id));
            self.queue_columns(spaces(options.padding_right), options.padding_right);
            self.queue_columns(border(&[glyphs.vertical]), 1);
            self.queue_columns(spaces(options.margin_right), options.margin_right);
            self.queue.line_open = true;
            self.newline();
        }

        self.queue_columns(spaces(options.margin_left), options.margin_left);
        let mut bottom = vec![glyphs.bottom_left];
        bottom.extend(std::iter::repeat_n(glyphs.horizontal, fill));
        bottom.push(glyphs.bottom_right);
        self.queue_columns(border(&bottom), width);
        self.queue_columns(spaces(options.margin_right), options.margin_right);
        self.restore_state();
        self.queue.line_open = true;
        self.newline();

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::CutType;
    use crate::error::EncoderError;

    #[test]
    fn test_split_lines() {
        assert_eq!(
            split_lines(b"ab\x0A\x0Dcd\x0A\x0D"),
            vec![b"ab".to_vec(), b"cd".to_vec(), Vec::new()]
        );
        assert_eq!(split_lines(b"ab"), vec![b"ab".to_vec()]);
        assert_eq!(split_lines(b"a\x0Ab"), vec![b"a\x0Ab".to_vec()]);
        assert_eq!(split_lines(b""), vec![Vec::<u8>::new()]);
    }

    #[test]
    fn test_render_text_cell_pads() {
        let mut encoder = Encoder::default();
        let left = encoder
            .render_cell(5, Alignment::Left, "ab".into())
            .unwrap();
        let right = encoder
            .render_cell(5, Alignment::Right, "ab".into())
            .unwrap();
        assert_eq!(left, vec![b"ab   ".to_vec()]);
        assert_eq!(right, vec![b"   ab".to_vec()]);
    }

    #[test]
    fn test_render_text_cell_centers_like_composed_cell() {
        let mut encoder = Encoder::default();
        let text = encoder
            .render_cell(5, Alignment::Center, "ab".into())
            .unwrap();
        let composed = encoder
            .render_cell(
                5,
                Alignment::Center,
                CellContent::composed(|cell| {
                    cell.text("ab");
                    Ok(())
                }),
            )
            .unwrap();
        assert_eq!(text, vec![b"  ab ".to_vec()]);
        assert_eq!(text, composed);
    }

    #[test]
    fn test_render_text_cell_wraps() {
        let mut encoder = Encoder::default();
        let lines = encoder
            .render_cell(4, Alignment::Left, "ab cd".into())
            .unwrap();
        assert_eq!(lines, vec![b"ab  ".to_vec(), b"cd  ".to_vec()]);
    }

    #[test]
    fn test_render_composed_cell() {
        let mut encoder = Encoder::default();
        let lines = encoder
            .render_cell(
                4,
                Alignment::Right,
                CellContent::composed(|cell| {
                    cell.text("ab");
                    Ok(())
                }),
            )
            .unwrap();
        assert_eq!(lines, vec![b"  ab".to_vec()]);
    }

    #[test]
    fn test_render_composed_cell_drops_closed_last_line() {
        let mut encoder = Encoder::default();
        let lines = encoder
            .render_cell(
                3,
                Alignment::Left,
                CellContent::composed(|cell| {
                    cell.line("a").line("b");
                    Ok(())
                }),
            )
            .unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], b"a  ".to_vec());
        assert!(lines[1].ends_with(b"b  "));
    }

    #[test]
    fn test_text_box_narrower_than_corners() {
        for width in [0, 1, 2] {
            let mut encoder = Encoder::default();
            let options = BoxOptions {
                width: Some(width),
                ..Default::default()
            };
            encoder.text_box(options, "".into()).unwrap();
            let bytes = encoder.encode();
            // restore (11) + cp437 select (4), then the two corners
            assert_eq!(&bytes[15..19], &[0xDA, 0xBF, 0x0A, 0x0D], "width {width}");
        }
    }

    #[test]
    fn test_render_composed_cell_propagates_errors() {
        let mut encoder = Encoder::default();
        let result = encoder.render_cell(
            4,
            Alignment::Left,
            CellContent::composed(|cell| {
                cell.cut(CutType::Full)?;
                Ok(())
            }),
        );
        assert_eq!(
            result.unwrap_err(),
            EncoderError::UnsupportedInEmbeddedContext("cut")
        );
    }
}
