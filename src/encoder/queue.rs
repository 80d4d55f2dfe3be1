//! # Command Queue
//!
//! Bytes for the line being built wait in `pending` until a flush commits
//! them to `buffer`. Keeping the line open lets an embedded context pad it to
//! the cell width once the final cursor column is known.
//!
//! ```text
//! pending: [ESC E] [h e l l o] [ESC F]       cursor = 5, width = 9
//!
//! flush, align left:    [ESC E] [hello] [ESC F] [····]
//! flush, align right:   [····] [ESC E] [hello] [ESC F]
//! flush, align center:  [··] [ESC E] [hello] [ESC F] [··]
//! ```

use std::collections::VecDeque;

use tracing::debug;

use crate::protocol::text::Alignment;

/// Padding applied when a line is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Padding {
    /// Column count the line is padded to.
    pub width: usize,
    pub align: Alignment,
}

/// Pending fragments, the committed byte buffer and the cursor column.
#[derive(Debug, Default)]
pub struct CommandQueue {
    pending: VecDeque<Vec<u8>>,
    buffer: Vec<u8>,
    /// Columns used on the current line, scaled by the width multiplier.
    pub cursor: usize,
    /// Text was queued since the last line terminator.
    pub line_open: bool,
}

impl CommandQueue {
    /// Queue a fragment without moving the cursor.
    pub fn push(&mut self, bytes: Vec<u8>) {
        if !bytes.is_empty() {
            self.pending.push_back(bytes);
        }
    }

    /// Queue a fragment that occupies `columns` printed columns.
    pub fn push_columns(&mut self, bytes: Vec<u8>, columns: usize) {
        self.push(bytes);
        self.cursor += columns;
    }

    /// Append bytes straight to the committed buffer.
    ///
    /// Only valid right after a flush, when nothing is pending.
    pub fn commit(&mut self, bytes: &[u8]) {
        debug_assert!(self.pending.is_empty(), "commit with pending fragments");
        self.buffer.extend_from_slice(bytes);
    }

    /// Move pending fragments into the buffer, padding the line if asked.
    ///
    /// Resets the cursor and closes the line. With nothing pending, no
    /// padding and cursor 0 this is a no-op.
    pub fn flush(&mut self, padding: Option<Padding>) {
        if let Some(Padding { width, align }) = padding {
            let indent = width.saturating_sub(self.cursor);
            match align {
                Alignment::Left => self.pad_back(indent),
                Alignment::Right => self.pad_front(indent),
                Alignment::Center => {
                    let half = indent / 2;
                    let remainder = indent % 2;
                    self.pad_back(half);
                    self.pad_front(half + remainder);
                }
            }
            debug!(width, %align, cursor = self.cursor, indent, "flush: padded line");
        }

        for fragment in self.pending.drain(..) {
            self.buffer.extend(fragment);
        }
        self.cursor = 0;
        self.line_open = false;
    }

    /// Take the committed bytes, leaving the buffer empty.
    pub fn take(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.buffer)
    }

    fn pad_back(&mut self, count: usize) {
        if count > 0 {
            self.pending.push_back(vec![b' '; count]);
        }
    }

    fn pad_front(&mut self, count: usize) {
        if count > 0 {
            self.pending.push_front(vec![b' '; count]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queued(text: &str) -> CommandQueue {
        let mut queue = CommandQueue::default();
        queue.push_columns(text.as_bytes().to_vec(), text.len());
        queue
    }

    fn padded(text: &str, width: usize, align: Alignment) -> Vec<u8> {
        let mut queue = queued(text);
        queue.flush(Some(Padding { width, align }));
        queue.take()
    }

    #[test]
    fn test_flush_without_padding() {
        let mut queue = queued("abc");
        queue.push(vec![0x1B, 0x45]);
        queue.flush(None);
        assert_eq!(queue.take(), b"abc\x1B\x45".to_vec());
        assert_eq!(queue.cursor, 0);
        assert!(!queue.line_open);
    }

    #[test]
    fn test_flush_pads_left_aligned() {
        assert_eq!(padded("ab", 5, Alignment::Left), b"ab   ".to_vec());
    }

    #[test]
    fn test_flush_pads_right_aligned() {
        assert_eq!(padded("ab", 5, Alignment::Right), b"   ab".to_vec());
    }

    #[test]
    fn test_flush_center_puts_odd_space_first() {
        assert_eq!(padded("ab", 5, Alignment::Center), b"  ab ".to_vec());
        assert_eq!(padded("ab", 6, Alignment::Center), b"  ab  ".to_vec());
    }

    #[test]
    fn test_flush_overfull_line_is_not_padded() {
        assert_eq!(padded("abcdef", 4, Alignment::Right), b"abcdef".to_vec());
    }

    #[test]
    fn test_flush_is_idempotent_when_empty() {
        let mut queue = CommandQueue::default();
        queue.flush(None);
        queue.flush(None);
        assert!(queue.take().is_empty());
    }

    #[test]
    fn test_take_empties_buffer() {
        let mut queue = queued("x");
        queue.flush(None);
        assert_eq!(queue.take(), b"x".to_vec());
        assert!(queue.take().is_empty());
    }
}
