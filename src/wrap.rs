//! # Line Wrapping
//!
//! Reflows text into lines of at most `width` columns for the printer.
//!
//! The printer keeps printing where the previous text stopped, so the first
//! line may already be partly filled. [`wrap`] takes that column as `offset`
//! and gives the first line only `width - offset` columns. When even the first
//! word does not fit in the remainder, the result starts with an empty line so
//! the caller breaks before printing anything.
//!
//! Whitespace is kept as written, except the run at which a line is broken.
//! Words longer than a full line are split.
//!
//! ```
//! use starline::wrap::wrap;
//!
//! assert_eq!(wrap("hello world", Some(8), 0), vec!["hello", "world"]);
//! assert_eq!(wrap("hello", Some(8), 5), vec!["", "hello"]);
//! assert_eq!(wrap("a\nb", None, 0), vec!["a", "b"]);
//! ```

use textwrap::WordSeparator;
use textwrap::core::{Fragment, Word, break_words};
use textwrap::wrap_algorithms::wrap_first_fit;

/// Split `text` into printable lines.
///
/// `width` of `None` (or zero) disables wrapping; the text is then only split
/// at `\n`. `offset` is the column the first line starts at.
pub fn wrap(text: &str, width: Option<usize>, offset: usize) -> Vec<String> {
    let Some(width) = width.filter(|&w| w > 0) else {
        return text.split('\n').map(str::to_string).collect();
    };

    let mut lines = Vec::new();
    for (index, paragraph) in text.split('\n').enumerate() {
        let offset = if index == 0 { offset } else { 0 };
        wrap_paragraph(paragraph, width, offset, &mut lines);
    }
    lines
}

fn wrap_paragraph(paragraph: &str, width: usize, offset: usize, lines: &mut Vec<String>) {
    let words: Vec<Word<'_>> = WordSeparator::AsciiSpace.find_words(paragraph).collect();

    let mut first_width = width.saturating_sub(offset);
    if offset > 0 {
        let first_word = words.first().map_or(0.0, |word| word.width());
        if first_width == 0 || first_word > first_width as f64 {
            lines.push(String::new());
            first_width = width;
        }
    }

    if words.is_empty() {
        lines.push(String::new());
        return;
    }

    let words = break_words(words, width);
    let wrapped = wrap_first_fit(&words, &[first_width as f64, width as f64]);
    let last = wrapped.len().saturating_sub(1);

    for (index, line) in wrapped.into_iter().enumerate() {
        let mut out = String::new();
        for (position, word) in line.iter().enumerate() {
            out.push_str(word.word);
            let line_end = position + 1 == line.len();
            if !(line_end && index != last) {
                out.push_str(word.whitespace);
            }
        }
        lines.push(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fits_on_one_line() {
        assert_eq!(wrap("hello", Some(10), 0), vec!["hello"]);
    }

    #[test]
    fn test_breaks_at_spaces() {
        assert_eq!(
            wrap("the quick brown fox", Some(10), 0),
            vec!["the quick", "brown fox"]
        );
    }

    #[test]
    fn test_keeps_inner_and_trailing_whitespace() {
        assert_eq!(wrap("a  b ", Some(10), 0), vec!["a  b "]);
        assert_eq!(wrap("  indented", Some(20), 0), vec!["  indented"]);
    }

    #[test]
    fn test_breaks_long_words() {
        assert_eq!(wrap("abcdefghij", Some(4), 0), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_offset_shortens_first_line() {
        assert_eq!(wrap("ab cd", Some(6), 3), vec!["ab", "cd"]);
    }

    #[test]
    fn test_offset_pushes_first_word_down() {
        assert_eq!(wrap("abcd ef", Some(6), 3), vec!["", "abcd", "ef"]);
        assert_eq!(wrap("x", Some(6), 6), vec!["", "x"]);
    }

    #[test]
    fn test_newlines_start_new_lines() {
        assert_eq!(wrap("ab\n\ncd", Some(10), 0), vec!["ab", "", "cd"]);
    }

    #[test]
    fn test_no_width() {
        assert_eq!(wrap("one two", None, 3), vec!["one two"]);
        assert_eq!(wrap("one\ntwo", Some(0), 0), vec!["one", "two"]);
    }

    #[test]
    fn test_empty() {
        assert_eq!(wrap("", Some(10), 0), vec![""]);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        assert_eq!(wrap("héllo wörld", Some(5), 0), vec!["héllo", "wörld"]);
    }
}
