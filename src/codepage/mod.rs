//! # Character Encoding
//!
//! Converts Unicode strings into the single-byte character sets the printer
//! understands.
//!
//! ## Fixed Code Page
//!
//! [`encode`] maps each character to its byte in one code page. Characters
//! the page cannot represent become `?`; the printer has no notion of
//! invalid text, so this never fails.
//!
//! ## Automatic Code Page
//!
//! [`auto_encode`] splits a string into maximal runs that one candidate page
//! can encode, so mixed text such as `"Ελλάδα / Россия"` prints correctly by
//! switching tables between runs.
//!
//! ```
//! use starline::codepage::{auto_encode, Codepage};
//!
//! let segments = auto_encode("Año Россия", &[Codepage::Cp437, Codepage::Cp866]);
//! assert_eq!(segments.len(), 2);
//! assert_eq!(segments[0].codepage, Codepage::Cp437);
//! assert_eq!(segments[1].codepage, Codepage::Cp866);
//! ```
//!
//! ## Backends
//!
//! | Code pages | Source |
//! |------------|--------|
//! | cp437 | hand-written match table ([`cp437`]) |
//! | cp737, cp85x, cp86x (except 866), cp869 | static tables ([`tables`]) |
//! | cp866, cp874, cp1250-1252 | `encoding_rs` |
//! | ascii, iso88591 | code point range check |

pub mod cp437;
pub mod mapping;
pub mod tables;

use std::fmt;
use std::str::FromStr;

use encoding_rs::{EncoderResult, Encoding};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::EncoderError;

pub use mapping::{CodepageMapping, MappingProfile};

/// Byte printed in place of characters the code page cannot represent.
pub const PLACEHOLDER: u8 = b'?';

/// A character set the encoder can produce bytes for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Codepage {
    Ascii,
    Iso8859_1,
    Cp437,
    Cp737,
    Cp852,
    Cp855,
    Cp857,
    Cp858,
    Cp860,
    Cp861,
    Cp862,
    Cp863,
    Cp865,
    Cp866,
    Cp869,
    Cp874,
    Cp1250,
    Cp1251,
    Cp1252,
}

impl Codepage {
    /// Every code page the encoder knows.
    pub const ALL: [Codepage; 19] = [
        Codepage::Ascii,
        Codepage::Iso8859_1,
        Codepage::Cp437,
        Codepage::Cp737,
        Codepage::Cp852,
        Codepage::Cp855,
        Codepage::Cp857,
        Codepage::Cp858,
        Codepage::Cp860,
        Codepage::Cp861,
        Codepage::Cp862,
        Codepage::Cp863,
        Codepage::Cp865,
        Codepage::Cp866,
        Codepage::Cp869,
        Codepage::Cp874,
        Codepage::Cp1250,
        Codepage::Cp1251,
        Codepage::Cp1252,
    ];

    /// Lowercase name as used in print jobs (`"cp437"`, `"iso88591"`, ...).
    pub fn name(self) -> &'static str {
        match self {
            Codepage::Ascii => "ascii",
            Codepage::Iso8859_1 => "iso88591",
            Codepage::Cp437 => "cp437",
            Codepage::Cp737 => "cp737",
            Codepage::Cp852 => "cp852",
            Codepage::Cp855 => "cp855",
            Codepage::Cp857 => "cp857",
            Codepage::Cp858 => "cp858",
            Codepage::Cp860 => "cp860",
            Codepage::Cp861 => "cp861",
            Codepage::Cp862 => "cp862",
            Codepage::Cp863 => "cp863",
            Codepage::Cp865 => "cp865",
            Codepage::Cp866 => "cp866",
            Codepage::Cp869 => "cp869",
            Codepage::Cp874 => "cp874",
            Codepage::Cp1250 => "cp1250",
            Codepage::Cp1251 => "cp1251",
            Codepage::Cp1252 => "cp1252",
        }
    }

    /// Encode one character, or `None` if this page has no byte for it.
    pub fn encode_char(self, ch: char) -> Option<u8> {
        match self {
            Codepage::Ascii => ch.is_ascii().then_some(ch as u8),
            Codepage::Iso8859_1 => u8::try_from(u32::from(ch)).ok(),
            Codepage::Cp437 => cp437::encode_char(ch),
            Codepage::Cp737 => table_lookup(&tables::CP737, ch),
            Codepage::Cp852 => table_lookup(&tables::CP852, ch),
            Codepage::Cp855 => table_lookup(&tables::CP855, ch),
            Codepage::Cp857 => table_lookup(&tables::CP857, ch),
            Codepage::Cp858 => table_lookup(&tables::CP858, ch),
            Codepage::Cp860 => table_lookup(&tables::CP860, ch),
            Codepage::Cp861 => table_lookup(&tables::CP861, ch),
            Codepage::Cp862 => table_lookup(&tables::CP862, ch),
            Codepage::Cp863 => table_lookup(&tables::CP863, ch),
            Codepage::Cp865 => table_lookup(&tables::CP865, ch),
            Codepage::Cp869 => table_lookup(&tables::CP869, ch),
            Codepage::Cp866 => whatwg_lookup(encoding_rs::IBM866, ch),
            Codepage::Cp874 => whatwg_lookup(encoding_rs::WINDOWS_874, ch),
            Codepage::Cp1250 => whatwg_lookup(encoding_rs::WINDOWS_1250, ch),
            Codepage::Cp1251 => whatwg_lookup(encoding_rs::WINDOWS_1251, ch),
            Codepage::Cp1252 => whatwg_lookup(encoding_rs::WINDOWS_1252, ch),
        }
    }
}

impl FromStr for Codepage {
    type Err = EncoderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Codepage::ALL
            .into_iter()
            .find(|codepage| codepage.name() == s)
            .ok_or_else(|| EncoderError::UnknownCodepage(s.to_string()))
    }
}

impl TryFrom<String> for Codepage {
    type Error = EncoderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Codepage> for String {
    fn from(value: Codepage) -> Self {
        value.name().to_string()
    }
}

impl fmt::Display for Codepage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Reverse lookup in an upper-half table; ASCII maps to itself.
fn table_lookup(table: &[char; 128], ch: char) -> Option<u8> {
    if ch.is_ascii() {
        return Some(ch as u8);
    }
    if ch == tables::UNDEFINED {
        return None;
    }
    table
        .iter()
        .position(|&c| c == ch)
        .map(|index| 0x80 + index as u8)
}

/// Encode one character through `encoding_rs`, refusing replacements.
fn whatwg_lookup(encoding: &'static Encoding, ch: char) -> Option<u8> {
    let mut source = [0u8; 4];
    let source = ch.encode_utf8(&mut source);
    let mut encoder = encoding.new_encoder();
    let mut out = [0u8; 4];
    let (result, _read, written) =
        encoder.encode_from_utf8_without_replacement(source, &mut out, true);
    match (result, written) {
        (EncoderResult::InputEmpty, 1) => Some(out[0]),
        _ => None,
    }
}

/// Whether the character encoder knows a code page by this name.
pub fn supports(name: &str) -> bool {
    name.parse::<Codepage>().is_ok()
}

/// Encode a string in one code page, substituting [`PLACEHOLDER`] for
/// characters the page cannot represent.
///
/// ## Example
///
/// ```
/// use starline::codepage::{encode, Codepage};
///
/// assert_eq!(encode("héllo", Codepage::Cp437), vec![0x68, 0x82, 0x6C, 0x6C, 0x6F]);
/// assert_eq!(encode("héllo", Codepage::Ascii), b"h?llo".to_vec());
/// ```
pub fn encode(value: &str, codepage: Codepage) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.len());
    for ch in value.chars() {
        match codepage.encode_char(ch) {
            Some(byte) => out.push(byte),
            None => {
                warn!(
                    "{}: unmapped character '{}' (U+{:04X}), replacing with '?'",
                    codepage, ch, ch as u32
                );
                out.push(PLACEHOLDER);
            }
        }
    }
    out
}

/// A maximal run of text encoded in one code page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub codepage: Codepage,
    pub bytes: Vec<u8>,
}

/// Split a string into runs, each encodable by one of `candidates`.
///
/// Candidates are tried in order. The current page is kept for as long as it
/// can encode the next character, so ASCII never causes a switch. A character
/// no candidate can encode is substituted in the current page.
///
/// Returns an empty list for an empty string or an empty candidate list.
pub fn auto_encode(value: &str, candidates: &[Codepage]) -> Vec<Segment> {
    let Some(&first) = candidates.first() else {
        return Vec::new();
    };

    let mut segments: Vec<Segment> = Vec::new();

    for ch in value.chars() {
        let current = segments.last().map(|segment| segment.codepage);

        let (codepage, byte) = match current.and_then(|cp| cp.encode_char(ch).map(|b| (cp, b))) {
            Some(hit) => hit,
            None => candidates
                .iter()
                .find_map(|&cp| cp.encode_char(ch).map(|b| (cp, b)))
                .unwrap_or_else(|| {
                    warn!(
                        "auto: no candidate codepage encodes '{}' (U+{:04X}), replacing with '?'",
                        ch, ch as u32
                    );
                    (current.unwrap_or(first), PLACEHOLDER)
                }),
        };

        match segments.last_mut() {
            Some(segment) if segment.codepage == codepage => segment.bytes.push(byte),
            _ => {
                debug!(%codepage, "auto: switching codepage");
                segments.push(Segment {
                    codepage,
                    bytes: vec![byte],
                });
            }
        }
    }

    segments
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for codepage in Codepage::ALL {
            assert_eq!(codepage.name().parse::<Codepage>(), Ok(codepage));
        }
    }

    #[test]
    fn test_unknown_name() {
        assert!(!supports("cp999"));
        assert_eq!(
            "cp999".parse::<Codepage>(),
            Err(EncoderError::UnknownCodepage("cp999".into()))
        );
    }

    #[test]
    fn test_ascii_everywhere() {
        for codepage in Codepage::ALL {
            assert_eq!(encode("hello", codepage), b"hello".to_vec(), "{codepage}");
        }
    }

    #[test]
    fn test_table_pages() {
        assert_eq!(encode("€", Codepage::Cp858), vec![0xD5]);
        assert_eq!(encode("Ł", Codepage::Cp852), vec![0x9D]);
        assert_eq!(encode("ã", Codepage::Cp860), vec![0x84]);
        assert_eq!(encode("Þ", Codepage::Cp861), vec![0x8D]);
        assert_eq!(encode("א", Codepage::Cp862), vec![0x80]);
        assert_eq!(encode("ø", Codepage::Cp865), vec![0x9B]);
        assert_eq!(encode("Ω", Codepage::Cp737), vec![0x97]);
    }

    #[test]
    fn test_undefined_slots_never_match() {
        // 0xD5 is undefined in CP857.
        assert_eq!(encode("\u{FFFD}", Codepage::Cp857), vec![PLACEHOLDER]);
    }

    #[test]
    fn test_encoding_rs_pages() {
        assert_eq!(encode("Привет", Codepage::Cp866), vec![0x8F, 0xE0, 0xA8, 0xA2, 0xA5, 0xE2]);
        assert_eq!(encode("€", Codepage::Cp1252), vec![0x80]);
        assert_eq!(encode("ő", Codepage::Cp1250), vec![0xF5]);
        assert_eq!(encode("Ж", Codepage::Cp1251), vec![0xC6]);
    }

    #[test]
    fn test_iso8859_1() {
        assert_eq!(encode("ÿé", Codepage::Iso8859_1), vec![0xFF, 0xE9]);
        assert_eq!(encode("€", Codepage::Iso8859_1), vec![PLACEHOLDER]);
    }

    #[test]
    fn test_unencodable_is_substituted() {
        assert_eq!(encode("a★b", Codepage::Cp437), b"a?b".to_vec());
    }

    #[test]
    fn test_auto_encode_single_run() {
        let segments = auto_encode("hello", &[Codepage::Cp437, Codepage::Cp858]);
        assert_eq!(
            segments,
            vec![Segment {
                codepage: Codepage::Cp437,
                bytes: b"hello".to_vec()
            }]
        );
    }

    #[test]
    fn test_auto_encode_switches_and_stays() {
        // "€" forces cp858; the ASCII after it stays in cp858.
        let segments = auto_encode("a€b", &[Codepage::Cp437, Codepage::Cp858]);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].codepage, Codepage::Cp437);
        assert_eq!(segments[0].bytes, b"a".to_vec());
        assert_eq!(segments[1].codepage, Codepage::Cp858);
        assert_eq!(segments[1].bytes, vec![0xD5, b'b']);
    }

    #[test]
    fn test_auto_encode_no_candidate() {
        let segments = auto_encode("a★", &[Codepage::Cp437]);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].bytes, b"a?".to_vec());
    }

    #[test]
    fn test_auto_encode_empty() {
        assert!(auto_encode("", &[Codepage::Cp437]).is_empty());
        assert!(auto_encode("abc", &[]).is_empty());
    }
}
