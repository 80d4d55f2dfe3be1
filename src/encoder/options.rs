//! Construction options for [`Encoder`](super::Encoder).
//!
//! Options deserialize from the same camelCase keys a print job file uses:
//!
//! ```
//! use starline::encoder::EncoderOptions;
//!
//! let options: EncoderOptions =
//!     serde_json::from_str(r#"{"width": 42, "wordWrap": false}"#).unwrap();
//! assert_eq!(options.width, Some(42));
//! assert!(!options.word_wrap);
//! assert!(!options.embedded);
//! ```

use serde::{Deserialize, Serialize};

use crate::codepage::{Codepage, CodepageMapping};
use crate::printer::PrinterConfig;

/// Code pages tried, in order, when the code page is `auto`.
pub const DEFAULT_CANDIDATES: [Codepage; 11] = [
    Codepage::Cp437,
    Codepage::Cp858,
    Codepage::Cp860,
    Codepage::Cp861,
    Codepage::Cp863,
    Codepage::Cp865,
    Codepage::Cp852,
    Codepage::Cp857,
    Codepage::Cp855,
    Codepage::Cp866,
    Codepage::Cp869,
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EncoderOptions {
    /// Paper width in columns. `None` disables wrapping and padding.
    pub width: Option<usize>,
    /// Nested context inside a table cell or box. Needs `width`.
    pub embedded: bool,
    /// Wrap text at `width`.
    pub word_wrap: bool,
    /// Printer table ids for each code page.
    pub codepage_mapping: CodepageMapping,
    /// Auto mode candidates, in priority order.
    pub codepage_candidates: Vec<Codepage>,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            width: None,
            embedded: false,
            word_wrap: true,
            codepage_mapping: CodepageMapping::default(),
            codepage_candidates: DEFAULT_CANDIDATES.to_vec(),
        }
    }
}

impl EncoderOptions {
    /// Options sized for a printer preset.
    pub fn for_printer(config: &PrinterConfig) -> Self {
        Self::default().with_width(config.columns)
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_embedded(mut self, embedded: bool) -> Self {
        self.embedded = embedded;
        self
    }

    pub fn with_word_wrap(mut self, word_wrap: bool) -> Self {
        self.word_wrap = word_wrap;
        self
    }

    pub fn with_codepage_mapping(mut self, mapping: CodepageMapping) -> Self {
        self.codepage_mapping = mapping;
        self
    }

    pub fn with_codepage_candidates(mut self, candidates: Vec<Codepage>) -> Self {
        self.codepage_candidates = candidates;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codepage::MappingProfile;

    #[test]
    fn test_defaults() {
        let options = EncoderOptions::default();
        assert_eq!(options.width, None);
        assert!(options.word_wrap);
        assert_eq!(
            options.codepage_mapping,
            CodepageMapping::Profile(MappingProfile::Star)
        );
        assert_eq!(options.codepage_candidates.len(), 11);
    }

    #[test]
    fn test_for_printer() {
        let options = EncoderOptions::for_printer(&PrinterConfig::SM_L200);
        assert_eq!(options.width, Some(32));
    }

    #[test]
    fn test_deserialize_full() {
        let options: EncoderOptions = serde_json::from_str(
            r#"{
                "width": 48,
                "embedded": true,
                "codepageMapping": {"cp437": 0},
                "codepageCandidates": ["cp437", "cp866"]
            }"#,
        )
        .unwrap();
        assert_eq!(options.width, Some(48));
        assert!(options.embedded);
        assert_eq!(options.codepage_mapping.id(Codepage::Cp437), Some(0));
        assert_eq!(
            options.codepage_candidates,
            vec![Codepage::Cp437, Codepage::Cp866]
        );
    }

    #[test]
    fn test_deserialize_rejects_unknown_candidate() {
        let result =
            serde_json::from_str::<EncoderOptions>(r#"{"codepageCandidates": ["klingon"]}"#);
        assert!(result.is_err());
    }
}
