//! # Printer Configuration
//!
//! Paper presets for Star Line mode printers. The encoder itself only cares
//! about the number of Font A columns; dots and resolution are kept so image
//! sizes can be derived from the same preset.
//!
//! ## Supported Printers
//!
//! | Model | Paper | Width (dots) | Columns (Font A) |
//! |-------|-------|--------------|------------------|
//! | TSP650II | 80mm | 576 | 48 |
//! | TSP100 (58mm) | 58mm | 384 | 32 |
//! | mC-Print3 | 80mm | 576 | 48 |
//! | SM-L200 | 58mm | 384 | 32 |
//!
//! ## Usage
//!
//! ```
//! use starline::printer::PrinterConfig;
//!
//! let config = PrinterConfig::TSP650II;
//! assert_eq!(config.columns, 48);
//! assert_eq!(config.columns, (config.width_dots / 12) as usize);
//! ```

/// Font A glyphs are 12 dots wide.
const FONT_A_DOTS: u16 = 12;

/// # Printer Configuration
///
/// ## Physical Properties
///
/// - **width_dots**: Maximum printable width in dots
/// - **dpi**: Resolution in dots per inch
/// - **columns**: Characters per line in Font A at 1x width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrinterConfig {
    /// Short name used on the command line, e.g. `tsp650ii`
    pub key: &'static str,

    /// Printer model name
    pub name: &'static str,

    /// Maximum print width in dots (pixels)
    pub width_dots: u16,

    /// Resolution in dots per inch
    pub dpi: u16,

    /// Font A characters per line
    pub columns: usize,
}

impl PrinterConfig {
    /// # Star TSP650II Configuration
    ///
    /// 80mm paper, 72mm (576 dots) printable.
    ///
    /// ```text
    /// ├── 4mm ──┼────── 72mm printable ──────┼── 4mm ──┤
    /// │ margin  │         576 dots           │ margin  │
    /// ```
    pub const TSP650II: Self = Self::new("tsp650ii", "Star TSP650II", 576, 203);

    /// Star TSP100 with the 58mm paper guide fitted.
    pub const TSP100_58MM: Self = Self::new("tsp100-58mm", "Star TSP100 (58mm)", 384, 203);

    /// Star mC-Print3, 80mm.
    pub const MC_PRINT3: Self = Self::new("mc-print3", "Star mC-Print3", 576, 203);

    /// Star SM-L200 mobile printer, 58mm.
    pub const SM_L200: Self = Self::new("sm-l200", "Star SM-L200", 384, 203);

    const fn new(key: &'static str, name: &'static str, width_dots: u16, dpi: u16) -> Self {
        Self {
            key,
            name,
            width_dots,
            dpi,
            columns: (width_dots / FONT_A_DOTS) as usize,
        }
    }

    /// All built-in presets.
    pub fn built_in() -> [Self; 4] {
        [Self::TSP650II, Self::TSP100_58MM, Self::MC_PRINT3, Self::SM_L200]
    }

    /// Look up a preset by its [`key`](Self::key), case insensitive.
    pub fn parse(s: &str) -> Result<Self, String> {
        Self::built_in()
            .into_iter()
            .find(|preset| preset.key.eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let keys: Vec<&str> = Self::built_in().iter().map(|p| p.key).collect();
                format!("Unknown printer '{}'. Use one of: {}", s, keys.join(", "))
            })
    }

    /// Calculate dots per millimeter
    #[inline]
    pub fn dots_per_mm(&self) -> f32 {
        self.dpi as f32 / 25.4
    }

    /// Calculate print width in millimeters
    #[inline]
    pub fn width_mm(&self) -> f32 {
        self.width_dots as f32 / self.dots_per_mm()
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::TSP650II
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tsp650ii_dimensions() {
        let config = PrinterConfig::TSP650II;
        assert_eq!(config.width_dots, 576);
        assert_eq!(config.columns, 48);
    }

    #[test]
    fn test_58mm_columns() {
        assert_eq!(PrinterConfig::TSP100_58MM.columns, 32);
        assert_eq!(PrinterConfig::SM_L200.columns, 32);
    }

    #[test]
    fn test_width_mm() {
        let width = PrinterConfig::TSP650II.width_mm();
        // 576 dots / 8 dpmm = 72mm
        assert!((width - 72.0).abs() < 1.0);
    }

    #[test]
    fn test_parse() {
        assert_eq!(PrinterConfig::parse("TSP650II"), Ok(PrinterConfig::TSP650II));
        assert_eq!(PrinterConfig::parse("sm-l200"), Ok(PrinterConfig::SM_L200));
        assert!(PrinterConfig::parse("tm-t88").is_err());
    }

    #[test]
    fn test_every_preset_parses_by_key() {
        for preset in PrinterConfig::built_in() {
            assert_eq!(PrinterConfig::parse(preset.key), Ok(preset));
            assert_eq!(preset.columns, (preset.width_dots / 12) as usize);
        }
    }

    #[test]
    fn test_unknown_printer_lists_keys() {
        let error = PrinterConfig::parse("tm-t88").unwrap_err();
        assert!(error.contains("tsp650ii, tsp100-58mm, mc-print3, sm-l200"));
    }

    #[test]
    fn test_58mm_width_mm() {
        let width = PrinterConfig::SM_L200.width_mm();
        // 384 dots / 8 dpmm = 48mm
        assert!((width - 48.0).abs() < 1.0);
    }

    #[test]
    fn test_default_is_tsp650ii() {
        assert_eq!(PrinterConfig::default(), PrinterConfig::TSP650II);
    }
}
