//! # Starline - Star Line Mode Command Encoder
//!
//! Starline turns print operations into the byte stream Star Micronics
//! receipt printers understand in Star Line mode. It provides:
//!
//! - **Protocol implementation**: Star Line mode command builders
//! - **Encoder**: Chainable builder with style tracking, word wrap, tables and boxes
//! - **Code pages**: Fixed and automatic single-byte code page encoding
//! - **Images**: Dithering and 24-dot band packing
//! - **Print jobs**: Declarative JSON jobs
//!
//! Sending the bytes to a printer is left to the caller.
//!
//! ## Quick Start
//!
//! ```
//! use starline::{Encoder, EncoderOptions, PrinterConfig};
//! use starline::encoder::{CellContent, CutType, QrOptions, TableColumn};
//! use starline::protocol::text::Alignment;
//!
//! let mut encoder = Encoder::new(EncoderOptions::for_printer(&PrinterConfig::TSP650II));
//! encoder
//!     .initialize()
//!     .codepage("auto")?
//!     .align(Alignment::Center)
//!     .width(2)?
//!     .line("Café Ñandú")
//!     .width(1)?
//!     .align(Alignment::Left)
//!     .table(
//!         &[TableColumn::new(36), TableColumn::new(12).align(Alignment::Right)],
//!         vec![
//!             vec!["Espresso".into(), "4.50".into()],
//!             vec![
//!                 CellContent::composed(|cell| {
//!                     cell.bold(true).text("Total").bold(false);
//!                     Ok(())
//!                 }),
//!                 "4.50".into(),
//!             ],
//!         ],
//!     )?
//!     .qrcode("https://example.com", QrOptions::default())?
//!     .cut(CutType::Partial)?;
//!
//! let bytes = encoder.encode();
//! assert!(!bytes.is_empty());
//! # Ok::<(), starline::EncoderError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`encoder`] | Chainable encoder, tables and boxes |
//! | [`protocol`] | Star Line mode command builders |
//! | [`codepage`] | Character encoding and printer code page ids |
//! | [`wrap`] | Line wrapping |
//! | [`render`] | Dithering and band packing |
//! | [`json_api`] | JSON print jobs |
//! | [`printer`] | Printer presets |
//! | [`error`] | Error types |

pub mod codepage;
pub mod encoder;
pub mod error;
pub mod json_api;
pub mod printer;
pub mod protocol;
pub mod render;
pub mod wrap;

// Re-exports for convenience
pub use encoder::{Encoder, EncoderOptions};
pub use error::EncoderError;
pub use printer::PrinterConfig;
