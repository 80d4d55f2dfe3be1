//! # Printer Module
//!
//! Paper and printer presets.
//!
//! ## Modules
//!
//! - [`config`]: Printer hardware specifications

pub mod config;

pub use config::PrinterConfig;
