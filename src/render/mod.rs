//! # Image Rendering
//!
//! Turns decoded images into printer dot data.
//!
//! ## Modules
//!
//! - [`raster`]: Scale, composite on white, pack into 24-row bands
//! - [`dither`]: Threshold, Bayer, Floyd-Steinberg and Atkinson 1-bit conversion
//!
//! ## Usage Example
//!
//! ```
//! use image::{DynamicImage, RgbImage};
//! use starline::render::{dither, raster};
//!
//! let source = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 24, image::Rgb([255, 255, 255])));
//! let flat = raster::flatten(&source, 8, 24);
//! let lum = dither::luminance(&flat);
//! let dots = dither::dither(&lum, 8, 24, dither::DitheringAlgorithm::Threshold, 128);
//! let bands = raster::column_bands(&dots, 8, 24);
//! assert!(bands[0].iter().all(|&b| b == 0));
//! ```

pub mod dither;
pub mod raster;
