//! # 1-Bit Dithering
//!
//! Thermal printers can only burn a dot or leave it white. This module turns
//! a grayscale luminance buffer into a dot map (`true` = print) with one of
//! four algorithms.
//!
//! ```text
//! Grayscale:    White    Light    Medium    Dark    Black
//!               ░░░░░░   ░░▒░░░   ░▒░▒░▒   ▒▓▒▓▒▓   ██████
//! ```
//!
//! ## Algorithms
//!
//! | Algorithm | Kind | Notes |
//! |-----------|------|-------|
//! | Threshold | Fixed cutoff | Sharp; best for logos and text |
//! | Bayer | Ordered, 4x4 | Regular crosshatch, no error accumulation |
//! | Floyd-Steinberg | Error diffusion | Smooth gradients, some worms |
//! | Atkinson | Error diffusion | Diffuses 6/8 of the error; higher contrast |
//!
//! ## Bayer Matrix
//!
//! ```text
//!     0    1    2    3    (x mod 4)
//!   ┌────┬────┬────┬────┐
//! 0 │ 15 │135 │ 45 │165 │
//!   ├────┼────┼────┼────┤
//! 1 │195 │ 75 │225 │105 │
//!   ├────┼────┼────┼────┤
//! 2 │ 60 │180 │ 30 │150 │
//!   ├────┼────┼────┼────┤
//! 3 │240 │120 │210 │ 90 │
//!   └────┴────┴────┴────┘
//! (y mod 4)
//! ```
//!
//! A pixel prints when `(luminance + matrix) / 2 < threshold`.
//!
//! ## Usage Example
//!
//! ```
//! use starline::render::dither::{dither, DitheringAlgorithm};
//!
//! let lum = vec![0.0, 255.0, 0.0, 255.0];
//! let dots = dither(&lum, 4, 1, DitheringAlgorithm::Threshold, 128);
//! assert_eq!(dots, vec![true, false, true, false]);
//! ```

use std::fmt;
use std::str::FromStr;

use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::error::EncoderError;

/// Bayer 4x4 ordered dithering matrix, scaled to 0-255.
pub const BAYER4: [[u8; 4]; 4] = [
    [15, 135, 45, 165],
    [195, 75, 225, 105],
    [60, 180, 30, 150],
    [240, 120, 210, 90],
];

/// Quantization cutoff used by the error diffusion algorithms.
const DIFFUSION_CUTOFF: f32 = 129.0;

/// Selectable 1-bit conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DitheringAlgorithm {
    #[default]
    Threshold,
    Bayer,
    FloydSteinberg,
    Atkinson,
}

impl FromStr for DitheringAlgorithm {
    type Err = EncoderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "threshold" => Ok(DitheringAlgorithm::Threshold),
            "bayer" => Ok(DitheringAlgorithm::Bayer),
            "floydsteinberg" => Ok(DitheringAlgorithm::FloydSteinberg),
            "atkinson" => Ok(DitheringAlgorithm::Atkinson),
            other => Err(EncoderError::UnsupportedDithering(other.to_string())),
        }
    }
}

impl fmt::Display for DitheringAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DitheringAlgorithm::Threshold => "threshold",
            DitheringAlgorithm::Bayer => "bayer",
            DitheringAlgorithm::FloydSteinberg => "floydsteinberg",
            DitheringAlgorithm::Atkinson => "atkinson",
        };
        f.write_str(name)
    }
}

/// Relative luminance of every pixel, row major, 0.0 (black) to 255.0 (white).
pub fn luminance(image: &RgbImage) -> Vec<f32> {
    image
        .pixels()
        .map(|p| 0.2126 * p[0] as f32 + 0.7152 * p[1] as f32 + 0.0722 * p[2] as f32)
        .collect()
}

/// Convert a luminance buffer to a dot map.
///
/// ## Parameters
///
/// - `lum`: Row-major luminance, `width * height` values in 0.0-255.0
/// - `threshold`: Cutoff for [`DitheringAlgorithm::Threshold`] and
///   [`DitheringAlgorithm::Bayer`]; the diffusion algorithms quantize at 129
///
/// ## Returns
///
/// Row-major dots, `true` where the printer should burn a dot.
pub fn dither(
    lum: &[f32],
    width: usize,
    height: usize,
    algorithm: DitheringAlgorithm,
    threshold: u8,
) -> Vec<bool> {
    debug_assert_eq!(lum.len(), width * height);
    let threshold = threshold as f32;

    match algorithm {
        DitheringAlgorithm::Threshold => lum.iter().map(|&l| l < threshold).collect(),
        DitheringAlgorithm::Bayer => lum
            .iter()
            .enumerate()
            .map(|(i, &l)| {
                let (x, y) = (i % width, i / width);
                (l + BAYER4[y & 3][x & 3] as f32) / 2.0 < threshold
            })
            .collect(),
        DitheringAlgorithm::FloydSteinberg => diffuse(
            lum,
            width,
            height,
            16.0,
            &[(1, 0, 7.0), (-1, 1, 3.0), (0, 1, 5.0), (1, 1, 1.0)],
        ),
        DitheringAlgorithm::Atkinson => diffuse(
            lum,
            width,
            height,
            8.0,
            &[(1, 0, 1.0), (2, 0, 1.0), (-1, 1, 1.0), (0, 1, 1.0), (1, 1, 1.0), (0, 2, 1.0)],
        ),
    }
}

/// Generic error diffusion: each neighbour `(dx, dy, weight)` receives
/// `error * weight / divisor`.
fn diffuse(
    lum: &[f32],
    width: usize,
    height: usize,
    divisor: f32,
    kernel: &[(isize, usize, f32)],
) -> Vec<bool> {
    let mut buf = lum.to_vec();
    let mut dots = vec![false; buf.len()];

    for y in 0..height {
        for x in 0..width {
            let i = y * width + x;
            let old = buf[i];
            let new = if old < DIFFUSION_CUTOFF { 0.0 } else { 255.0 };
            dots[i] = new == 0.0;

            let error = (old - new) / divisor;
            for &(dx, dy, weight) in kernel {
                let nx = x as isize + dx;
                let ny = y + dy;
                if nx < 0 || nx as usize >= width || ny >= height {
                    continue;
                }
                buf[ny * width + nx as usize] += error * weight;
            }
        }
    }

    dots
}

// ============================================================================
// TESTS
// ============================================================================
