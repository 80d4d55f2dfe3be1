//! # Barcodes, QR Codes and Images
//!
//! These commands print a graphic block of their own, so they commit the
//! current line and refuse to run inside table cells or boxes.

use image::DynamicImage;
use serde::{Deserialize, Serialize};

use super::Encoder;
use crate::codepage::{self, Codepage};
use crate::error::{EncoderError, Result};
use crate::protocol::barcode::{self, Symbology, qr};
use crate::protocol::commands::LF;
use crate::protocol::graphics::{self, BAND_HEIGHT};
use crate::render::dither::{self, DitheringAlgorithm};
use crate::render::raster;

/// QR code options. Defaults: model 2, 6 dot cells, error level M.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QrOptions {
    pub model: u8,
    pub size: u8,
    pub error_level: qr::QrErrorLevel,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            model: 2,
            size: 6,
            error_level: qr::QrErrorLevel::M,
        }
    }
}

/// Image conversion options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageOptions {
    pub algorithm: DitheringAlgorithm,
    /// Luminance cutoff (0-255) for threshold and Bayer dithering.
    pub threshold: u8,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            algorithm: DitheringAlgorithm::Threshold,
            threshold: 128,
        }
    }
}

impl Encoder {
    /// Print a 1D barcode `height` dots tall.
    ///
    /// The value is sent as ASCII; starts on a new line if the current one
    /// has text.
    pub fn barcode(&mut self, value: &str, symbology: Symbology, height: u8) -> Result<&mut Self> {
        self.reject_embedded("barcode")?;

        if self.queue.cursor != 0 {
            self.newline();
        }
        let data = codepage::encode(value, Codepage::Ascii);
        self.queue.push(barcode::barcode(symbology, height, &data));
        self.flush(false);
        Ok(self)
    }

    /// Print a QR code rendered by the printer.
    ///
    /// ## Errors
    ///
    /// - [`EncoderError::InvalidQrModel`] unless `model` is 1 or 2
    /// - [`EncoderError::InvalidQrSize`] unless `size` is in 1..=8
    ///
    /// ## Example
    ///
    /// ```
    /// use starline::encoder::{Encoder, QrOptions};
    ///
    /// let mut encoder = Encoder::default();
    /// encoder.qrcode("hi", QrOptions::default())?;
    /// assert_eq!(
    ///     encoder.encode(),
    ///     vec![
    ///         0x0A,
    ///         0x1B, 0x1D, 0x79, 0x53, 0x30, 0x02,
    ///         0x1B, 0x1D, 0x79, 0x53, 0x32, 0x06,
    ///         0x1B, 0x1D, 0x79, 0x53, 0x31, 0x01,
    ///         0x1B, 0x1D, 0x79, 0x44, 0x31, 0x00, 0x02, 0x00, b'h', b'i',
    ///         0x1B, 0x1D, 0x79, 0x50,
    ///     ]
    /// );
    /// # Ok::<(), starline::EncoderError>(())
    /// ```
    pub fn qrcode(&mut self, value: &str, options: QrOptions) -> Result<&mut Self> {
        let model = self.check_qrcode(options.model, options.size)?;

        let data = codepage::encode(value, Codepage::Iso8859_1);
        self.queue.push(vec![LF]);
        self.queue.push(qr::set_model(model));
        self.queue.push(qr::set_cell_size(options.size));
        self.queue.push(qr::set_error_correction(options.error_level));
        self.queue.push(qr::set_data(&data));
        self.queue.push(qr::print());
        self.flush(false);
        Ok(self)
    }

    /// Checks run by [`qrcode`](Self::qrcode) before the error level is
    /// looked at: embedded context, then model, then cell size.
    pub(crate) fn check_qrcode(&self, model: u8, size: u8) -> Result<qr::QrModel> {
        self.reject_embedded("qrcode")?;
        let model = qr::QrModel::try_from(model)?;
        if !(1..=8).contains(&size) {
            return Err(EncoderError::InvalidQrSize(size.to_string()));
        }
        Ok(model)
    }

    /// Print an image scaled to `width` x `height` dots.
    ///
    /// The image is flattened on white, dithered and sent as 24-dot bands.
    ///
    /// ## Errors
    ///
    /// [`EncoderError::InvalidImageDimensions`] unless `width` is a multiple
    /// of 8 and `height` a multiple of 24.
    pub fn image(
        &mut self,
        image: &DynamicImage,
        width: u32,
        height: u32,
        options: ImageOptions,
    ) -> Result<&mut Self> {
        self.reject_embedded("image")?;

        let invalid = || EncoderError::InvalidImageDimensions { width, height };
        if width % 8 != 0 || height % BAND_HEIGHT as u32 != 0 {
            return Err(invalid());
        }
        let band_width = u16::try_from(width).map_err(|_| invalid())?;

        let flat = raster::flatten(image, width, height);
        let lum = dither::luminance(&flat);
        let dots = dither::dither(
            &lum,
            width as usize,
            height as usize,
            options.algorithm,
            options.threshold,
        );

        self.queue.push(graphics::line_spacing_band());
        for band in raster::column_bands(&dots, width as usize, height as usize) {
            self.queue.push(graphics::band(band_width, &band));
        }
        self.queue.push(graphics::line_spacing_default());
        self.flush(false);
        Ok(self)
    }
}
