// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — prepares camera frames and uploads for the recognition
// service. Phone cameras produce 12+ megapixel frames; the service only needs
// the card legible, so images are shrunk and re-encoded as JPEG first.

use image::DynamicImage;
use frontdesk_core::error::FrontDeskError;
use tracing::{debug, info, instrument};

/// JPEG quality used for images sent to the recognition service.
pub const UPLOAD_JPEG_QUALITY: u8 = 85;

/// Image processing pipeline operating on a single in-memory image.
///
/// Each transformation consumes `self` and returns a new `ImageProcessor`,
/// enabling method chaining.
///
/// ```ignore
/// let jpeg = ImageProcessor::from_bytes(&upload)?
///     .fit_within(1600)
///     .to_jpeg_bytes(85)?;
/// ```
pub struct ImageProcessor {
    /// The current working image.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Create a processor from raw encoded bytes (JPEG, PNG, etc.).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, FrontDeskError> {
        let img = image::load_from_memory(data).map_err(|err| {
            FrontDeskError::ImageError(format!("failed to decode image: {}", err))
        })?;
        debug!(
            width = img.width(),
            height = img.height(),
            "Image decoded from bytes"
        );
        Ok(Self { image: img })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    /// Current image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Current image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    // -- Transformations ------------------------------------------------------

    /// Shrink the image so its longest edge is at most `max_edge` pixels,
    /// preserving aspect ratio. Smaller images pass through untouched.
    #[instrument(skip(self), fields(max_edge))]
    pub fn fit_within(self, max_edge: u32) -> Self {
        let (w, h) = (self.image.width(), self.image.height());
        if max_edge == 0 || (w <= max_edge && h <= max_edge) {
            return self;
        }
        info!(from_w = w, from_h = h, max_edge, "Downscaling image");
        let resized = self
            .image
            .resize(max_edge, max_edge, image::imageops::FilterType::Lanczos3);
        debug!(
            new_w = resized.width(),
            new_h = resized.height(),
            "Resize complete"
        );
        Self { image: resized }
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the current image as JPEG bytes with the given quality (1-100).
    pub fn to_jpeg_bytes(&self, quality: u8) -> Result<Vec<u8>, FrontDeskError> {
        let mut buffer = Vec::new();
        let rgb = self.image.to_rgb8();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality);
        rgb.write_with_encoder(encoder).map_err(|err| {
            FrontDeskError::ImageError(format!("JPEG encoding failed: {}", err))
        })?;
        Ok(buffer)
    }
}

/// Decode, downscale, and re-encode an ID card photo as JPEG for upload.
pub fn prepare_id_card_image(data: &[u8], max_edge: u32) -> Result<Vec<u8>, FrontDeskError> {
    let jpeg = ImageProcessor::from_bytes(data)?
        .fit_within(max_edge)
        .to_jpeg_bytes(UPLOAD_JPEG_QUALITY)?;
    debug!(in_len = data.len(), out_len = jpeg.len(), "ID card image prepared");
    Ok(jpeg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([200, 180, 160]));
        let mut buffer = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut std::io::Cursor::new(&mut buffer), ImageFormat::Png)
            .expect("encode png");
        buffer
    }

    #[test]
    fn large_image_is_downscaled_preserving_aspect() {
        let jpeg = prepare_id_card_image(&png_bytes(400, 200), 100).expect("prepare");
        let decoded = image::load_from_memory(&jpeg).expect("decode jpeg");
        assert_eq!((decoded.width(), decoded.height()), (100, 50));
    }

    #[test]
    fn small_image_is_not_upscaled() {
        let processor = ImageProcessor::from_bytes(&png_bytes(64, 40))
            .expect("decode")
            .fit_within(1600);
        assert_eq!((processor.width(), processor.height()), (64, 40));
    }

    #[test]
    fn garbage_bytes_are_an_image_error() {
        let result = prepare_id_card_image(b"definitely not an image", 1600);
        assert!(matches!(result, Err(FrontDeskError::ImageError(_))));
    }
}
