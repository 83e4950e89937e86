//! JPEG encoding.
//!
//! This module provides JPEG encoding using the `image` crate's JPEG encoder,
//! which writes baseline (non-progressive) JPEG with 3-component RGB input.
//! Output files are written atomically: the encoded bytes land in a
//! temporary file next to the destination, which is renamed into place only
//! once complete.

use std::io::{Cursor, Write};
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::error::{ConvertError, Stage};
use crate::normalize::RgbImage;

/// Errors that can occur during JPEG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// JPEG encoding failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order, top row first)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
///
/// # Returns
///
/// JPEG-encoded bytes on success, or an error if encoding fails.
///
/// # Quality Guidelines
///
/// * 90-100: High quality, suitable for archival or further editing
/// * 75-90: Good quality, recommended for most uses (default: 75)
/// * 60-75: Medium quality, acceptable for web/social media
/// * Below 60: Low quality, visible artifacts
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    // Validate dimensions
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    // Validate pixel data length
    let expected_len = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    // Clamp quality to valid range (1-100)
    let quality = quality.clamp(1, 100);

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

    encoder
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Encode a normalized image and write it to `path`.
///
/// Returns the number of bytes written. On error the destination is left
/// exactly as it was: absent if it did not exist, unchanged otherwise.
pub fn write_jpeg(path: &Path, image: &RgbImage, quality: u8) -> Result<u64, ConvertError> {
    let jpeg = encode_jpeg(&image.pixels, image.width, image.height, quality).map_err(
        |source| ConvertError::Encode {
            path: path.to_path_buf(),
            source,
        },
    )?;
    log::debug!("encoded {} JPEG bytes at quality {}", jpeg.len(), quality.clamp(1, 100));

    let write_error = |source| ConvertError::FileOpen {
        path: path.to_path_buf(),
        stage: Stage::Write,
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // Dropping the temporary file on an early return deletes it.
    let mut file = NamedTempFile::new_in(dir).map_err(write_error)?;
    file.write_all(&jpeg).map_err(write_error)?;
    file.as_file().sync_all().map_err(write_error)?;
    file.persist(path).map_err(|e| write_error(e.error))?;

    Ok(jpeg.len() as u64)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
