//! The decode → normalize → encode pipeline.

use std::path::Path;

use crate::decode::{read_png, BitDepth, ColorType};
use crate::encode::write_jpeg;
use crate::error::ConvertError;
use crate::normalize::normalize_with_limit;
use crate::options::ConvertOptions;

/// Summary of a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub width: u32,
    pub height: u32,
    /// Color type of the source PNG.
    pub color_type: ColorType,
    /// Bit depth of the source PNG.
    pub bit_depth: BitDepth,
    /// Pixels whose transparency was dropped.
    pub discarded_alpha: u64,
    /// Size of the JPEG file.
    pub bytes_written: u64,
}

/// Convert the PNG at `source` to a baseline JPEG at `destination`.
///
/// The conversion is one blocking call. Every file handle and codec buffer
/// is released before it returns, and on error the destination is neither
/// created nor modified.
///
/// # Errors
///
/// * `ConvertError::FileOpen` - source unreadable or destination unwritable
/// * `ConvertError::SameFile` - destination is the source
/// * `ConvertError::DecodeFormat` - corrupt or unsupported PNG, or an image
///   over `max_decoded_bytes`
/// * `ConvertError::Encode` - JPEG encoder failure
pub fn convert(
    source: &Path,
    destination: &Path,
    options: &ConvertOptions,
) -> Result<ConversionReport, ConvertError> {
    if is_same_file(source, destination) {
        return Err(ConvertError::SameFile {
            path: destination.to_path_buf(),
        });
    }

    log::debug!("reading {}", source.display());
    let raw = read_png(source, options.max_decoded_bytes)?;

    let (rgb, stats) = normalize_with_limit(&raw, options.max_decoded_bytes).map_err(|e| {
        ConvertError::DecodeFormat {
            path: source.to_path_buf(),
            source: e,
        }
    })?;
    let (color_type, bit_depth) = (raw.color_type, raw.bit_depth);
    drop(raw);

    if stats.discarded_alpha > 0 {
        log::warn!(
            "{}: transparency of {} pixel(s) discarded",
            source.display(),
            stats.discarded_alpha
        );
    }

    let bytes_written = write_jpeg(destination, &rgb, options.quality())?;

    log::info!(
        "converted {} ({}x{} {:?} {}-bit) to {} ({} bytes)",
        source.display(),
        rgb.width,
        rgb.height,
        color_type,
        bit_depth.bits(),
        destination.display(),
        bytes_written
    );

    Ok(ConversionReport {
        width: rgb.width,
        height: rgb.height,
        color_type,
        bit_depth,
        discarded_alpha: stats.discarded_alpha,
        bytes_written,
    })
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
