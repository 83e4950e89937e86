//! PNG decoding through the `png` crate.
//!
//! The decoder is asked for untransformed output so the normalizer sees the
//! stored color type and bit depth, the palette and the transparency chunk.

use std::io::{self, Cursor};
use std::path::Path;

use super::{BitDepth, ColorType, DecodeError, RawImage};
use crate::error::{ConvertError, Stage};

/// The eight bytes every PNG file starts with.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Check if bytes start with the PNG signature.
pub fn is_png(bytes: &[u8]) -> bool {
    bytes.starts_with(&PNG_SIGNATURE)
}

/// Decode PNG bytes into raw scanlines.
///
/// # Arguments
///
/// * `bytes` - Raw PNG file bytes
/// * `max_decoded_bytes` - Upper bound on decoder allocations and on the
///   scanline buffer
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the signature is missing,
/// `DecodeError::UnsupportedBitDepth`, `DecodeError::UnsupportedColorType`
/// or `DecodeError::UnsupportedFormat` for header codes PNG does not define,
/// `DecodeError::CorruptedFile` for malformed structure,
/// `DecodeError::UnexpectedEof` for truncated files and
/// `DecodeError::LimitsExceeded` if the image is too large.
pub fn decode_png(bytes: &[u8], max_decoded_bytes: usize) -> Result<RawImage, DecodeError> {
    if !is_png(bytes) {
        return Err(DecodeError::InvalidFormat);
    }
    check_header(bytes)?;

    let limits = png::Limits {
        bytes: max_decoded_bytes,
    };
    let mut decoder = png::Decoder::new_with_limits(Cursor::new(bytes), limits);
    decoder.set_transformations(png::Transformations::IDENTITY);

    let mut reader = decoder
        .read_info()
        .map_err(|e| map_decoding_error(e, max_decoded_bytes))?;

    let (palette, transparency, animated) = {
        let info = reader.info();
        (
            info.palette.as_ref().map(|p| p.to_vec()),
            info.trns.as_ref().map(|t| t.to_vec()),
            info.animation_control.is_some(),
        )
    };
    if animated {
        log::warn!("animated PNG: only the default image is converted");
    }

    let buffer_size = reader.output_buffer_size();
    if buffer_size > max_decoded_bytes {
        return Err(DecodeError::LimitsExceeded(max_decoded_bytes));
    }

    let mut data = vec![0u8; buffer_size];
    let frame = reader
        .next_frame(&mut data)
        .map_err(|e| map_decoding_error(e, max_decoded_bytes))?;
    data.truncate(frame.buffer_size());

    let mut image = RawImage::new(
        frame.width,
        frame.height,
        ColorType::from(frame.color_type),
        BitDepth::from(frame.bit_depth),
        data,
    )?;
    image.palette = palette;
    image.transparency = transparency;

    log::debug!(
        "decoded PNG: {}x{} {:?} {}-bit, palette={}, tRNS={}",
        image.width,
        image.height,
        image.color_type,
        image.bit_depth.bits(),
        image.palette.is_some(),
        image.transparency.is_some()
    );

    Ok(image)
}

/// Read and decode a PNG file.
///
/// The whole file is read into memory before decoding; the handle is closed
/// before this function returns on every path.
pub fn read_png(path: &Path, max_decoded_bytes: usize) -> Result<RawImage, ConvertError> {
    let bytes = std::fs::read(path).map_err(|source| ConvertError::FileOpen {
        path: path.to_path_buf(),
        stage: Stage::Read,
        source,
    })?;

    decode_png(&bytes, max_decoded_bytes).map_err(|source| ConvertError::DecodeFormat {
        path: path.to_path_buf(),
        source,
    })
}

/// Reject unsupported IHDR codes with a precise error before the `png`
/// crate reports them as a generic format error.
///
/// A missing or misplaced IHDR is left for the decoder to report.
fn check_header(bytes: &[u8]) -> Result<(), DecodeError> {
    // Chunk type, width, height, bit depth, color type
    let Some([b'I', b'H', b'D', b'R', .., depth, color]) = bytes.get(12..26) else {
        return Ok(());
    };
    let bit_depth = BitDepth::try_from(*depth)?;
    let color_type = ColorType::try_from(*color)?;
    if !color_type.allows(bit_depth) {
        return Err(DecodeError::UnsupportedFormat {
            color_type,
            bit_depth: *depth,
        });
    }
    Ok(())
}

fn map_decoding_error(err: png::DecodingError, limit: usize) -> DecodeError {
    match err {
        png::DecodingError::LimitsExceeded => DecodeError::LimitsExceeded(limit),
        png::DecodingError::IoError(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
            DecodeError::UnexpectedEof
        }
        other => DecodeError::CorruptedFile(other.to_string()),
    }
}
