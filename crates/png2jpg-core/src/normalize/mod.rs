//! Pixel-format normalization.
//!
//! Bridges every PNG color model to the 8-bit, 3-channel RGB layout a
//! baseline JPEG encoder consumes:
//!
//! | Color type       | Depths         | Per pixel                         |
//! |------------------|----------------|-----------------------------------|
//! | Grayscale        | 1, 2, 4, 8, 16 | gray scaled to 8 bits, replicated |
//! | Indexed          | 1, 2, 4, 8     | color table lookup                |
//! | Grayscale+alpha  | 8, 16          | gray replicated, alpha dropped    |
//! | RGB              | 8, 16          | passed through                    |
//! | RGBA             | 8, 16          | alpha dropped                     |
//!
//! 16-bit samples keep their high byte. A tRNS key is resolved to alpha
//! before alpha is dropped, so it is counted but never changes a color.
//! Alpha is discarded, not blended.

mod rgb;
mod samples;
mod transparency;

pub use rgb::RgbImage;

use crate::decode::{BitDepth, ColorType, DecodeError, RawImage};
use samples::{read_sample, to_u8};
use transparency::TransparencyKey;

/// What normalization threw away.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    /// Pixels that were not fully opaque, either from an alpha channel or
    /// a transparency key.
    pub discarded_alpha: u64,
}

/// Convert raw PNG scanlines to interleaved 8-bit RGB, with no limit on
/// the output size.
///
/// # Errors
///
/// Returns `DecodeError::UnsupportedFormat` for a color type / bit depth
/// pair PNG does not allow, `DecodeError::Truncated` if the scanline buffer
/// is too short, `DecodeError::MissingPalette` or
/// `DecodeError::PaletteIndexOutOfRange` for broken palette images.
pub fn normalize(raw: &RawImage) -> Result<(RgbImage, NormalizeStats), DecodeError> {
    normalize_with_limit(raw, usize::MAX)
}

/// [`normalize`], refusing to allocate more than `max_output_bytes` for
/// the RGB buffer.
///
/// Sub-byte images expand up to 24 times, so a limit on the decoded
/// scanlines alone does not bound this buffer.
///
/// # Errors
///
/// As [`normalize`], plus `DecodeError::LimitsExceeded` when
/// `width * height * 3` is over the limit or does not fit in `usize`.
pub fn normalize_with_limit(
    raw: &RawImage,
    max_output_bytes: usize,
) -> Result<(RgbImage, NormalizeStats), DecodeError> {
    validate(raw)?;

    let output_len = (raw.width as usize)
        .checked_mul(raw.height as usize)
        .and_then(|pixels| pixels.checked_mul(3))
        .filter(|&len| len <= max_output_bytes)
        .ok_or(DecodeError::LimitsExceeded(max_output_bytes))?;

    let expander = Expander::new(raw)?;
    let width = raw.width as usize;
    let mut pixels = Vec::with_capacity(output_len);
    let mut stats = NormalizeStats::default();

    for y in 0..raw.height {
        let row = raw.row(y);
        for x in 0..width {
            let (rgb, alpha) = expander.expand(row, x)?;
            pixels.extend_from_slice(&rgb);
            if alpha != u8::MAX {
                stats.discarded_alpha += 1;
            }
        }
    }

    Ok((RgbImage::new(raw.width, raw.height, pixels), stats))
}

fn validate(raw: &RawImage) -> Result<(), DecodeError> {
    if raw.width == 0 || raw.height == 0 {
        return Err(DecodeError::InvalidDimensions {
            width: raw.width,
            height: raw.height,
        });
    }

    if !raw.color_type.allows(raw.bit_depth) {
        return Err(DecodeError::UnsupportedFormat {
            color_type: raw.color_type,
            bit_depth: raw.bit_depth as u8,
        });
    }

    let row_len = raw.packed_row_len();
    if raw.stride < row_len {
        return Err(DecodeError::Truncated {
            expected: row_len,
            actual: raw.stride,
        });
    }

    // The last row only needs its packed bytes, not the full stride.
    // No buffer can hold a size that overflows usize.
    let expected = raw
        .stride
        .checked_mul(raw.height as usize - 1)
        .and_then(|n| n.checked_add(row_len))
        .unwrap_or(usize::MAX);
    if raw.data.len() < expected {
        return Err(DecodeError::Truncated {
            expected,
            actual: raw.data.len(),
        });
    }

    Ok(())
}

/// Per-pixel expansion for one image.
struct Expander<'a> {
    color_type: ColorType,
    depth: BitDepth,
    palette: &'a [u8],
    key: TransparencyKey<'a>,
}

impl<'a> Expander<'a> {
    fn new(raw: &'a RawImage) -> Result<Self, DecodeError> {
        let palette = match (raw.color_type, raw.palette.as_deref()) {
            (ColorType::Indexed, None) => return Err(DecodeError::MissingPalette),
            (_, palette) => palette.unwrap_or(&[]),
        };

        Ok(Self {
            color_type: raw.color_type,
            depth: raw.bit_depth,
            palette,
            key: TransparencyKey::parse(
                raw.color_type,
                raw.bit_depth,
                raw.transparency.as_deref(),
            ),
        })
    }

    /// Expand pixel `x` of `row` to RGB plus the alpha that gets dropped.
    #[inline]
    fn expand(&self, row: &[u8], x: usize) -> Result<([u8; 3], u8), DecodeError> {
        let depth = self.depth;
        let pixel = match self.color_type {
            ColorType::Grayscale => {
                let sample = read_sample(row, x, depth);
                let gray = to_u8(sample, depth);
                ([gray; 3], self.key.gray_alpha(sample))
            }
            ColorType::GrayscaleAlpha => {
                let gray = to_u8(read_sample(row, 2 * x, depth), depth);
                let alpha = to_u8(read_sample(row, 2 * x + 1, depth), depth);
                ([gray; 3], alpha)
            }
            ColorType::Rgb => {
                let samples = [
                    read_sample(row, 3 * x, depth),
                    read_sample(row, 3 * x + 1, depth),
                    read_sample(row, 3 * x + 2, depth),
                ];
                (
                    samples.map(|s| to_u8(s, depth)),
                    self.key.rgb_alpha(samples),
                )
            }
            ColorType::Rgba => {
                let rgb = [
                    to_u8(read_sample(row, 4 * x, depth), depth),
                    to_u8(read_sample(row, 4 * x + 1, depth), depth),
                    to_u8(read_sample(row, 4 * x + 2, depth), depth),
                ];
                (rgb, to_u8(read_sample(row, 4 * x + 3, depth), depth))
            }
            ColorType::Indexed => {
                // Indices are never scaled, whatever their depth.
                let index = read_sample(row, x, depth) as u8;
                let i = index as usize * 3;
                let entry = self.palette.get(i..i + 3).ok_or(
                    DecodeError::PaletteIndexOutOfRange {
                        index,
                        entries: self.palette.len() / 3,
                    },
                )?;
                (
                    [entry[0], entry[1], entry[2]],
                    self.key.palette_alpha(index),
                )
            }
        };
        Ok(pixel)
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
