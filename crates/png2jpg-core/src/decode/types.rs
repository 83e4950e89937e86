//! Core types for PNG decoding.

use thiserror::Error;

/// Error types for PNG decoding and pixel normalization.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes do not start with a PNG signature.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The PNG structure is malformed (bad header, bad chunk, checksum mismatch).
    #[error("Corrupted PNG file: {0}")]
    CorruptedFile(String),

    /// The image data ended before every scanline was read.
    #[error("Truncated image data: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    /// The file ended in the middle of a chunk.
    #[error("Unexpected end of PNG data")]
    UnexpectedEof,

    /// Color type code outside the five PNG color types.
    #[error("Unsupported color type {0}")]
    UnsupportedColorType(u8),

    /// Bit depth outside {1, 2, 4, 8, 16}.
    #[error("Unsupported bit depth {0}")]
    UnsupportedBitDepth(u8),

    /// Color type and bit depth are individually valid but not together.
    #[error("Unsupported bit depth {bit_depth} for color type {color_type:?}")]
    UnsupportedFormat {
        color_type: ColorType,
        bit_depth: u8,
    },

    /// Palette image without a PLTE chunk.
    #[error("Palette image has no color table")]
    MissingPalette,

    /// A pixel references a palette entry that does not exist.
    #[error("Palette index {index} out of range for {entries}-entry color table")]
    PaletteIndexOutOfRange { index: u8, entries: usize },

    /// Decoding would exceed the configured memory limit.
    #[error("Image exceeds the decoding memory limit of {0} bytes")]
    LimitsExceeded(usize),

    /// Zero width or height.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },
}

/// How a PNG stores the samples of a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ColorType {
    /// One gray sample.
    Grayscale = 0,
    /// Red, green and blue samples.
    Rgb = 2,
    /// One index into the color table.
    Indexed = 3,
    /// Gray sample followed by alpha.
    GrayscaleAlpha = 4,
    /// Red, green, blue and alpha samples.
    Rgba = 6,
}

impl ColorType {
    /// Number of samples stored per pixel.
    #[inline]
    pub fn samples(self) -> usize {
        match self {
            ColorType::Grayscale | ColorType::Indexed => 1,
            ColorType::GrayscaleAlpha => 2,
            ColorType::Rgb => 3,
            ColorType::Rgba => 4,
        }
    }

    /// Returns true if every pixel carries its own alpha sample.
    #[inline]
    pub fn has_alpha_channel(self) -> bool {
        matches!(self, ColorType::GrayscaleAlpha | ColorType::Rgba)
    }

    /// Returns true if PNG allows this color type at `depth`.
    pub fn allows(self, depth: BitDepth) -> bool {
        match self {
            ColorType::Grayscale => true,
            ColorType::Indexed => depth != BitDepth::Sixteen,
            ColorType::Rgb | ColorType::GrayscaleAlpha | ColorType::Rgba => {
                matches!(depth, BitDepth::Eight | BitDepth::Sixteen)
            }
        }
    }
}

impl TryFrom<u8> for ColorType {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ColorType::Grayscale),
            2 => Ok(ColorType::Rgb),
            3 => Ok(ColorType::Indexed),
            4 => Ok(ColorType::GrayscaleAlpha),
            6 => Ok(ColorType::Rgba),
            other => Err(DecodeError::UnsupportedColorType(other)),
        }
    }
}

impl From<png::ColorType> for ColorType {
    fn from(value: png::ColorType) -> Self {
        match value {
            png::ColorType::Grayscale => ColorType::Grayscale,
            png::ColorType::Rgb => ColorType::Rgb,
            png::ColorType::Indexed => ColorType::Indexed,
            png::ColorType::GrayscaleAlpha => ColorType::GrayscaleAlpha,
            png::ColorType::Rgba => ColorType::Rgba,
        }
    }
}

/// Bits per sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum BitDepth {
    One = 1,
    Two = 2,
    Four = 4,
    Eight = 8,
    Sixteen = 16,
}

impl BitDepth {
    #[inline]
    pub fn bits(self) -> usize {
        self as usize
    }

    /// Largest sample value representable at this depth.
    #[inline]
    pub fn max_value(self) -> u16 {
        match self {
            BitDepth::Sixteen => u16::MAX,
            other => (1u16 << other.bits()) - 1,
        }
    }
}

impl TryFrom<u8> for BitDepth {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(BitDepth::One),
            2 => Ok(BitDepth::Two),
            4 => Ok(BitDepth::Four),
            8 => Ok(BitDepth::Eight),
            16 => Ok(BitDepth::Sixteen),
            other => Err(DecodeError::UnsupportedBitDepth(other)),
        }
    }
}

impl From<png::BitDepth> for BitDepth {
    fn from(value: png::BitDepth) -> Self {
        match value {
            png::BitDepth::One => BitDepth::One,
            png::BitDepth::Two => BitDepth::Two,
            png::BitDepth::Four => BitDepth::Four,
            png::BitDepth::Eight => BitDepth::Eight,
            png::BitDepth::Sixteen => BitDepth::Sixteen,
        }
    }
}

/// Scanlines exactly as stored in the PNG, after unfiltering.
///
/// Rows run top to bottom with `stride` bytes each. Sub-byte samples are
/// packed most significant bit first and 16-bit samples are big-endian.
#[derive(Debug, Clone)]
pub struct RawImage {
    pub width: u32,
    pub height: u32,
    pub color_type: ColorType,
    pub bit_depth: BitDepth,
    /// Bytes per stored row.
    pub stride: usize,
    pub data: Vec<u8>,
    /// PLTE chunk: RGB triples.
    pub palette: Option<Vec<u8>>,
    /// tRNS chunk, uninterpreted.
    pub transparency: Option<Vec<u8>>,
}

impl RawImage {
    /// Wrap tightly packed scanlines without palette or tRNS.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::UnsupportedFormat` for a color type / bit depth
    /// pair PNG does not allow and `DecodeError::InvalidDimensions` for a
    /// zero dimension.
    pub fn new(
        width: u32,
        height: u32,
        color_type: ColorType,
        bit_depth: BitDepth,
        data: Vec<u8>,
    ) -> Result<Self, DecodeError> {
        if !color_type.allows(bit_depth) {
            return Err(DecodeError::UnsupportedFormat {
                color_type,
                bit_depth: bit_depth as u8,
            });
        }
        if width == 0 || height == 0 {
            return Err(DecodeError::InvalidDimensions { width, height });
        }

        let mut image = Self {
            width,
            height,
            color_type,
            bit_depth,
            stride: 0,
            data,
            palette: None,
            transparency: None,
        };
        image.stride = image.packed_row_len();
        Ok(image)
    }

    /// Number of bytes needed to hold one packed row of `width` pixels.
    pub fn packed_row_len(&self) -> usize {
        let bits = self.width as usize * self.color_type.samples() * self.bit_depth.bits();
        bits.div_ceil(8)
    }

    /// Get the stored bytes of row `y`.
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.stride;
        &self.data[start..start + self.packed_row_len()]
    }
}
