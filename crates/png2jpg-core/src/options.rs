//! Conversion settings.

/// Default JPEG quality (the libjpeg default).
pub const JPEG_QUALITY: u8 = 75;

/// Default upper bound on decoded image memory (256 MiB).
pub const DEFAULT_MAX_DECODED_BYTES: usize = 256 * 1024 * 1024;

/// Settings for one conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// JPEG quality (1-100, where 100 is highest quality).
    pub quality: u8,
    /// Decoding fails with `LimitsExceeded` rather than allocate more than
    /// this many bytes, either for the PNG scanlines or for the RGB buffer.
    pub max_decoded_bytes: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            quality: JPEG_QUALITY,
            max_decoded_bytes: DEFAULT_MAX_DECODED_BYTES,
        }
    }
}

impl ConvertOptions {
    /// Create options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_max_decoded_bytes(mut self, bytes: usize) -> Self {
        self.max_decoded_bytes = bytes;
        self
    }

    /// Quality clamped to the valid 1-100 range.
    pub fn quality(&self) -> u8 {
        self.quality.clamp(1, 100)
    }
}
