//! png2jpg Core - PNG to JPEG conversion library
//!
//! Converts a PNG of any color type and bit depth into a baseline JPEG:
//!
//! 1. [`decode`] reads the PNG and keeps its scanlines untransformed
//! 2. [`normalize`] turns palette, grayscale, alpha and 16-bit data into
//!    8-bit RGB triples
//! 3. [`encode`] writes the RGB buffer as a baseline JPEG
//!
//! All operations are synchronous and single-threaded. [`convert`] runs the
//! three stages for one source/destination pair.
//!
//! # Examples
//!
//! ```ignore
//! use png2jpg_core::{convert, ConvertOptions};
//!
//! let options = ConvertOptions::new().with_quality(90);
//! let report = convert("input.png".as_ref(), "output.jpg".as_ref(), &options)?;
//! println!("{}x{}, {} bytes", report.width, report.height, report.bytes_written);
//! ```

pub mod convert;
pub mod decode;
pub mod encode;
pub mod error;
pub mod normalize;
pub mod options;

#[cfg(test)]
mod test_support;

pub use convert::{convert, ConversionReport};
pub use decode::{BitDepth, ColorType, DecodeError, RawImage};
pub use encode::EncodeError;
pub use error::{ConvertError, Stage};
pub use normalize::{normalize, normalize_with_limit, NormalizeStats, RgbImage};
pub use options::{ConvertOptions, JPEG_QUALITY};
