//! PNG decoding.
//!
//! This module provides functionality for:
//! - Checking for the PNG signature
//! - Decoding PNG bytes into untransformed scanlines ([`RawImage`])
//! - Reading a PNG file from disk with file-level error context
//!
//! Scanlines are kept exactly as stored (packed sub-byte samples, 16-bit
//! big-endian samples, palette indices). Turning them into RGB is the job of
//! [`crate::normalize`].
//!
//! # Examples
//!
//! ```ignore
//! use png2jpg_core::decode::decode_png;
//!
//! let png_bytes = std::fs::read("input.png").unwrap();
//! let raw = decode_png(&png_bytes, 256 * 1024 * 1024).unwrap();
//! println!("{}x{} {:?}", raw.width, raw.height, raw.color_type);
//! ```

mod reader;
mod types;

pub use reader::{decode_png, is_png, read_png, PNG_SIGNATURE};
pub use types::{BitDepth, ColorType, DecodeError, RawImage};
