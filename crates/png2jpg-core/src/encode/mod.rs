//! JPEG encoding.
//!
//! This module provides functionality for:
//! - Encoding RGB pixel data to baseline JPEG at a given quality
//! - Writing the result to a file without ever leaving a partial file behind
//!
//! # Examples
//!
//! ```ignore
//! use png2jpg_core::encode::encode_jpeg;
//!
//! let pixels = vec![128u8; 100 * 100 * 3]; // Gray image
//! let jpeg_bytes = encode_jpeg(&pixels, 100, 100, 75).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod jpeg;

pub use jpeg::{encode_jpeg, write_jpeg, EncodeError};
