//! Conversion-level errors.
//!
//! Each stage has its own error type ([`DecodeError`], [`EncodeError`]);
//! [`ConvertError`] wraps them together with the file the stage was working
//! on so the caller can tell what failed and where.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;

/// Pipeline stage in which a conversion failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Reading the source file.
    Read,
    /// Decoding and normalizing the PNG.
    Decode,
    /// Encoding the JPEG.
    Encode,
    /// Writing the destination file.
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Read => "read",
            Stage::Decode => "decode",
            Stage::Encode => "encode",
            Stage::Write => "write",
        };
        f.write_str(name)
    }
}

/// Errors that abort a conversion.
///
/// None of them are retried. When one is returned the destination file has
/// not been created or replaced.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Source unreadable or destination unwritable.
    #[error("Cannot {stage} {}: {source}", path.display())]
    FileOpen {
        path: PathBuf,
        stage: Stage,
        #[source]
        source: io::Error,
    },

    /// Destination and source are the same file.
    #[error("Refusing to overwrite the source image {}", path.display())]
    SameFile { path: PathBuf },

    /// Corrupt or unsupported PNG.
    #[error("Failed to decode {}: {source}", path.display())]
    DecodeFormat {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },

    /// JPEG encoder failure.
    #[error("Failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: EncodeError,
    },
}

impl ConvertError {
    /// The stage that failed.
    pub fn stage(&self) -> Stage {
        match self {
            ConvertError::FileOpen { stage, .. } => *stage,
            ConvertError::SameFile { .. } => Stage::Write,
            ConvertError::DecodeFormat { .. } => Stage::Decode,
            ConvertError::Encode { .. } => Stage::Encode,
        }
    }

    /// The file the failing stage was working on.
    pub fn path(&self) -> &std::path::Path {
        match self {
            ConvertError::FileOpen { path, .. }
            | ConvertError::SameFile { path }
            | ConvertError::DecodeFormat { path, .. }
            | ConvertError::Encode { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_open_display() {
        let err = ConvertError::FileOpen {
            path: PathBuf::from("input.png"),
            stage: Stage::Read,
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "Cannot read input.png: not found");
        assert_eq!(err.stage(), Stage::Read);
        assert_eq!(err.path(), std::path::Path::new("input.png"));
    }

    #[test]
    fn test_decode_format_display() {
        let err = ConvertError::DecodeFormat {
            path: PathBuf::from("bad.png"),
            source: DecodeError::UnsupportedBitDepth(3),
        };
        assert_eq!(
            err.to_string(),
            "Failed to decode bad.png: Unsupported bit depth 3"
        );
        assert_eq!(err.stage(), Stage::Decode);
    }

    #[test]
    fn test_encode_display() {
        let err = ConvertError::Encode {
            path: PathBuf::from("out.jpg"),
            source: EncodeError::EncodingFailed("boom".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Failed to encode out.jpg: JPEG encoding failed: boom"
        );
        assert_eq!(err.stage(), Stage::Encode);
    }

    #[test]
    fn test_source_chain() {
        use std::error::Error;

        let err = ConvertError::DecodeFormat {
            path: PathBuf::from("bad.png"),
            source: DecodeError::MissingPalette,
        };
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "Palette image has no color table");
    }
}
