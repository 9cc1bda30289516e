//! Capture error types.

use std::path::PathBuf;

/// Errors from encoding or decoding ASCII PPM data, or from building a frame.
#[derive(Debug, thiserror::Error)]
pub enum PpmError {
    /// Underlying reader or writer failed.
    #[error("ppm i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// The magic number was not `P3`.
    #[error("expected magic 'P3', found '{0}'")]
    BadMagic(String),

    /// A header or sample token was missing or not a number.
    #[error("malformed ppm {what}: {token:?}")]
    Malformed { what: &'static str, token: Option<String> },

    /// Only 8-bit samples are supported.
    #[error("unsupported max value {0}, expected 255")]
    UnsupportedMaxValue(u32),

    /// `3 * width * height` does not fit in memory addressing.
    #[error("{width}x{height} frame is too large")]
    TooLarge { width: u32, height: u32 },

    /// Pixel data length does not match the dimensions.
    #[error("expected {expected} bytes for {width}x{height}, got {actual}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// Errors from saving a captured frame to disk.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// The output file could not be created.
    #[error("failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Encoding or writing the image failed.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: PpmError,
    },

    /// The frame has no pixels.
    #[error("cannot capture an empty {width}x{height} frame")]
    EmptyFrame { width: u32, height: u32 },
}
