//! Error types for qrstyle.
//!
//! Rendering itself never fails on unknown shape or gradient names (those fall
//! back to defaults). Errors come from the edges of the crate: encoding text
//! into a matrix, parsing design configuration, and reading or writing images.

use thiserror::Error;

/// Result type alias for qrstyle operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for qrstyle.
#[derive(Error, Debug)]
pub enum Error {
    /// The encoder rejected the data (too long for the version, invalid version, ...).
    #[error("QR encode error: {0}")]
    Encode(#[from] qrcode::types::QrError),

    /// The text contains characters the selected input mode cannot represent.
    #[error("The `{mode}` input mode is invalid for text")]
    InvalidInputMode { mode: &'static str },

    /// A color string could not be parsed.
    #[error("Invalid color: {0:?}")]
    InvalidColor(String),

    /// The design configuration is not valid JSON for a design.
    #[error("Design error: {0}")]
    Design(#[from] serde_json::Error),

    /// Image decoding or encoding failed.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// File system error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The drawing surface could not be allocated.
    #[error("Cannot allocate a {width}x{height} surface")]
    Surface { width: u32, height: u32 },
}
