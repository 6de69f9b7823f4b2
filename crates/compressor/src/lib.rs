//! Compressor interface for noise-inject.
//!
//! A [`Compressor`] maps a [`NumericBuffer`] to a compressed buffer and
//! back. Injectors wrap a compressor and corrupt data before or after it
//! runs, so the interface is shared by real compressors and by injectors.

mod noop;
mod zlib;

pub use noop::NoopCompressor;
pub use zlib::ZlibCompressor;

use numeric_buffer::NumericBuffer;
use std::fmt;

/// Error reported by a compressor.
///
/// `plugin` names the compressor that failed and `code` is its numeric
/// error code, so callers can forward a downstream failure unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{plugin}: {message} (code {code})")]
pub struct CompressorError {
    pub plugin: String,
    pub code: i32,
    pub message: String,
}

impl CompressorError {
    pub fn new(plugin: impl Into<String>, code: i32, message: impl Into<String>) -> Self {
        Self {
            plugin: plugin.into(),
            code,
            message: message.into(),
        }
    }
}

/// Buffer to buffer compressor.
pub trait Compressor: Send + Sync + fmt::Debug {
    /// Registry name of the compressor.
    fn name(&self) -> &str;

    fn compress(&self, input: &NumericBuffer) -> Result<NumericBuffer, CompressorError>;

    fn decompress(&self, input: &NumericBuffer) -> Result<NumericBuffer, CompressorError>;
}

impl<C: Compressor + ?Sized> Compressor for Box<C> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn compress(&self, input: &NumericBuffer) -> Result<NumericBuffer, CompressorError> {
        (**self).compress(input)
    }

    fn decompress(&self, input: &NumericBuffer) -> Result<NumericBuffer, CompressorError> {
        (**self).decompress(input)
    }
}
