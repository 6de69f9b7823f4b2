use crate::{Compressor, CompressorError};
use numeric_buffer::NumericBuffer;

/// Returns its input unchanged in both directions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoopCompressor;

impl Compressor for NoopCompressor {
    fn name(&self) -> &str {
        "noop"
    }

    fn compress(&self, input: &NumericBuffer) -> Result<NumericBuffer, CompressorError> {
        Ok(input.clone())
    }

    fn decompress(&self, input: &NumericBuffer) -> Result<NumericBuffer, CompressorError> {
        Ok(input.clone())
    }
}
