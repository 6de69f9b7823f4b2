use crate::{Compressor, CompressorError};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use numeric_buffer::{ElementType, NumericBuffer};
use std::io::{Read, Write};

const NAME: &str = "zlib";

/// Error codes reported by [`ZlibCompressor`].
pub mod codes {
    /// The input is not a byte buffer produced by `compress`.
    pub const INVALID_INPUT: i32 = 1;
    /// The deflate stream could not be written or read.
    pub const STREAM: i32 = 2;
}

/// Deflate compressor over the little-endian bytes of a buffer.
///
/// The compressed buffer is `u8` and starts with a header recording the
/// element type and dims of the original, so decompression restores the
/// typed buffer exactly:
///
/// ```text
/// [element type: u8][dim count: u32 LE][dims: u64 LE ...][zlib stream]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZlibCompressor {
    level: u32,
}

impl ZlibCompressor {
    pub const DEFAULT_LEVEL: u32 = 6;

    /// Level is clamped to the zlib range 0 to 9.
    pub fn new(level: u32) -> Self {
        Self {
            level: level.min(9),
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }
}

impl Default for ZlibCompressor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LEVEL)
    }
}

impl Compressor for ZlibCompressor {
    fn name(&self) -> &str {
        NAME
    }

    fn compress(&self, input: &NumericBuffer) -> Result<NumericBuffer, CompressorError> {
        let mut output = encode_header(input.element_type(), input.dims());
        let mut encoder = ZlibEncoder::new(&mut output, Compression::new(self.level));
        encoder
            .write_all(&input.to_le_bytes())
            .map_err(|e| stream_error("compression failed", e))?;
        encoder
            .finish()
            .map_err(|e| stream_error("compression finalization failed", e))?;

        tracing::debug!(
            level = self.level,
            input_bytes = input.size_in_bytes(),
            output_bytes = output.len(),
            "zlib compressed buffer"
        );
        Ok(NumericBuffer::from_vec(output))
    }

    fn decompress(&self, input: &NumericBuffer) -> Result<NumericBuffer, CompressorError> {
        let bytes = input.as_slice::<u8>().ok_or_else(|| {
            CompressorError::new(
                NAME,
                codes::INVALID_INPUT,
                format!("expected a u8 buffer, got {}", input.element_type()),
            )
        })?;
        let (element_type, dims, stream) = decode_header(bytes)?;

        let mut decoder = ZlibDecoder::new(stream);
        let mut raw = Vec::new();
        decoder
            .read_to_end(&mut raw)
            .map_err(|e| stream_error("decompression failed", e))?;

        NumericBuffer::from_le_bytes(element_type, Some(dims), &raw)
            .map_err(|e| CompressorError::new(NAME, codes::INVALID_INPUT, e.to_string()))
    }
}

fn stream_error(context: &str, err: std::io::Error) -> CompressorError {
    CompressorError::new(NAME, codes::STREAM, format!("{context}: {err}"))
}

fn encode_header(element_type: ElementType, dims: &[usize]) -> Vec<u8> {
    let mut header = Vec::with_capacity(5 + dims.len() * 8);
    header.push(element_tag(element_type));
    header.extend_from_slice(&(dims.len() as u32).to_le_bytes());
    for &dim in dims {
        header.extend_from_slice(&(dim as u64).to_le_bytes());
    }
    header
}

fn decode_header(bytes: &[u8]) -> Result<(ElementType, Vec<usize>, &[u8]), CompressorError> {
    let invalid = |message: &str| CompressorError::new(NAME, codes::INVALID_INPUT, message);

    let (&tag, rest) = bytes.split_first().ok_or_else(|| invalid("missing header"))?;
    let element_type = ElementType::ALL
        .get(tag as usize)
        .copied()
        .ok_or_else(|| invalid("unknown element type tag"))?;

    if rest.len() < 4 {
        return Err(invalid("truncated dim count"));
    }
    let (count, mut rest) = rest.split_at(4);
    let count = u32::from_le_bytes([count[0], count[1], count[2], count[3]]) as usize;

    let mut dims = Vec::with_capacity(count.min(16));
    for _ in 0..count {
        if rest.len() < 8 {
            return Err(invalid("truncated dims"));
        }
        let (dim, tail) = rest.split_at(8);
        let mut raw = [0u8; 8];
        raw.copy_from_slice(dim);
        dims.push(u64::from_le_bytes(raw) as usize);
        rest = tail;
    }
    Ok((element_type, dims, rest))
}

fn element_tag(element_type: ElementType) -> u8 {
    ElementType::ALL
        .iter()
        .position(|&ty| ty == element_type)
        .unwrap_or_default() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_restores_type_and_shape() {
        let input = NumericBuffer::with_dims((0..64).map(|i| i as f64 * 0.5).collect(), vec![8, 8])
            .unwrap();
        let zlib = ZlibCompressor::default();
        let compressed = zlib.compress(&input).unwrap();
        assert_eq!(compressed.element_type(), ElementType::U8);
        let restored = zlib.decompress(&compressed).unwrap();
        assert_eq!(restored, input);
    }

    #[test]
    fn test_repetitive_data_shrinks() {
        let input = NumericBuffer::from_vec(vec![7u32; 4096]);
        let compressed = ZlibCompressor::new(9).compress(&input).unwrap();
        assert!(compressed.size_in_bytes() < input.size_in_bytes() / 10);
    }

    #[test]
    fn test_empty_buffer_roundtrip() {
        let input = NumericBuffer::empty(ElementType::I16);
        let zlib = ZlibCompressor::default();
        let restored = zlib.decompress(&zlib.compress(&input).unwrap()).unwrap();
        assert_eq!(restored, input);
    }

    #[test]
    fn test_rejects_non_byte_input() {
        let err = ZlibCompressor::default()
            .decompress(&NumericBuffer::from_vec(vec![1.0f32]))
            .unwrap_err();
        assert_eq!(err.plugin, "zlib");
        assert_eq!(err.code, codes::INVALID_INPUT);
    }

    #[test]
    fn test_rejects_corrupt_stream() {
        let input = NumericBuffer::from_vec(vec![1u16, 2, 3, 4]);
        let zlib = ZlibCompressor::default();
        let compressed = zlib.compress(&input).unwrap();
        // Keep the 13 byte header of a one-dimensional buffer, replace the stream.
        let mut bytes = compressed.as_slice::<u8>().unwrap()[..13].to_vec();
        bytes.extend_from_slice(&[0xFF; 16]);
        let err = zlib.decompress(&NumericBuffer::from_vec(bytes)).unwrap_err();
        assert_eq!(err.code, codes::STREAM);

        let err = zlib.decompress(&NumericBuffer::from_vec(Vec::<u8>::new())).unwrap_err();
        assert_eq!(err.code, codes::INVALID_INPUT);
    }

    #[test]
    fn test_flipped_dimension_bit_is_an_error() {
        let input = NumericBuffer::with_dims(vec![1.0f32; 64], vec![8, 8]).unwrap();
        let zlib = ZlibCompressor::default();
        let mut bytes = zlib.compress(&input).unwrap().as_slice::<u8>().unwrap().to_vec();
        // Byte 12 is the most significant byte of the first dimension.
        bytes[12] ^= 0x80;
        let err = zlib.decompress(&NumericBuffer::from_vec(bytes)).unwrap_err();
        assert_eq!(err.plugin, "zlib");
        assert_eq!(err.code, codes::INVALID_INPUT);
    }

    #[test]
    fn test_level_clamped() {
        assert_eq!(ZlibCompressor::new(42).level(), 9);
    }
}
