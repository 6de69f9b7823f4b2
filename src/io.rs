//! Raw buffer files.

use anyhow::Context;
use numeric_buffer::{ElementType, NumericBuffer};
use std::path::Path;

/// Read a raw little-endian file as a buffer of `element_type`.
pub fn read_buffer(
    path: &Path,
    element_type: ElementType,
    dims: Option<Vec<usize>>,
) -> anyhow::Result<NumericBuffer> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read input file: {path:?}"))?;
    let buffer = NumericBuffer::from_le_bytes(element_type, dims, &bytes)
        .with_context(|| format!("Failed to decode {path:?} as {element_type} elements"))?;
    tracing::debug!(
        path = %path.display(),
        element_type = %element_type,
        dims = ?buffer.dims(),
        "read input buffer"
    );
    Ok(buffer)
}

/// Write the little-endian bytes of `buffer` to `path`.
pub fn write_buffer(path: &Path, buffer: &NumericBuffer) -> anyhow::Result<()> {
    std::fs::write(path, buffer.to_le_bytes())
        .with_context(|| format!("Failed to write output file: {path:?}"))?;
    tracing::debug!(
        path = %path.display(),
        element_type = %buffer.element_type(),
        bytes = buffer.size_in_bytes(),
        "wrote output buffer"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("values.bin");
        let buffer = NumericBuffer::with_dims(vec![1i32, -2, 3, -4], vec![2, 2]).unwrap();
        write_buffer(&path, &buffer).unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 16);
        let restored = read_buffer(&path, ElementType::I32, Some(vec![2, 2])).unwrap();
        assert_eq!(restored, buffer);
    }

    #[test]
    fn test_read_rejects_partial_element() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), [0u8; 7]).unwrap();
        let err = read_buffer(file.path(), ElementType::F64, None).unwrap_err();
        assert!(format!("{err:#}").contains("not a multiple"));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_buffer(&dir.path().join("missing.bin"), ElementType::U8, None).unwrap_err();
        assert!(err.to_string().contains("Failed to read input file"));
    }
}
