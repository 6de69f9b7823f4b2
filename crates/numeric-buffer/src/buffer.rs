//! Runtime-typed numeric storage.

use crate::types::{Element, ElementType};

/// Error type for buffer construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    /// Dimensions do not describe the number of elements supplied
    #[error("dimensions {dims:?} describe {expected} elements but {actual} were supplied")]
    ShapeMismatch {
        dims: Vec<usize>,
        expected: usize,
        actual: usize,
    },

    /// The product of the dimensions does not fit in `usize`
    #[error("dimensions {dims:?} describe more elements than fit in memory")]
    ShapeOverflow { dims: Vec<usize> },

    /// Raw byte input is not a whole number of elements
    #[error("{len} bytes is not a multiple of the {element_type} element size ({size})")]
    TruncatedElement {
        element_type: ElementType,
        len: usize,
        size: usize,
    },
}

/// Element storage, one variant per [`ElementType`].
#[derive(Debug, Clone, PartialEq)]
pub enum BufferData {
    F32(Vec<f32>),
    F64(Vec<f64>),
    I8(Vec<i8>),
    I16(Vec<i16>),
    I32(Vec<i32>),
    I64(Vec<i64>),
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
    U64(Vec<u64>),
}

impl BufferData {
    /// Empty storage of the given element type.
    pub fn empty(element_type: ElementType) -> Self {
        match element_type {
            ElementType::F32 => BufferData::F32(Vec::new()),
            ElementType::F64 => BufferData::F64(Vec::new()),
            ElementType::I8 => BufferData::I8(Vec::new()),
            ElementType::I16 => BufferData::I16(Vec::new()),
            ElementType::I32 => BufferData::I32(Vec::new()),
            ElementType::I64 => BufferData::I64(Vec::new()),
            ElementType::U8 => BufferData::U8(Vec::new()),
            ElementType::U16 => BufferData::U16(Vec::new()),
            ElementType::U32 => BufferData::U32(Vec::new()),
            ElementType::U64 => BufferData::U64(Vec::new()),
        }
    }

    pub fn element_type(&self) -> ElementType {
        crate::dispatch!(self, values => element_type_of(values.as_slice()))
    }

    pub fn len(&self) -> usize {
        crate::dispatch!(self, values => values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Little-endian encoding of every element, in index order.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        crate::dispatch!(self, values => encode_le(values))
    }

    /// Decode storage from little-endian bytes.
    pub fn from_le_bytes(element_type: ElementType, bytes: &[u8]) -> Result<Self, BufferError> {
        let size = element_type.size_in_bytes();
        if bytes.len() % size != 0 {
            return Err(BufferError::TruncatedElement {
                element_type,
                len: bytes.len(),
                size,
            });
        }
        Ok(decode_le(element_type, bytes))
    }
}

fn element_type_of<T: Element>(_values: &[T]) -> ElementType {
    T::ELEMENT_TYPE
}

fn encode_le<T: Element>(values: &[T]) -> Vec<u8> {
    let mut out = Vec::with_capacity(values.len() * T::ELEMENT_TYPE.size_in_bytes());
    for value in values {
        value.write_le(&mut out);
    }
    out
}

fn decode_typed<T: Element>(bytes: &[u8]) -> BufferData {
    let values = bytes
        .chunks_exact(T::ELEMENT_TYPE.size_in_bytes())
        .map(T::read_le)
        .collect();
    T::into_data(values)
}

// Trailing bytes that do not form a whole element are dropped; callers
// validate the length first.
fn decode_le(element_type: ElementType, bytes: &[u8]) -> BufferData {
    match element_type {
        ElementType::F32 => decode_typed::<f32>(bytes),
        ElementType::F64 => decode_typed::<f64>(bytes),
        ElementType::I8 => decode_typed::<i8>(bytes),
        ElementType::I16 => decode_typed::<i16>(bytes),
        ElementType::I32 => decode_typed::<i32>(bytes),
        ElementType::I64 => decode_typed::<i64>(bytes),
        ElementType::U8 => decode_typed::<u8>(bytes),
        ElementType::U16 => decode_typed::<u16>(bytes),
        ElementType::U32 => decode_typed::<u32>(bytes),
        ElementType::U64 => decode_typed::<u64>(bytes),
    }
}

/// A runtime-typed, multi-dimensional numeric buffer.
///
/// Elements are stored contiguously in index order; `dims` only describes
/// the logical shape. A buffer with no dimensions holds no elements.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericBuffer {
    dims: Vec<usize>,
    data: BufferData,
}

impl NumericBuffer {
    /// Create a buffer, checking that `dims` describes `data`.
    pub fn new(dims: Vec<usize>, data: BufferData) -> Result<Self, BufferError> {
        let Some(expected) = element_count(&dims) else {
            return Err(BufferError::ShapeOverflow { dims });
        };
        if expected != data.len() {
            return Err(BufferError::ShapeMismatch {
                dims,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { dims, data })
    }

    /// One-dimensional buffer over `values`.
    pub fn from_vec<T: Element>(values: Vec<T>) -> Self {
        let dims = if values.is_empty() {
            Vec::new()
        } else {
            vec![values.len()]
        };
        Self {
            dims,
            data: T::into_data(values),
        }
    }

    /// Buffer over `values` with an explicit shape.
    pub fn with_dims<T: Element>(values: Vec<T>, dims: Vec<usize>) -> Result<Self, BufferError> {
        Self::new(dims, T::into_data(values))
    }

    /// Empty buffer of the given element type.
    pub fn empty(element_type: ElementType) -> Self {
        Self {
            dims: Vec::new(),
            data: BufferData::empty(element_type),
        }
    }

    /// Decode a buffer from raw little-endian bytes.
    ///
    /// When `dims` is `None` the result is one-dimensional.
    pub fn from_le_bytes(
        element_type: ElementType,
        dims: Option<Vec<usize>>,
        bytes: &[u8],
    ) -> Result<Self, BufferError> {
        let data = BufferData::from_le_bytes(element_type, bytes)?;
        match dims {
            Some(dims) => Self::new(dims, data),
            None => {
                let dims = if data.is_empty() {
                    Vec::new()
                } else {
                    vec![data.len()]
                };
                Ok(Self { dims, data })
            }
        }
    }

    pub fn element_type(&self) -> ElementType {
        self.data.element_type()
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn num_elements(&self) -> usize {
        self.data.len()
    }

    pub fn size_in_bytes(&self) -> usize {
        self.num_elements() * self.element_type().size_in_bytes()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &BufferData {
        &self.data
    }

    /// Mutable access to the elements. The element count cannot change
    /// through this reference without breaking the shape, so only
    /// in-place mutation should be performed.
    pub fn data_mut(&mut self) -> &mut BufferData {
        &mut self.data
    }

    pub fn into_parts(self) -> (Vec<usize>, BufferData) {
        (self.dims, self.data)
    }

    /// Typed view of the elements, if `T` matches the element type.
    pub fn as_slice<T: Element>(&self) -> Option<&[T]> {
        T::slice(&self.data)
    }

    pub fn as_mut_slice<T: Element>(&mut self) -> Option<&mut [T]> {
        T::slice_mut(&mut self.data)
    }

    /// Little-endian bytes of every element, in index order.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.data.to_le_bytes()
    }

    /// Run `f` over the byte representation of the elements.
    ///
    /// `u8` buffers are handed out directly. Wider element types are
    /// encoded little-endian, mutated, and decoded back, so the element
    /// type and shape are preserved either way.
    pub fn with_bytes_mut<R>(&mut self, f: impl FnOnce(&mut [u8]) -> R) -> R {
        if let BufferData::U8(bytes) = &mut self.data {
            return f(bytes);
        }
        let element_type = self.element_type();
        let mut bytes = self.data.to_le_bytes();
        let result = f(&mut bytes);
        self.data = decode_le(element_type, &bytes);
        result
    }

    /// Largest absolute element-wise difference against `other`, widened to `f64`.
    ///
    /// Returns `None` when the element types or element counts differ.
    pub fn max_abs_difference(&self, other: &NumericBuffer) -> Option<f64> {
        if self.element_type() != other.element_type() || self.num_elements() != other.num_elements()
        {
            return None;
        }
        crate::dispatch!(&self.data, values => max_abs_difference(values, other))
    }
}

fn max_abs_difference<T: Element>(values: &[T], other: &NumericBuffer) -> Option<f64> {
    let others = other.as_slice::<T>()?;
    Some(
        values
            .iter()
            .zip(others)
            .map(|(a, b)| (a.to_f64() - b.to_f64()).abs())
            .fold(0.0, f64::max),
    )
}

fn element_count(dims: &[usize]) -> Option<usize> {
    if dims.is_empty() {
        return Some(0);
    }
    dims.iter()
        .try_fold(1usize, |count, &dim| count.checked_mul(dim))
}
