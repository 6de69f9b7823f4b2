//! Runtime-typed numeric buffers for noise-inject.
//!
//! This crate provides the buffer abstraction the injectors and
//! compressors exchange:
//!
//! - [`ElementType`] - Runtime tag for the element type
//! - [`Element`] - Trait tying each Rust primitive to its tag
//! - [`BufferData`] - Element storage, one variant per element type
//! - [`NumericBuffer`] - Storage plus a logical shape
//! - [`dispatch!`] - Run a generic body against the true element type
//!
//! # Example
//!
//! ```rust
//! use numeric_buffer::{dispatch, Element, NumericBuffer};
//!
//! fn sum<T: Element>(values: &[T]) -> f64 {
//!     values.iter().map(|v| v.to_f64()).sum()
//! }
//!
//! let buffer = NumericBuffer::from_vec(vec![1i16, 2, 3]);
//! let total = dispatch!(buffer.data(), values => sum(values));
//! assert_eq!(total, 6.0);
//! ```

pub mod buffer;
pub mod types;

pub use buffer::{BufferData, BufferError, NumericBuffer};
pub use types::{Element, ElementType, UnknownElementType};

/// Match a [`BufferData`] against every element type and evaluate `$body`
/// with `$values` bound to the typed vector of the active variant.
///
/// The body is instantiated once per element type, so it may call generic
/// functions whose bounds are satisfied by all ten primitives. Works on
/// both `&BufferData` and `&mut BufferData`.
#[macro_export]
macro_rules! dispatch {
    ($data:expr, $values:ident => $body:expr) => {
        match $data {
            $crate::BufferData::F32($values) => $body,
            $crate::BufferData::F64($values) => $body,
            $crate::BufferData::I8($values) => $body,
            $crate::BufferData::I16($values) => $body,
            $crate::BufferData::I32($values) => $body,
            $crate::BufferData::I64($values) => $body,
            $crate::BufferData::U8($values) => $body,
            $crate::BufferData::U16($values) => $body,
            $crate::BufferData::U32($values) => $body,
            $crate::BufferData::U64($values) => $body,
        }
    };
}
