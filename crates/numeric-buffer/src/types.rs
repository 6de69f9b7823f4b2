//! Element types for the noise-inject buffers.
//!
//! This module defines `ElementType`, the closed set of numeric element
//! types a buffer can carry, and the `Element` trait that connects each
//! Rust primitive to its runtime tag.

use crate::buffer::BufferData;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Runtime tag for the element type of a [`NumericBuffer`](crate::NumericBuffer).
///
/// # YAML Format
///
/// Canonical names follow the Rust primitive names:
/// ```yaml
/// dtype: f32
/// dtype: u16
/// ```
///
/// The C-style aliases `float`, `double`, `int8` ... `uint64` are accepted
/// when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// 32-bit IEEE 754 floating point
    F32,
    /// 64-bit IEEE 754 floating point
    F64,
    /// 8-bit signed integer
    I8,
    /// 16-bit signed integer
    I16,
    /// 32-bit signed integer
    I32,
    /// 64-bit signed integer
    I64,
    /// 8-bit unsigned integer
    U8,
    /// 16-bit unsigned integer
    U16,
    /// 32-bit unsigned integer
    U32,
    /// 64-bit unsigned integer
    U64,
}

impl ElementType {
    /// Every supported element type, floating types first.
    pub const ALL: [ElementType; 10] = [
        ElementType::F32,
        ElementType::F64,
        ElementType::I8,
        ElementType::I16,
        ElementType::I32,
        ElementType::I64,
        ElementType::U8,
        ElementType::U16,
        ElementType::U32,
        ElementType::U64,
    ];

    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::F32 => "f32",
            ElementType::F64 => "f64",
            ElementType::I8 => "i8",
            ElementType::I16 => "i16",
            ElementType::I32 => "i32",
            ElementType::I64 => "i64",
            ElementType::U8 => "u8",
            ElementType::U16 => "u16",
            ElementType::U32 => "u32",
            ElementType::U64 => "u64",
        }
    }

    /// Size of one element in bytes.
    pub fn size_in_bytes(&self) -> usize {
        match self {
            ElementType::I8 | ElementType::U8 => 1,
            ElementType::I16 | ElementType::U16 => 2,
            ElementType::F32 | ElementType::I32 | ElementType::U32 => 4,
            ElementType::F64 | ElementType::I64 | ElementType::U64 => 8,
        }
    }

    pub fn is_floating(&self) -> bool {
        matches!(self, ElementType::F32 | ElementType::F64)
    }

    pub fn is_signed(&self) -> bool {
        !matches!(
            self,
            ElementType::U8 | ElementType::U16 | ElementType::U32 | ElementType::U64
        )
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a dtype string names no supported element type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown element type: {0}")]
pub struct UnknownElementType(pub String);

impl FromStr for ElementType {
    type Err = UnknownElementType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "f32" | "float" => Ok(ElementType::F32),
            "f64" | "double" => Ok(ElementType::F64),
            "i8" | "int8" => Ok(ElementType::I8),
            "i16" | "int16" => Ok(ElementType::I16),
            "i32" | "int32" | "int" => Ok(ElementType::I32),
            "i64" | "int64" => Ok(ElementType::I64),
            "u8" | "uint8" | "byte" => Ok(ElementType::U8),
            "u16" | "uint16" => Ok(ElementType::U16),
            "u32" | "uint32" => Ok(ElementType::U32),
            "u64" | "uint64" => Ok(ElementType::U64),
            _ => Err(UnknownElementType(s.to_string())),
        }
    }
}

impl Serialize for ElementType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ElementType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// A Rust primitive that can live in a [`NumericBuffer`](crate::NumericBuffer).
///
/// Implemented for exactly the primitives listed in [`ElementType`]; the
/// set is closed so that runtime dispatch can be an exhaustive match.
pub trait Element: Copy + fmt::Debug + PartialEq + Send + Sync + 'static {
    /// Runtime tag for this primitive.
    const ELEMENT_TYPE: ElementType;

    /// Wrap a vector of this primitive into the matching storage variant.
    fn into_data(values: Vec<Self>) -> BufferData;

    /// Borrow the storage as a slice of this primitive, if the tags match.
    fn slice(data: &BufferData) -> Option<&[Self]>;

    /// Mutably borrow the storage as a slice of this primitive, if the tags match.
    fn slice_mut(data: &mut BufferData) -> Option<&mut [Self]>;

    /// Append the little-endian encoding of `self`.
    fn write_le(self, out: &mut Vec<u8>);

    /// Decode from exactly `ELEMENT_TYPE.size_in_bytes()` little-endian bytes.
    fn read_le(bytes: &[u8]) -> Self;

    /// Lossy widening used for error reporting.
    fn to_f64(self) -> f64;
}

macro_rules! impl_element {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Element for $ty {
                const ELEMENT_TYPE: ElementType = ElementType::$variant;

                fn into_data(values: Vec<Self>) -> BufferData {
                    BufferData::$variant(values)
                }

                fn slice(data: &BufferData) -> Option<&[Self]> {
                    match data {
                        BufferData::$variant(values) => Some(values.as_slice()),
                        _ => None,
                    }
                }

                fn slice_mut(data: &mut BufferData) -> Option<&mut [Self]> {
                    match data {
                        BufferData::$variant(values) => Some(values.as_mut_slice()),
                        _ => None,
                    }
                }

                fn write_le(self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&self.to_le_bytes());
                }

                fn read_le(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$ty>()];
                    raw.copy_from_slice(bytes);
                    <$ty>::from_le_bytes(raw)
                }

                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_element! {
    f32 => F32,
    f64 => F64,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_and_alias_names() {
        assert_eq!("f32".parse::<ElementType>().unwrap(), ElementType::F32);
        assert_eq!("double".parse::<ElementType>().unwrap(), ElementType::F64);
        assert_eq!("UINT16".parse::<ElementType>().unwrap(), ElementType::U16);
        assert_eq!("int64".parse::<ElementType>().unwrap(), ElementType::I64);
        assert!("complex64".parse::<ElementType>().is_err());
    }

    #[test]
    fn test_display_roundtrips_through_parse() {
        for ty in ElementType::ALL {
            assert_eq!(ty.to_string().parse::<ElementType>().unwrap(), ty);
        }
    }

    #[test]
    fn test_sizes_match_primitives() {
        assert_eq!(ElementType::F32.size_in_bytes(), std::mem::size_of::<f32>());
        assert_eq!(ElementType::I16.size_in_bytes(), std::mem::size_of::<i16>());
        assert_eq!(ElementType::U64.size_in_bytes(), std::mem::size_of::<u64>());
        assert!(ElementType::F64.is_floating());
        assert!(!ElementType::U8.is_signed());
        assert!(ElementType::I8.is_signed());
    }

    #[test]
    fn test_yaml_serde() {
        let ty: ElementType = serde_yaml::from_str("float").unwrap();
        assert_eq!(ty, ElementType::F32);
        let yaml = serde_yaml::to_string(&ElementType::U32).unwrap();
        assert_eq!(yaml.trim(), "u32");
    }

    #[test]
    fn test_le_encoding() {
        let mut out = Vec::new();
        0x0102_i16.write_le(&mut out);
        assert_eq!(out, vec![0x02, 0x01]);
        assert_eq!(i16::read_le(&out), 0x0102);
        assert_eq!(<f32 as Element>::ELEMENT_TYPE, ElementType::F32);
    }
}
