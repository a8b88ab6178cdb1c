use std::fmt;
use std::str::FromStr;

use num_traits::AsPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::BalanceError;

/// Element type of an image buffer.
///
/// Resolved once per call from the Rust element type (or from an explicit
/// descriptor for raw buffers) and never re-inferred afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
}

impl ElementType {
    pub const ALL: [ElementType; 10] = [
        Self::UInt8,
        Self::UInt16,
        Self::UInt32,
        Self::UInt64,
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::Float32,
        Self::Float64,
    ];

    pub fn is_float(self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    pub fn is_integer(self) -> bool {
        !self.is_float()
    }

    /// Size of one element in bytes.
    pub fn size_bytes(self) -> usize {
        match self {
            Self::UInt8 | Self::Int8 => 1,
            Self::UInt16 | Self::Int16 => 2,
            Self::UInt32 | Self::Int32 | Self::Float32 => 4,
            Self::UInt64 | Self::Int64 | Self::Float64 => 8,
        }
    }

    /// Largest representable value for integer types, `None` for floats.
    ///
    /// Balanced integer output is scaled into `[0, max_value]`.
    pub fn max_value(self) -> Option<f64> {
        match self {
            Self::UInt8 => Some(u8::MAX as f64),
            Self::UInt16 => Some(u16::MAX as f64),
            Self::UInt32 => Some(u32::MAX as f64),
            Self::UInt64 => Some(u64::MAX as f64),
            Self::Int8 => Some(i8::MAX as f64),
            Self::Int16 => Some(i16::MAX as f64),
            Self::Int32 => Some(i32::MAX as f64),
            Self::Int64 => Some(i64::MAX as f64),
            Self::Float32 | Self::Float64 => None,
        }
    }

    /// Descriptor name, e.g. `"uint8"` or `"float32"`.
    pub fn name(self) -> &'static str {
        match self {
            Self::UInt8 => "uint8",
            Self::UInt16 => "uint16",
            Self::UInt32 => "uint32",
            Self::UInt64 => "uint64",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElementType {
    type Err = BalanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uint8" | "u8" => Ok(Self::UInt8),
            "uint16" | "u16" => Ok(Self::UInt16),
            "uint32" | "u32" => Ok(Self::UInt32),
            "uint64" | "u64" => Ok(Self::UInt64),
            "int8" | "i8" => Ok(Self::Int8),
            "int16" | "i16" => Ok(Self::Int16),
            "int32" | "i32" => Ok(Self::Int32),
            "int64" | "i64" => Ok(Self::Int64),
            "float32" | "f32" => Ok(Self::Float32),
            "float64" | "f64" => Ok(Self::Float64),
            _ => Err(BalanceError::UnsupportedElementType(s.to_string())),
        }
    }
}

/// A pixel value type that can be balanced.
pub trait Element: Copy + Send + Sync + fmt::Debug + 'static {
    const TYPE: ElementType;

    fn to_f64(self) -> f64;

    /// Conversion from `f64`; out-of-range values saturate for integer types.
    fn from_f64(value: f64) -> Self;

    fn is_finite(self) -> bool;
}

macro_rules! impl_integer_element {
    ($($ty:ty => $tag:ident),* $(,)?) => {
        $(
            impl Element for $ty {
                const TYPE: ElementType = ElementType::$tag;

                fn to_f64(self) -> f64 {
                    AsPrimitive::<f64>::as_(self)
                }

                fn from_f64(value: f64) -> Self {
                    AsPrimitive::<$ty>::as_(value)
                }

                fn is_finite(self) -> bool {
                    true
                }
            }
        )*
    };
}

macro_rules! impl_float_element {
    ($($ty:ty => $tag:ident),* $(,)?) => {
        $(
            impl Element for $ty {
                const TYPE: ElementType = ElementType::$tag;

                fn to_f64(self) -> f64 {
                    AsPrimitive::<f64>::as_(self)
                }

                fn from_f64(value: f64) -> Self {
                    AsPrimitive::<$ty>::as_(value)
                }

                fn is_finite(self) -> bool {
                    <$ty>::is_finite(self)
                }
            }
        )*
    };
}

impl_integer_element!(
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
);

impl_float_element!(f32 => Float32, f64 => Float64);
