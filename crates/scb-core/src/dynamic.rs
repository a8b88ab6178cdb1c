use byteorder::{BigEndian, ByteOrder, LittleEndian};
use ndarray::{ArrayD, IxDyn};
use serde::{Deserialize, Serialize};

use crate::array::element_count;
use crate::balance::{BalanceParams, ColorBalancer};
use crate::element::ElementType;
use crate::error::{BalanceError, Result};

/// Byte order of a raw pixel buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Endianness {
    #[default]
    Little,
    Big,
}

/// An image whose element type is only known at runtime.
#[derive(Clone, Debug, PartialEq)]
pub enum DynArray {
    UInt8(ArrayD<u8>),
    UInt16(ArrayD<u16>),
    UInt32(ArrayD<u32>),
    UInt64(ArrayD<u64>),
    Int8(ArrayD<i8>),
    Int16(ArrayD<i16>),
    Int32(ArrayD<i32>),
    Int64(ArrayD<i64>),
    Float32(ArrayD<f32>),
    Float64(ArrayD<f64>),
}

macro_rules! for_each_variant {
    ($value:expr, $arr:ident => $body:expr) => {
        match $value {
            DynArray::UInt8($arr) => $body,
            DynArray::UInt16($arr) => $body,
            DynArray::UInt32($arr) => $body,
            DynArray::UInt64($arr) => $body,
            DynArray::Int8($arr) => $body,
            DynArray::Int16($arr) => $body,
            DynArray::Int32($arr) => $body,
            DynArray::Int64($arr) => $body,
            DynArray::Float32($arr) => $body,
            DynArray::Float64($arr) => $body,
        }
    };
}

macro_rules! map_variant {
    ($value:expr, $arr:ident => $body:expr) => {
        match $value {
            DynArray::UInt8($arr) => DynArray::UInt8($body),
            DynArray::UInt16($arr) => DynArray::UInt16($body),
            DynArray::UInt32($arr) => DynArray::UInt32($body),
            DynArray::UInt64($arr) => DynArray::UInt64($body),
            DynArray::Int8($arr) => DynArray::Int8($body),
            DynArray::Int16($arr) => DynArray::Int16($body),
            DynArray::Int32($arr) => DynArray::Int32($body),
            DynArray::Int64($arr) => DynArray::Int64($body),
            DynArray::Float32($arr) => DynArray::Float32($body),
            DynArray::Float64($arr) => DynArray::Float64($body),
        }
    };
}

impl DynArray {
    pub fn element_type(&self) -> ElementType {
        match self {
            Self::UInt8(_) => ElementType::UInt8,
            Self::UInt16(_) => ElementType::UInt16,
            Self::UInt32(_) => ElementType::UInt32,
            Self::UInt64(_) => ElementType::UInt64,
            Self::Int8(_) => ElementType::Int8,
            Self::Int16(_) => ElementType::Int16,
            Self::Int32(_) => ElementType::Int32,
            Self::Int64(_) => ElementType::Int64,
            Self::Float32(_) => ElementType::Float32,
            Self::Float64(_) => ElementType::Float64,
        }
    }

    pub fn shape(&self) -> &[usize] {
        for_each_variant!(self, a => a.shape())
    }

    pub fn len(&self) -> usize {
        for_each_variant!(self, a => a.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Balance in the array's own element type.
    pub fn balance(&self, params: &BalanceParams) -> Result<Self> {
        let balancer = ColorBalancer::new(params.clone())?;
        Ok(map_variant!(self, a => balancer.apply(a)?))
    }

    /// Decode a raw row-major buffer described by `dtype`, `shape` and `order`.
    ///
    /// `dtype` takes the same names as [`ElementType`]'s `FromStr`, e.g. `"uint16"`.
    pub fn from_bytes(
        bytes: &[u8],
        shape: &[usize],
        dtype: &str,
        order: Endianness,
    ) -> Result<Self> {
        let element_type: ElementType = dtype.parse()?;
        let mismatch = |expected: usize| BalanceError::ShapeMismatch {
            shape: shape.to_vec(),
            expected,
            actual: bytes.len(),
        };
        let count = element_count(shape).ok_or_else(|| mismatch(usize::MAX))?;
        let expected = count
            .checked_mul(element_type.size_bytes())
            .ok_or_else(|| mismatch(usize::MAX))?;
        if bytes.len() != expected {
            return Err(mismatch(expected));
        }

        let dim = IxDyn(shape);
        let array = match order {
            Endianness::Little => decode::<LittleEndian>(bytes, dim, element_type, count),
            Endianness::Big => decode::<BigEndian>(bytes, dim, element_type, count),
        };
        array.map_err(|_| mismatch(expected))
    }

    /// Encode to a raw row-major buffer in `order`.
    pub fn to_bytes(&self, order: Endianness) -> Vec<u8> {
        match order {
            Endianness::Little => encode::<LittleEndian>(self),
            Endianness::Big => encode::<BigEndian>(self),
        }
    }
}

fn decode<B: ByteOrder>(
    bytes: &[u8],
    dim: IxDyn,
    element_type: ElementType,
    count: usize,
) -> std::result::Result<DynArray, ndarray::ShapeError> {
    macro_rules! read_into {
        ($ty:ty, $read:ident, $variant:ident) => {{
            let mut values = vec![<$ty>::default(); count];
            B::$read(bytes, &mut values);
            DynArray::$variant(ArrayD::from_shape_vec(dim, values)?)
        }};
    }

    Ok(match element_type {
        ElementType::UInt8 => DynArray::UInt8(ArrayD::from_shape_vec(dim, bytes.to_vec())?),
        ElementType::Int8 => {
            let values = bytes.iter().map(|&b| b as i8).collect();
            DynArray::Int8(ArrayD::from_shape_vec(dim, values)?)
        }
        ElementType::UInt16 => read_into!(u16, read_u16_into, UInt16),
        ElementType::UInt32 => read_into!(u32, read_u32_into, UInt32),
        ElementType::UInt64 => read_into!(u64, read_u64_into, UInt64),
        ElementType::Int16 => read_into!(i16, read_i16_into, Int16),
        ElementType::Int32 => read_into!(i32, read_i32_into, Int32),
        ElementType::Int64 => read_into!(i64, read_i64_into, Int64),
        ElementType::Float32 => read_into!(f32, read_f32_into, Float32),
        ElementType::Float64 => read_into!(f64, read_f64_into, Float64),
    })
}

fn encode<B: ByteOrder>(array: &DynArray) -> Vec<u8> {
    macro_rules! write_from {
        ($a:expr, $write:ident, $size:expr) => {{
            let values: Vec<_> = $a.iter().copied().collect();
            let mut out = vec![0u8; values.len() * $size];
            B::$write(&values, &mut out);
            out
        }};
    }

    match array {
        DynArray::UInt8(a) => a.iter().copied().collect(),
        DynArray::Int8(a) => a.iter().map(|&v| v as u8).collect(),
        DynArray::UInt16(a) => write_from!(a, write_u16_into, 2),
        DynArray::UInt32(a) => write_from!(a, write_u32_into, 4),
        DynArray::UInt64(a) => write_from!(a, write_u64_into, 8),
        DynArray::Int16(a) => write_from!(a, write_i16_into, 2),
        DynArray::Int32(a) => write_from!(a, write_i32_into, 4),
        DynArray::Int64(a) => write_from!(a, write_i64_into, 8),
        DynArray::Float32(a) => write_from!(a, write_f32_into, 4),
        DynArray::Float64(a) => write_from!(a, write_f64_into, 8),
    }
}

macro_rules! impl_from_array {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<ArrayD<$ty>> for DynArray {
                fn from(array: ArrayD<$ty>) -> Self {
                    DynArray::$variant(array)
                }
            }
        )*
    };
}

impl_from_array!(
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    f32 => Float32,
    f64 => Float64,
);
