use ndarray::{ArrayD, IxDyn};

use scb_core::balance::BalanceParams;
use scb_core::dynamic::{DynArray, Endianness};
use scb_core::element::ElementType;
use scb_core::error::{BalanceError, ErrorKind};

#[test]
fn test_decode_u16_little_and_big_endian() {
    let bytes = [1u8, 0, 0, 1];

    let le = DynArray::from_bytes(&bytes, &[2], "uint16", Endianness::Little).unwrap();
    match le {
        DynArray::UInt16(a) => assert_eq!(a.as_slice().unwrap(), &[1, 256]),
        other => panic!("expected UInt16, got {:?}", other.element_type()),
    }

    let be = DynArray::from_bytes(&bytes, &[2], "u16", Endianness::Big).unwrap();
    match be {
        DynArray::UInt16(a) => assert_eq!(a.as_slice().unwrap(), &[256, 1]),
        other => panic!("expected UInt16, got {:?}", other.element_type()),
    }
}

#[test]
fn test_decode_signed_bytes() {
    let arr = DynArray::from_bytes(&[0xff, 0x01], &[2], "int8", Endianness::default()).unwrap();
    assert_eq!(arr.element_type(), ElementType::Int8);
    assert_eq!(arr, DynArray::Int8(ArrayD::from_shape_vec(IxDyn(&[2]), vec![-1, 1]).unwrap()));
}

#[test]
fn test_float32_big_endian_round_trip() {
    let values = vec![0.0f32, 0.25, -1.5, 1e6];
    let arr = DynArray::from(ArrayD::from_shape_vec(IxDyn(&[2, 2]), values).unwrap());
    let bytes = arr.to_bytes(Endianness::Big);
    assert_eq!(bytes.len(), 16);
    assert_eq!(&bytes[4..8], &0.25f32.to_be_bytes());
    let back = DynArray::from_bytes(&bytes, &[2, 2], "float32", Endianness::Big).unwrap();
    assert_eq!(back, arr);
}

#[test]
fn test_balance_preserves_runtime_type() {
    let bytes = [0u8, 50, 100, 150, 200, 250];
    let arr = DynArray::from_bytes(&bytes, &[2, 3], "uint8", Endianness::Little).unwrap();
    let out = arr.balance(&BalanceParams::new(0.0, 0.0)).unwrap();
    assert_eq!(out.element_type(), ElementType::UInt8);
    assert_eq!(out.shape(), &[2, 3]);
    assert_eq!(out.to_bytes(Endianness::Little), vec![0, 51, 102, 153, 204, 255]);
}

#[test]
fn test_balance_i32_raw_buffer() {
    let values: Vec<i32> = (0..100).map(|v| v * 1000 - 50_000).collect();
    let arr = DynArray::from(ArrayD::from_shape_vec(IxDyn(&[10, 10]), values).unwrap());
    let out = arr.balance(&BalanceParams::default()).unwrap();
    match out {
        DynArray::Int32(a) => {
            assert!(a.iter().all(|&v| (0..=i32::MAX).contains(&v)));
            assert_eq!(a[[0, 0].as_slice()], 0);
            assert_eq!(a[[9, 9].as_slice()], i32::MAX);
        }
        other => panic!("expected Int32, got {:?}", other.element_type()),
    }
}

#[test]
fn test_unsupported_dtype() {
    let err = DynArray::from_bytes(&[0, 1], &[2], "bool", Endianness::Little).unwrap_err();
    assert!(matches!(err, BalanceError::UnsupportedElementType(ref s) if s == "bool"));
    assert_eq!(err.kind(), ErrorKind::Input);
}

#[test]
fn test_byte_length_mismatch() {
    let err = DynArray::from_bytes(&[0, 1, 2], &[2], "uint16", Endianness::Little).unwrap_err();
    assert!(matches!(
        err,
        BalanceError::ShapeMismatch {
            expected: 4,
            actual: 3,
            ..
        }
    ));
}

#[test]
fn test_constant_raw_image_is_domain_error() {
    let arr = DynArray::from_bytes(&[9u8; 12], &[3, 4], "uint8", Endianness::Little).unwrap();
    let err = arr.balance(&BalanceParams::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Domain);
}

#[test]
fn test_overflowing_shape_is_input_error() {
    let err =
        DynArray::from_bytes(&[0; 4], &[usize::MAX, 2], "uint16", Endianness::Little).unwrap_err();
    assert!(matches!(err, BalanceError::ShapeMismatch { actual: 4, .. }));
    assert_eq!(err.kind(), ErrorKind::Input);
}

#[test]
fn test_overflowing_byte_count_is_input_error() {
    // The element count fits in usize but the byte count does not.
    let err = DynArray::from_bytes(&[0; 8], &[usize::MAX / 4], "uint64", Endianness::Big)
        .unwrap_err();
    assert!(matches!(err, BalanceError::ShapeMismatch { actual: 8, .. }));
}
