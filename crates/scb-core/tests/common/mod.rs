use ndarray::{Array2, Array3};

/// 16x16 u8 ramp covering every value 0..=255 once.
pub fn u8_ramp() -> Array2<u8> {
    Array2::from_shape_fn((16, 16), |(row, col)| (row * 16 + col) as u8)
}

/// Float ramp with values evenly spaced over [0, 1], row-major.
pub fn f64_ramp(h: usize, w: usize) -> Array2<f64> {
    let n = (h * w - 1) as f64;
    Array2::from_shape_fn((h, w), |(row, col)| (row * w + col) as f64 / n)
}

/// Deterministic pseudo-random u16 image with a trailing channel axis.
pub fn u16_noise(h: usize, w: usize, channels: usize) -> Array3<u16> {
    let mut state: u32 = 0x9e37_79b9;
    Array3::from_shape_fn((h, w, channels), |_| {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        // Keep values in a narrow band so the stretch has work to do.
        1_000 + (state % 20_000) as u16
    })
}

pub fn min_max<T: Copy + PartialOrd>(values: impl IntoIterator<Item = T>) -> (T, T) {
    let mut iter = values.into_iter();
    let first = iter.next().expect("non-empty");
    iter.fold((first, first), |(lo, hi), v| {
        (if v < lo { v } else { lo }, if v > hi { v } else { hi })
    })
}
