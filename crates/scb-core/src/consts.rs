/// Default tail fraction excluded from each end of the intensity distribution (1.5%).
pub const DEFAULT_TAIL_FRACTION: f64 = 0.015;

/// Minimum element count to use Rayon parallelism for quantiles and rescaling.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;
