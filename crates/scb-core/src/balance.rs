use std::cmp::Ordering;

use ndarray::{Array, ArrayBase, Data, Dimension, Zip};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::consts::{DEFAULT_TAIL_FRACTION, PARALLEL_PIXEL_THRESHOLD};
use crate::element::Element;
use crate::error::{BalanceError, Result};
use crate::quantile::quantile_pair;

/// Tail fractions for simple color balance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceParams {
    /// Fraction of the darkest values saturated to black (default: 0.015).
    pub s0: f64,
    /// Fraction of the brightest values saturated to white (default: 0.015).
    pub s1: f64,
}

impl Default for BalanceParams {
    fn default() -> Self {
        Self {
            s0: DEFAULT_TAIL_FRACTION,
            s1: DEFAULT_TAIL_FRACTION,
        }
    }
}

impl BalanceParams {
    pub fn new(s0: f64, s1: f64) -> Self {
        Self { s0, s1 }
    }

    /// Both fractions must lie in [0, 1] and leave a non-empty middle band.
    pub fn validate(&self) -> Result<()> {
        check_fraction("s0", self.s0)?;
        check_fraction("s1", self.s1)?;
        let sum = self.s0 + self.s1;
        if sum >= 1.0 {
            return Err(BalanceError::TailFractionsOverlap { sum });
        }
        Ok(())
    }
}

fn check_fraction(name: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(BalanceError::InvalidTailFraction { name, value })
    }
}

/// Black and white points of a balance, in the image's value domain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Thresholds {
    pub low: f64,
    pub high: f64,
}

impl Thresholds {
    /// Fails with a domain error unless `high > low`.
    pub fn new(low: f64, high: f64) -> Result<Self> {
        let ordered = matches!(high.partial_cmp(&low), Some(Ordering::Greater));
        if !ordered || !(high - low).is_finite() {
            return Err(BalanceError::DegenerateRange { low, high });
        }
        Ok(Self { low, high })
    }

    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Map `value` so that `low` lands on 0 and `high` on 1. Not clipped.
    pub fn rescale(&self, value: f64) -> f64 {
        (value - self.low) / self.range()
    }
}

/// Simple color balance with a fixed pair of tail fractions.
///
/// All elements share one pair of thresholds regardless of channel layout.
#[derive(Clone, Debug)]
pub struct ColorBalancer {
    params: BalanceParams,
}

impl ColorBalancer {
    pub fn new(params: BalanceParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &BalanceParams {
        &self.params
    }

    /// Compute the `s0` and `1 - s1` quantiles over every element.
    pub fn thresholds<T, S, D>(&self, image: &ArrayBase<S, D>) -> Result<Thresholds>
    where
        T: Element,
        S: Data<Elem = T>,
        D: Dimension,
    {
        let mut values = flatten_finite(image)?;
        let (low, high) = quantile_pair(&mut values, self.params.s0, 1.0 - self.params.s1)?;
        debug!(
            element_type = %T::TYPE,
            shape = ?image.shape(),
            s0 = self.params.s0,
            s1 = self.params.s1,
            low,
            high,
            "Color balance thresholds"
        );
        Thresholds::new(low, high)
    }

    /// Balance `image`, returning a new array of the same shape and element type.
    pub fn apply<T, S, D>(&self, image: &ArrayBase<S, D>) -> Result<Array<T, D>>
    where
        T: Element,
        S: Data<Elem = T>,
        D: Dimension,
    {
        let thresholds = self.thresholds(image)?;
        Ok(stretch_unchecked(image, &thresholds))
    }
}

/// Balance `image` with tail fractions `s0` (dark end) and `s1` (bright end).
///
/// Integer inputs come back scaled to `[0, T::MAX]`, float inputs to `[0, 1]`.
pub fn balance<T, S, D>(image: &ArrayBase<S, D>, s0: f64, s1: f64) -> Result<Array<T, D>>
where
    T: Element,
    S: Data<Elem = T>,
    D: Dimension,
{
    ColorBalancer::new(BalanceParams::new(s0, s1))?.apply(image)
}

/// [`balance`] with the default 1.5% tails on both ends.
pub fn balance_default<T, S, D>(image: &ArrayBase<S, D>) -> Result<Array<T, D>>
where
    T: Element,
    S: Data<Elem = T>,
    D: Dimension,
{
    ColorBalancer::new(BalanceParams::default())?.apply(image)
}

/// Thresholds for `image` without rescaling it.
pub fn compute_thresholds<T, S, D>(
    image: &ArrayBase<S, D>,
    params: &BalanceParams,
) -> Result<Thresholds>
where
    T: Element,
    S: Data<Elem = T>,
    D: Dimension,
{
    ColorBalancer::new(params.clone())?.thresholds(image)
}

/// Linear stretch with precomputed thresholds: maps [low, high] to the
/// output range of `T` and clips everything outside it.
pub fn stretch<T, S, D>(image: &ArrayBase<S, D>, thresholds: &Thresholds) -> Result<Array<T, D>>
where
    T: Element,
    S: Data<Elem = T>,
    D: Dimension,
{
    if image.is_empty() {
        return Err(BalanceError::EmptyImage);
    }
    if let Some(index) = image.iter().position(|v| !v.is_finite()) {
        return Err(BalanceError::NonFiniteValue { index });
    }
    let thresholds = Thresholds::new(thresholds.low, thresholds.high)?;
    Ok(stretch_unchecked(image, &thresholds))
}

fn stretch_unchecked<T, S, D>(image: &ArrayBase<S, D>, thresholds: &Thresholds) -> Array<T, D>
where
    T: Element,
    S: Data<Elem = T>,
    D: Dimension,
{
    let scale = T::TYPE.max_value();
    let map = |v: T| -> T {
        let unit = thresholds.rescale(v.to_f64()).clamp(0.0, 1.0);
        match scale {
            Some(max) => T::from_f64((unit * max).round_ties_even()),
            None => T::from_f64(unit),
        }
    };

    if image.len() >= PARALLEL_PIXEL_THRESHOLD {
        trace!(elements = image.len(), "Parallel rescale");
        Zip::from(image).par_map_collect(|&v| map(v))
    } else {
        image.mapv(map)
    }
}

/// Copy every element into an `f64` buffer, rejecting empty images and NaN/Inf.
fn flatten_finite<T, S, D>(image: &ArrayBase<S, D>) -> Result<Vec<f64>>
where
    T: Element,
    S: Data<Elem = T>,
    D: Dimension,
{
    if image.is_empty() {
        return Err(BalanceError::EmptyImage);
    }
    image
        .iter()
        .enumerate()
        .map(|(index, &v)| {
            if v.is_finite() {
                Ok(v.to_f64())
            } else {
                Err(BalanceError::NonFiniteValue { index })
            }
        })
        .collect()
}
