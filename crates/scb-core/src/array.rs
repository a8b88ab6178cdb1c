use ndarray::{Array, ArrayD, Dimension, IxDyn, Zip};

use crate::balance::{BalanceParams, ColorBalancer};
use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::element::{Element, ElementType};
use crate::error::{BalanceError, Result};
use crate::quantile;

/// An n-dimensional image buffer of a single element type.
///
/// Row-major, contiguous. The element type tag is `T::TYPE`.
#[derive(Clone, Debug, PartialEq)]
pub struct NumericArray<T: Element> {
    data: ArrayD<T>,
}

impl<T: Element> NumericArray<T> {
    /// Build an array of `shape` from row-major `values`.
    pub fn from_shape_vec(shape: &[usize], values: Vec<T>) -> Result<Self> {
        let actual = values.len();
        let mismatch = |expected: usize| BalanceError::ShapeMismatch {
            shape: shape.to_vec(),
            expected,
            actual,
        };
        let expected = element_count(shape).ok_or_else(|| mismatch(usize::MAX))?;
        if expected != actual {
            return Err(mismatch(expected));
        }
        let data =
            ArrayD::from_shape_vec(IxDyn(shape), values).map_err(|_| mismatch(expected))?;
        Ok(Self { data })
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn element_type(&self) -> ElementType {
        T::TYPE
    }

    pub fn as_array(&self) -> &ArrayD<T> {
        &self.data
    }

    pub fn into_array(self) -> ArrayD<T> {
        self.data
    }

    /// Quantile `q` over all elements, linearly interpolated.
    pub fn quantile(&self, q: f64) -> Result<f64> {
        let mut values: Vec<f64> = self.data.iter().map(|v| v.to_f64()).collect();
        quantile::quantile(&mut values, q)
    }

    /// Clamp every element into `[lo, hi]`.
    pub fn clip(&self, lo: T, hi: T) -> Self
    where
        T: PartialOrd,
    {
        self.map_elementwise(|v| {
            if v < lo {
                lo
            } else if v > hi {
                hi
            } else {
                v
            }
        })
    }

    /// Apply `f` to every element, keeping the shape.
    pub fn map_elementwise<U, F>(&self, f: F) -> NumericArray<U>
    where
        U: Element,
        F: Fn(T) -> U + Sync + Send,
    {
        let data = if self.data.len() >= PARALLEL_PIXEL_THRESHOLD {
            Zip::from(&self.data).par_map_collect(|&v| f(v))
        } else {
            self.data.mapv(&f)
        };
        NumericArray { data }
    }

    /// Simple color balance; see [`ColorBalancer::apply`].
    pub fn balance(&self, params: &BalanceParams) -> Result<Self> {
        let data = ColorBalancer::new(params.clone())?.apply(&self.data)?;
        Ok(Self { data })
    }
}

impl<T: Element, D: Dimension> From<Array<T, D>> for NumericArray<T> {
    fn from(data: Array<T, D>) -> Self {
        Self {
            data: data.into_dyn(),
        }
    }
}

/// Product of `shape`, or `None` if it overflows `usize`.
pub(crate) fn element_count(shape: &[usize]) -> Option<usize> {
    shape.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
}
