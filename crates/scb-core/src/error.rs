use thiserror::Error;

#[derive(Error, Debug)]
pub enum BalanceError {
    #[error("Empty image: at least one element is required")]
    EmptyImage,

    #[error("Invalid tail fraction {name} = {value} (expected a value in [0, 1])")]
    InvalidTailFraction { name: &'static str, value: f64 },

    #[error("Tail fractions overlap: s0 + s1 = {sum} (must be below 1)")]
    TailFractionsOverlap { sum: f64 },

    #[error("Invalid quantile {0} (expected a value in [0, 1])")]
    InvalidQuantile(f64),

    #[error("Non-finite value at flat index {index}")]
    NonFiniteValue { index: usize },

    #[error("Unsupported element type: {0}")]
    UnsupportedElementType(String),

    #[error("Shape {shape:?} needs {expected} elements, got {actual}")]
    ShapeMismatch {
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },

    #[error("Degenerate threshold range: low = {low}, high = {high}")]
    DegenerateRange { low: f64, high: f64 },
}

/// Broad classification of a [`BalanceError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed parameters or image.
    Input,
    /// The image and parameters are well-formed but the threshold range collapses.
    Domain,
}

impl BalanceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DegenerateRange { .. } => ErrorKind::Domain,
            _ => ErrorKind::Input,
        }
    }
}

pub type Result<T> = std::result::Result<T, BalanceError>;
