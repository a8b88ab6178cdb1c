pub mod array;
pub mod balance;
pub mod consts;
pub mod dynamic;
pub mod element;
pub mod error;
pub mod interop;
pub mod quantile;

pub use array::NumericArray;
pub use balance::{
    balance, balance_default, compute_thresholds, stretch, BalanceParams, ColorBalancer, Thresholds,
};
pub use dynamic::{DynArray, Endianness};
pub use element::{Element, ElementType};
pub use error::{BalanceError, ErrorKind, Result};
