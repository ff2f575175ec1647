//! Numerical helpers: linear interpolation and adaptive quadrature.

pub use self::interp::interp_linear;
pub use self::quadrature::{integrate, Quadrature, QuadratureError, QuadratureOptions};
pub(crate) use self::weighted_value::WeightedValue;

mod interp;
mod quadrature;
mod weighted_value;
