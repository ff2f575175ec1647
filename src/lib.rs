/*!
pkcontact
=========

**pkcontact** computes the normal contact pressure between a wheel and a rail
cross-section with the Piotrowski-Kik virtual-interpenetration model.

The pipeline is a chain of pure transforms:

1. [`shape::align_profiles`] resamples the wheel onto the rail's lateral grid.
2. [`query::separation`] computes the vertical gap, shifted so that its minimum is zero.
3. [`query::interpenetration`] clips `δ₀ - separation` to non-negative values.
4. [`query::contact_patches`] splits the positive part into contact patches.
5. [`query::max_pressures`] integrates every patch and returns its peak pressure.

[`query::evaluate_contact`] runs the whole chain from two raw profiles and a
[`query::ContactParameters`] record.

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.
#![deny(unused_qualifications)]

#[cfg(feature = "serde-serialize")]
#[macro_use]
extern crate serde;
#[macro_use]
extern crate approx;
extern crate num_traits as num;

pub extern crate nalgebra as na;

pub mod io;
pub mod query;
pub mod shape;
pub mod transformation;
pub mod utils;

mod real {
    /// The scalar type used throughout this crate.
    pub use f64 as Real;
}

/// Aliases for the mathematical types used by this crate.
pub mod math {
    pub use super::real::*;
    pub use na::{DVector, Point2};

    /// The default tolerance used for floating-point comparisons.
    pub const DEFAULT_EPSILON: Real = Real::EPSILON;

    /// A profile node: `x` is the lateral coordinate `y`, and `y` is the vertical coordinate `z`.
    pub use Point2 as Point;
}
