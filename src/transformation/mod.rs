//! Pressure fields reconstructed from the solved contact patches.
//!
//! These are consumers of the contact pipeline, used for display and for checking the
//! consistency between the peak pressures and the patch loads.

pub use self::pressure_distribution::{lateral_pressure, PatchDistribution};

mod pressure_distribution;
