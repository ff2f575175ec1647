//! The stages of the contact model.
//!
//! Each stage is a pure function of its inputs and can be called on its own:
//!
//! * [`separation()`] computes the vertical gap between two aligned profiles.
//! * [`interpenetration()`] clips the gap against the virtual penetration.
//! * [`contact_patches()`] splits the interpenetration into contact patches.
//! * [`max_pressures()`] and [`solve_patches()`] compute the peak pressure of each patch.
//!
//! [`evaluate_contact()`] chains all of them, starting with the alignment of the wheel onto
//! the rail's grid.

pub use self::contact_patch::{contact_patches, ContactPatch, EmptyPatchError};
pub use self::error::{ContactError, LengthMismatchError, PatchError, PatchErrorKind};
pub use self::interpenetration::interpenetration;
pub use self::parameters::{ContactParameters, ParameterError, PatchErrorPolicy, SolverOptions};
pub use self::pipeline::{evaluate_contact, ContactReport};
pub use self::pressure::{
    max_pressures, patch_max_pressure, solve_patches, NodeIntegrals, NodeIntegrand,
    PatchOutcome, PatchPressure, REGULARIZATION,
};
pub use self::separation::separation;

mod contact_patch;
mod error;
mod interpenetration;
mod parameters;
mod pipeline;
mod pressure;
mod separation;
