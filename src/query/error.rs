use crate::io::LoadError;
use crate::math::Real;
use crate::query::{ContactPatch, ParameterError};
use crate::shape::{AlignmentError, ProfileError};
use crate::utils::QuadratureError;

/// Two node-wise arrays that must share the same grid have different lengths.
///
/// This happens when the separation is requested on profiles that were not aligned first,
/// or when an interpenetration array does not belong to the given profile.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
#[error("expected arrays of equal length, got {top} and {bottom}")]
pub struct LengthMismatchError {
    /// Length of the first array (the wheel).
    pub top: usize,
    /// Length of the second array (the rail, or the interpenetration array).
    pub bottom: usize,
}

/// The reason why the peak pressure of one contact patch could not be computed.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq)]
pub enum PatchErrorKind {
    /// One of the integrals of a node did not converge.
    #[error("integration failed at node {node}: {source}")]
    Integration {
        /// Index of the node on the shared grid.
        node: usize,
        /// The quadrature failure.
        source: QuadratureError,
    },
    /// The summed integrals of the patch are too close to zero to be divided by.
    #[error("degenerate patch integrals (S1 = {s1}, S2 = {s2})")]
    Division {
        /// Sum of the weighted integrals over the patch.
        s1: Real,
        /// Sum of the elliptic integrals over the patch.
        s2: Real,
    },
}

/// A failure scoped to a single contact patch.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq)]
#[error("contact patch {patch}: {kind}")]
pub struct PatchError {
    /// The patch the failure happened on.
    pub patch: ContactPatch,
    /// What went wrong.
    pub kind: PatchErrorKind,
}

/// Errors returned by the contact pipeline.
#[derive(thiserror::Error, Debug)]
pub enum ContactError {
    /// The physical parameters are invalid.
    #[error("invalid contact parameters: {0}")]
    Parameters(#[from] ParameterError),
    /// A profile could not be built.
    #[error("invalid profile: {0}")]
    Profile(#[from] ProfileError),
    /// A profile could not be read.
    #[error("failed to load profile: {0}")]
    Load(#[from] LoadError),
    /// The wheel could not be resampled onto the rail grid.
    #[error("profile alignment failed: {0}")]
    Alignment(#[from] AlignmentError),
    /// Node-wise arrays do not share the same grid.
    #[error("length mismatch: {0}")]
    LengthMismatch(#[from] LengthMismatchError),
    /// A contact patch failed while the solver was configured to abort.
    #[error("pressure computation aborted: {0}")]
    Patch(#[from] PatchError),
}
