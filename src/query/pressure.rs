//! Peak contact pressure of each contact patch.
//!
//! For every node `i` of a patch, the interpenetration `g(i)` implies the longitudinal
//! half-length `a(i) = sqrt(2 R g(i))` of the contact region at that lateral position. Two
//! integrals are evaluated over `x ∈ [-a(i), a(i)]`:
//!
//! ```text
//! I1(i) = ∫ sqrt(a(i)² - x²) / sqrt(x² + y(i)² + ε) dx
//! I2(i) = ∫ sqrt(a(i)² - x²) dx
//! ```
//!
//! and summed over the patch into `S1` and `S2`. The normal load and the peak pressure are
//! then
//!
//! ```text
//! load = π E δ / (2 (1 - ν²)) · S2 / S1
//! pmax = load · sqrt(2 R δ₀) / S2
//! ```

use crate::math::{DVector, Real, DEFAULT_EPSILON};
use crate::query::{
    contact_patches, ContactError, ContactParameters, ContactPatch, LengthMismatchError,
    PatchError, PatchErrorKind, PatchErrorPolicy, SolverOptions,
};
use crate::shape::Profile;
use crate::utils::{integrate, QuadratureError};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Regularization added under the square root of the weighted integrand to keep it bounded
/// at `x = y = 0`.
pub const REGULARIZATION: Real = 1.0e-10;

/// The inputs of the integrals of a single node.
///
/// Every quantity the integrands depend on is stored here explicitly, so nodes can be
/// evaluated independently and in any order.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NodeIntegrand {
    /// The longitudinal half-length `a = sqrt(2 R g)` of the contact region at this node.
    pub half_length: Real,
    /// The lateral coordinate `y` of the node.
    pub lateral: Real,
}

/// The two integrals of a single node.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NodeIntegrals {
    /// `∫ sqrt(a² - x²) / sqrt(x² + y² + ε) dx`.
    pub weighted: Real,
    /// `∫ sqrt(a² - x²) dx`.
    pub elliptic: Real,
}

impl NodeIntegrand {
    /// The integrand record of a node with interpenetration `interpenetration` located at the
    /// lateral coordinate `lateral`.
    pub fn new(params: &ContactParameters, interpenetration: Real, lateral: Real) -> Self {
        Self {
            half_length: params.half_length(interpenetration),
            lateral,
        }
    }

    /// The semi-elliptical weight `sqrt(a² - x²)`, zero outside of `[-a, a]`.
    #[inline]
    pub fn elliptic(&self, x: Real) -> Real {
        let a = self.half_length;
        (a * a - x * x).max(0.0).sqrt()
    }

    /// The weighted integrand `sqrt(a² - x²) / sqrt(x² + y² + ε)`.
    #[inline]
    pub fn weighted(&self, x: Real) -> Real {
        let y = self.lateral;
        self.elliptic(x) / (x * x + y * y + REGULARIZATION).sqrt()
    }

    /// Integrates both integrands over `[-a, a]`.
    pub fn integrals(&self, options: &SolverOptions) -> Result<NodeIntegrals, QuadratureError> {
        let a = self.half_length;
        let weighted = integrate(|x| self.weighted(x), -a, a, &options.weighted_integral)?;
        let elliptic = integrate(|x| self.elliptic(x), -a, a, &options.elliptic_integral)?;

        Ok(NodeIntegrals {
            weighted: weighted.value,
            elliptic: elliptic.value,
        })
    }
}

/// The solved pressure quantities of one contact patch.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct PatchPressure {
    /// The patch these quantities belong to.
    pub patch: ContactPatch,
    /// Sum of the weighted integrals over the patch.
    pub s1: Real,
    /// Sum of the elliptic integrals over the patch.
    pub s2: Real,
    /// The normal load carried by the patch.
    pub load: Real,
    /// The peak normal pressure of the patch.
    pub pmax: Real,
}

/// The result of the pressure computation for one patch.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PatchOutcome {
    /// The peak pressure was computed.
    Solved(PatchPressure),
    /// The patch failed and was skipped, see [`PatchErrorPolicy::Skip`].
    Skipped(PatchError),
}

impl PatchOutcome {
    /// The patch this outcome belongs to.
    pub fn patch(&self) -> ContactPatch {
        match self {
            PatchOutcome::Solved(p) => p.patch,
            PatchOutcome::Skipped(e) => e.patch,
        }
    }

    /// The solved quantities, if any.
    pub fn solved(&self) -> Option<&PatchPressure> {
        match self {
            PatchOutcome::Solved(p) => Some(p),
            PatchOutcome::Skipped(_) => None,
        }
    }

    /// The peak pressure, if the patch was solved.
    pub fn pmax(&self) -> Option<Real> {
        self.solved().map(|p| p.pmax)
    }
}

/// Computes the peak pressure of a single contact patch.
///
/// `lateral` and `interpenetration` are node-wise arrays over the shared grid. Fails if an
/// integral does not converge, or if `S1` or `S2` is too close to zero to be divided by.
///
/// # Panics
///
/// Panics if `lateral` and `interpenetration` have different lengths, or if `patch` does not
/// lie within them.
pub fn patch_max_pressure(
    lateral: &[Real],
    interpenetration: &[Real],
    patch: ContactPatch,
    params: &ContactParameters,
    options: &SolverOptions,
) -> Result<PatchPressure, PatchError> {
    assert_eq!(
        lateral.len(),
        interpenetration.len(),
        "Mismatched node array lengths."
    );
    assert!(
        patch.end() <= lateral.len(),
        "Contact patch out of the bounds of the node grid."
    );

    let mut s1 = 0.0;
    let mut s2 = 0.0;

    for i in patch.range() {
        let node = NodeIntegrand::new(params, interpenetration[i], lateral[i]);
        let integrals = node.integrals(options).map_err(|source| PatchError {
            patch,
            kind: PatchErrorKind::Integration { node: i, source },
        })?;

        s1 += integrals.weighted;
        s2 += integrals.elliptic;
    }

    if !(s1 > DEFAULT_EPSILON && s2 > DEFAULT_EPSILON) {
        return Err(PatchError {
            patch,
            kind: PatchErrorKind::Division { s1, s2 },
        });
    }

    let load = params.load_coefficient() * s2 / s1;
    let pmax = load * (2.0 * params.wheel_radius * params.virtual_penetration).sqrt() / s2;

    log::trace!("patch {patch}: S1 = {s1}, S2 = {s2}, load = {load}, pmax = {pmax}");

    Ok(PatchPressure {
        patch,
        s1,
        s2,
        load,
        pmax,
    })
}

/// Computes the peak pressure of each of the given patches.
///
/// The outcomes are returned in the order of `patches`. A failing patch either aborts the
/// computation with the first failure in patch order, or is recorded as
/// [`PatchOutcome::Skipped`], depending on `options.on_patch_error`. With the `parallel`
/// feature enabled, patches are evaluated concurrently with identical results.
///
/// Returns a [`LengthMismatchError`] if `wheel` and `interpenetration` have different
/// lengths.
///
/// # Panics
///
/// Panics if one of the `patches` does not lie within the node grid. Patches produced by
/// [`contact_patches`] on `interpenetration` always do.
pub fn solve_patches(
    wheel: &Profile,
    interpenetration: &DVector<Real>,
    patches: &[ContactPatch],
    params: &ContactParameters,
    options: &SolverOptions,
) -> Result<Vec<PatchOutcome>, ContactError> {
    if wheel.len() != interpenetration.len() {
        return Err(LengthMismatchError {
            top: wheel.len(),
            bottom: interpenetration.len(),
        }
        .into());
    }

    assert!(
        patches.iter().all(|p| p.end() <= wheel.len()),
        "Contact patch out of the bounds of the node grid."
    );

    let solve = |patch: &ContactPatch| {
        patch_max_pressure(
            wheel.ys(),
            interpenetration.as_slice(),
            *patch,
            params,
            options,
        )
    };

    #[cfg(feature = "parallel")]
    let results: Vec<_> = patches.par_iter().map(solve).collect();
    #[cfg(not(feature = "parallel"))]
    let results: Vec<_> = patches.iter().map(solve).collect();

    let outcomes = results
        .into_iter()
        .map(|result| match result {
            Ok(pressure) => Ok(PatchOutcome::Solved(pressure)),
            Err(err) => match options.on_patch_error {
                PatchErrorPolicy::Abort => Err(err),
                PatchErrorPolicy::Skip => {
                    log::warn!("skipping {err}");
                    Ok(PatchOutcome::Skipped(err))
                }
            },
        })
        .collect::<Result<Vec<_>, PatchError>>()?;

    Ok(outcomes)
}

/// Segments `interpenetration` into contact patches and computes the peak pressure of each.
///
/// `wheel` provides the lateral coordinates of the nodes and must have the same length as
/// `interpenetration`. An interpenetration without any positive value yields no outcome,
/// which means that the profiles are not in contact.
pub fn max_pressures(
    wheel: &Profile,
    interpenetration: &DVector<Real>,
    params: &ContactParameters,
    options: &SolverOptions,
) -> Result<Vec<PatchOutcome>, ContactError> {
    let patches = contact_patches(interpenetration.as_slice());
    solve_patches(wheel, interpenetration, &patches, params, options)
}
