use crate::math::{DVector, Real};
use crate::query::{
    contact_patches, interpenetration, separation, solve_patches, ContactError,
    ContactParameters, ContactPatch, PatchOutcome, PatchPressure, SolverOptions,
};
use crate::shape::{align_profiles, Profile};

/// Everything computed by one evaluation of the contact model.
///
/// All node-wise arrays are defined on the rail's lateral grid.
#[derive(Clone, Debug, PartialEq)]
pub struct ContactReport {
    /// The wheel profile resampled onto the rail's lateral grid.
    pub wheel: Profile,
    /// The rail profile.
    pub rail: Profile,
    /// The vertical gap between the wheel and the rail, with a zero minimum.
    pub separation: DVector<Real>,
    /// The interpenetration function, non-zero only inside contact patches.
    pub interpenetration: DVector<Real>,
    /// The contact patches, sorted by increasing start index.
    pub patches: Vec<ContactPatch>,
    /// One outcome per contact patch, in the same order as `patches`.
    pub outcomes: Vec<PatchOutcome>,
}

impl ContactReport {
    /// Are the profiles in contact at all?
    pub fn is_in_contact(&self) -> bool {
        !self.patches.is_empty()
    }

    /// The solved patches.
    pub fn solved(&self) -> impl Iterator<Item = &PatchPressure> {
        self.outcomes.iter().filter_map(|o| o.solved())
    }

    /// The peak pressure of every solved patch, in patch order.
    pub fn max_pressures(&self) -> Vec<Real> {
        self.solved().map(|p| p.pmax).collect()
    }

    /// The total normal load carried by the solved patches.
    pub fn total_load(&self) -> Real {
        self.solved().map(|p| p.load).sum()
    }
}

/// Evaluates the Piotrowski-Kik contact model for a wheel and a rail profile.
///
/// Both profiles must be z-up and sorted by increasing lateral coordinate. The wheel is
/// resampled onto the rail's grid, so its lateral range must cover the rail's.
///
/// Alignment failures abort before any patch is processed. Per-patch failures are handled
/// according to `options.on_patch_error`. Profiles that do not touch at all produce a
/// report without patches, which is not an error.
pub fn evaluate_contact(
    wheel: &Profile,
    rail: &Profile,
    params: &ContactParameters,
    options: &SolverOptions,
) -> Result<ContactReport, ContactError> {
    params.validate()?;

    let wheel = align_profiles(wheel, rail)?;
    let separation = separation(&wheel, rail)?;
    let interpenetration = interpenetration(&separation, params.virtual_penetration);
    let patches = contact_patches(interpenetration.as_slice());

    log::debug!(
        "{} contact patch(es) over {} nodes: {:?}",
        patches.len(),
        rail.len(),
        patches
    );

    let outcomes = solve_patches(&wheel, &interpenetration, &patches, params, options)?;

    Ok(ContactReport {
        wheel,
        rail: rail.clone(),
        separation,
        interpenetration,
        patches,
        outcomes,
    })
}
