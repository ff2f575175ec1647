use crate::math::{DVector, Real};
use crate::query::{ContactParameters, PatchOutcome, PatchPressure};
use crate::utils::{integrate, QuadratureError, QuadratureOptions};

/// Builds a display-only lateral pressure curve from the peak pressures of the patches.
///
/// Each solved patch is drawn as the half-ellipse `pmax · sqrt(1 - ξ²)`, where `ξ` maps the
/// lateral coordinates of the first and last node of the patch to `-1` and `1`. A single-node
/// patch shows `pmax` at its node. Nodes outside of solved patches have zero pressure.
///
/// # Panics
///
/// Panics if a solved patch does not lie within `lateral`.
pub fn lateral_pressure(lateral: &[Real], outcomes: &[PatchOutcome]) -> DVector<Real> {
    let mut pressures = DVector::zeros(lateral.len());

    for pressure in outcomes.iter().filter_map(|o| o.solved()) {
        let patch = pressure.patch;
        assert!(
            patch.end() <= lateral.len(),
            "Contact patch out of the bounds of the node grid."
        );
        let first = lateral[patch.start()];
        let last = lateral[patch.last()];
        let center = 0.5 * (first + last);
        let half_width = 0.5 * (last - first);

        for i in patch.range() {
            pressures[i] = if half_width > 0.0 {
                let xi = (lateral[i] - center) / half_width;
                pressure.pmax * (1.0 - xi * xi).max(0.0).sqrt()
            } else {
                pressure.pmax
            };
        }
    }

    pressures
}

/// The pressure field of one solved patch, consistent with its load.
///
/// At the node `i` of the patch, the pressure along the rolling direction is
///
/// ```text
/// p(x, i) = pmax · sqrt(a(i)² - x²) / sqrt(2 R δ₀),   x ∈ [-a(i), a(i)]
/// ```
///
/// with `a(i) = sqrt(2 R g(i))`. It reaches `pmax` where the interpenetration equals `δ₀`,
/// and summing its integral over the nodes of the patch gives back the patch load.
#[derive(Clone, Debug, PartialEq)]
pub struct PatchDistribution {
    start: usize,
    half_lengths: Vec<Real>,
    scale: Real,
}

impl PatchDistribution {
    /// The pressure field of `pressure`, given the interpenetration array it was solved from.
    ///
    /// # Panics
    ///
    /// Panics if the patch of `pressure` does not lie within `interpenetration`.
    pub fn new(
        interpenetration: &DVector<Real>,
        pressure: &PatchPressure,
        params: &ContactParameters,
    ) -> Self {
        let patch = pressure.patch;
        assert!(
            patch.end() <= interpenetration.len(),
            "Contact patch out of the bounds of the node grid."
        );
        let half_lengths = patch
            .range()
            .map(|i| params.half_length(interpenetration[i]))
            .collect();
        let scale = pressure.pmax / params.half_length(params.virtual_penetration);

        Self {
            start: patch.start(),
            half_lengths,
            scale,
        }
    }

    /// The longitudinal half-length of the contact region at the node `node`.
    ///
    /// `node` indexes the shared grid. Returns `None` outside of the patch.
    pub fn half_length(&self, node: usize) -> Option<Real> {
        node.checked_sub(self.start)
            .and_then(|k| self.half_lengths.get(k))
            .copied()
    }

    /// The pressure at the longitudinal coordinate `x` of the node `node`.
    ///
    /// Returns `None` if `node` is outside of the patch, and zero outside of the contact
    /// region.
    pub fn pressure_at(&self, node: usize, x: Real) -> Option<Real> {
        self.half_length(node)
            .map(|a| self.scale * (a * a - x * x).max(0.0).sqrt())
    }

    /// The largest pressure of the field, reached at `x = 0` on the deepest node.
    pub fn peak(&self) -> Real {
        let deepest = self.half_lengths.iter().copied().fold(0.0, Real::max);
        self.scale * deepest
    }

    /// Integrates the pressure over the contact region of every node and sums the results.
    ///
    /// Node contributions are summed with a unit lateral weight, as the solver sums its
    /// integrals, so the result equals the patch load up to quadrature error.
    pub fn integrated_load(&self, options: &QuadratureOptions) -> Result<Real, QuadratureError> {
        let mut load = 0.0;

        for (k, a) in self.half_lengths.iter().enumerate() {
            let node = self.start + k;
            let res = integrate(
                |x| self.pressure_at(node, x).unwrap_or(0.0),
                -a,
                *a,
                options,
            )?;
            load += res.value;
        }

        Ok(load)
    }
}
