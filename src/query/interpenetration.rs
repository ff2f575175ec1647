use crate::math::{DVector, Real};

/// Evaluates the interpenetration function `g = max(0, δ₀ - separation)` node-wise.
///
/// `virtual_penetration` (δ₀) bounds how deep into the separation gap a node still counts as
/// interpenetrating. The result is non-negative everywhere and exactly zero wherever the
/// separation is at least δ₀.
pub fn interpenetration(separation: &DVector<Real>, virtual_penetration: Real) -> DVector<Real> {
    separation.map(|sep| (virtual_penetration - sep).max(0.0))
}
