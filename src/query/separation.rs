use crate::math::{DVector, Real};
use crate::query::LengthMismatchError;
use crate::shape::Profile;

/// Computes the vertical gap between two profiles sharing the same lateral grid.
///
/// `top` is the wheel and `bottom` the rail. The raw gap `top.z - bottom.z` is shifted so
/// that its minimum is exactly zero: the closest point of approach defines the origin of the
/// separation. This absorbs any vertical offset between the coordinate systems of the two
/// profiles, and turns an apparent overlap (negative raw gap) into a valid separation
/// instead of an error.
///
/// Fails if the profiles do not have the same number of nodes, i.e., if they were not
/// aligned first.
pub fn separation(top: &Profile, bottom: &Profile) -> Result<DVector<Real>, LengthMismatchError> {
    if top.len() != bottom.len() {
        return Err(LengthMismatchError {
            top: top.len(),
            bottom: bottom.len(),
        });
    }

    let mut sep = top.heights() - bottom.heights();
    let min_sep = sep.min();
    sep.add_scalar_mut(-min_sep);

    Ok(sep)
}
