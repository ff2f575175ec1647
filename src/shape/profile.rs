use crate::math::{DVector, Point, Real, DEFAULT_EPSILON};
use crate::utils::interp_linear;

/// Indicates an inconsistency while building a profile.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProfileError {
    /// A profile must contain at least two nodes.
    #[error("a profile must contain at least two nodes, found {0}.")]
    TooFewNodes(usize),
    /// A coordinate is NaN or infinite.
    #[error("the node {0} has a non-finite coordinate.")]
    NonFinite(usize),
    /// The lateral and vertical coordinate buffers differ in length.
    #[error("got {ys} lateral coordinates but {zs} vertical coordinates.")]
    LengthMismatch {
        /// Number of lateral coordinates.
        ys: usize,
        /// Number of vertical coordinates.
        zs: usize,
    },
}

/// Indicates that a profile cannot be resampled onto the grid of another.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq)]
pub enum AlignmentError {
    /// The lateral coordinates of the resampled profile are not strictly increasing.
    #[error("the source profile is not strictly increasing in y at node {0}.")]
    NonMonotonicSource(usize),
    /// The lateral coordinates of the reference grid are not strictly increasing.
    #[error("the reference profile is not strictly increasing in y at node {0}.")]
    NonMonotonicReference(usize),
    /// The reference grid extends outside of the source profile's lateral range.
    #[error("the source range [{source_min}, {source_max}] does not cover the reference range [{reference_min}, {reference_max}].")]
    DomainNotCovered {
        /// Smallest lateral coordinate of the source profile.
        source_min: Real,
        /// Largest lateral coordinate of the source profile.
        source_max: Real,
        /// Smallest lateral coordinate of the reference profile.
        reference_min: Real,
        /// Largest lateral coordinate of the reference profile.
        reference_max: Real,
    },
}

/// The cross-section of a wheel or a rail, as an ordered sequence of `(y, z)` nodes.
///
/// `y` is the lateral coordinate and `z` the vertical one, pointing upward so that a
/// larger `z` is a higher elevation. When converted to [`Point`]s, `y` is stored in the
/// point's first component and `z` in its second.
///
/// A profile is not required to be sorted at construction since measured profiles are
/// often stored from the flange toward the field side. It must be sorted by increasing `y`
/// (see [`Profile::sorted`]) before being resampled or used as a reference grid.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Profile {
    ys: DVector<Real>,
    zs: DVector<Real>,
}

impl Profile {
    /// Creates a profile from its nodes.
    pub fn new(points: &[Point<Real>]) -> Result<Self, ProfileError> {
        let ys = points.iter().map(|p| p.x).collect();
        let zs = points.iter().map(|p| p.y).collect();
        Self::from_coordinates(ys, zs)
    }

    /// Creates a profile from separate lateral and vertical coordinate buffers.
    pub fn from_coordinates(ys: Vec<Real>, zs: Vec<Real>) -> Result<Self, ProfileError> {
        if ys.len() != zs.len() {
            return Err(ProfileError::LengthMismatch {
                ys: ys.len(),
                zs: zs.len(),
            });
        }

        if ys.len() < 2 {
            return Err(ProfileError::TooFewNodes(ys.len()));
        }

        if let Some(i) = ys
            .iter()
            .zip(zs.iter())
            .position(|(y, z)| !y.is_finite() || !z.is_finite())
        {
            return Err(ProfileError::NonFinite(i));
        }

        Ok(Self {
            ys: DVector::from_vec(ys),
            zs: DVector::from_vec(zs),
        })
    }

    /// Samples `z = f(y)` at each of the given lateral coordinates.
    pub fn from_fn(ys: Vec<Real>, f: impl Fn(Real) -> Real) -> Result<Self, ProfileError> {
        let zs = ys.iter().map(|y| f(*y)).collect();
        Self::from_coordinates(ys, zs)
    }

    /// The number of nodes of this profile.
    pub fn len(&self) -> usize {
        self.ys.len()
    }

    /// A profile always has at least two nodes.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The lateral coordinates.
    pub fn ys(&self) -> &[Real] {
        self.ys.as_slice()
    }

    /// The vertical coordinates.
    pub fn zs(&self) -> &[Real] {
        self.zs.as_slice()
    }

    /// The vertical coordinates, as a vector.
    pub fn heights(&self) -> &DVector<Real> {
        &self.zs
    }

    /// The `i`-th node.
    pub fn point(&self, i: usize) -> Point<Real> {
        Point::new(self.ys[i], self.zs[i])
    }

    /// An iterator through all the nodes of this profile.
    pub fn points(&self) -> impl ExactSizeIterator<Item = Point<Real>> + '_ {
        (0..self.len()).map(move |i| self.point(i))
    }

    /// The smallest and largest lateral coordinates.
    pub fn y_range(&self) -> (Real, Real) {
        (self.ys.min(), self.ys.max())
    }

    /// The index of the first node whose lateral coordinate is not strictly greater than
    /// its predecessor's, if any.
    pub fn first_non_increasing(&self) -> Option<usize> {
        self.ys
            .as_slice()
            .windows(2)
            .position(|w| w[1] <= w[0])
            .map(|i| i + 1)
    }

    /// Are the lateral coordinates strictly increasing?
    pub fn is_strictly_increasing(&self) -> bool {
        self.first_non_increasing().is_none()
    }

    /// Does `self` share the same lateral grid as `other`?
    pub fn shares_grid_with(&self, other: &Profile) -> bool {
        self.len() == other.len()
            && self
                .ys
                .iter()
                .zip(other.ys.iter())
                .all(|(a, b)| relative_eq!(*a, *b, epsilon = DEFAULT_EPSILON))
    }

    /// Returns this profile with its nodes sorted by increasing lateral coordinate.
    ///
    /// The sort is stable, so duplicated lateral coordinates keep their relative order and
    /// are still reported by [`Profile::first_non_increasing`].
    #[must_use]
    pub fn sorted(&self) -> Self {
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.sort_by(|a, b| self.ys[*a].total_cmp(&self.ys[*b]));

        Self {
            ys: DVector::from_iterator(self.len(), order.iter().map(|i| self.ys[*i])),
            zs: DVector::from_iterator(self.len(), order.iter().map(|i| self.zs[*i])),
        }
    }

    /// Returns this profile mirrored about `z = 0`.
    ///
    /// Profile files usually measure `z` downward; flipping it gives the z-up convention.
    #[must_use]
    pub fn flipped_vertical(&self) -> Self {
        Self {
            ys: self.ys.clone(),
            zs: -&self.zs,
        }
    }

    /// Returns this profile shifted by `dy` laterally and `dz` vertically.
    #[must_use]
    pub fn translated(&self, dy: Real, dz: Real) -> Self {
        Self {
            ys: self.ys.add_scalar(dy),
            zs: self.zs.add_scalar(dz),
        }
    }

    /// Resamples this profile onto the lateral grid of `reference` by linear interpolation.
    ///
    /// The result has exactly the lateral coordinates of `reference` and the heights of
    /// `self` interpolated at these coordinates.
    ///
    /// Fails if either profile is not strictly increasing in `y`, or if the lateral range of
    /// `reference` is not contained in the lateral range of `self`.
    pub fn resample_onto(&self, reference: &Profile) -> Result<Profile, AlignmentError> {
        if let Some(i) = self.first_non_increasing() {
            return Err(AlignmentError::NonMonotonicSource(i));
        }

        if let Some(i) = reference.first_non_increasing() {
            return Err(AlignmentError::NonMonotonicReference(i));
        }

        let (source_min, source_max) = (self.ys[0], self.ys[self.len() - 1]);
        let (reference_min, reference_max) = (reference.ys[0], reference.ys[reference.len() - 1]);

        if reference_min < source_min || reference_max > source_max {
            return Err(AlignmentError::DomainNotCovered {
                source_min,
                source_max,
                reference_min,
                reference_max,
            });
        }

        let mut zs = Vec::with_capacity(reference.len());
        for y in reference.ys.iter() {
            // The range check above guarantees that every query lies inside the samples.
            match interp_linear(self.ys(), self.zs(), *y) {
                Some(z) => zs.push(z),
                None => {
                    return Err(AlignmentError::DomainNotCovered {
                        source_min,
                        source_max,
                        reference_min,
                        reference_max,
                    })
                }
            }
        }

        Ok(Profile {
            ys: reference.ys.clone(),
            zs: DVector::from_vec(zs),
        })
    }
}

/// Resamples `source` onto the lateral grid of `reference`.
///
/// This is the first stage of the contact pipeline: the wheel is resampled onto the rail's
/// grid so that both profiles can be compared node by node.
pub fn align_profiles(source: &Profile, reference: &Profile) -> Result<Profile, AlignmentError> {
    source.resample_onto(reference)
}
