use crate::math::Real;
use core::fmt;
use core::iter;
use core::ops::Range;

/// A contact patch: a maximal run of nodes with strictly positive interpenetration.
///
/// The patch covers the half-open index range `[start, end)` of the shared lateral grid and
/// is never empty.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-serialize", serde(try_from = "Range<usize>"))]
pub struct ContactPatch {
    start: usize,
    end: usize,
}

impl ContactPatch {
    /// Creates the patch `[start, end)`.
    ///
    /// Returns `None` if the range is empty.
    pub fn new(start: usize, end: usize) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    /// Index of the first node of this patch.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Index one past the last node of this patch.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Index of the last node of this patch.
    pub fn last(&self) -> usize {
        self.end - 1
    }

    /// The number of nodes of this patch.
    #[allow(clippy::len_without_is_empty)] // A patch is never empty.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// The node indices of this patch.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Does this patch contain the node `i`?
    pub fn contains(&self, i: usize) -> bool {
        i >= self.start && i < self.end
    }
}

impl fmt::Display for ContactPatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// A contact patch was requested over an empty index range.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
#[error("the contact patch [{start}, {end}) is empty.")]
pub struct EmptyPatchError {
    /// Requested index of the first node.
    pub start: usize,
    /// Requested index one past the last node.
    pub end: usize,
}

impl TryFrom<Range<usize>> for ContactPatch {
    type Error = EmptyPatchError;

    fn try_from(range: Range<usize>) -> Result<Self, Self::Error> {
        ContactPatch::new(range.start, range.end).ok_or(EmptyPatchError {
            start: range.start,
            end: range.end,
        })
    }
}

impl From<ContactPatch> for Range<usize> {
    fn from(patch: ContactPatch) -> Self {
        patch.range()
    }
}

/// Splits `values` into the maximal runs of strictly positive entries.
///
/// The positivity mask is padded with one `false` on each side, so a run starts wherever
/// the padded mask rises and ends wherever it falls. The padding makes runs touching either
/// end of the array close properly.
///
/// The returned patches are disjoint, non-empty, and sorted by increasing start index. An
/// array without positive entries yields no patch.
pub fn contact_patches(values: &[Real]) -> Vec<ContactPatch> {
    let mask: Vec<bool> = iter::once(false)
        .chain(values.iter().map(|v| *v > 0.0))
        .chain(iter::once(false))
        .collect();

    let mut patches = Vec::new();
    let mut start = 0;

    for (i, step) in mask.windows(2).enumerate() {
        match (step[0], step[1]) {
            (false, true) => start = i,
            (true, false) => patches.extend(ContactPatch::new(start, i)),
            _ => {}
        }
    }

    patches
}
