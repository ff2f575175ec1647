use crate::math::Real;
use core::cmp::Ordering;

/// A value packed with a cost, ordered by that cost only.
///
/// Used as the entry type of a max-heap so that the costliest item is popped first.
#[derive(Copy, Clone, Debug)]
pub struct WeightedValue<T> {
    pub value: T,
    pub cost: Real,
}

impl<T> WeightedValue<T> {
    /// Creates a new value packed with a cost.
    #[inline]
    pub fn new(value: T, cost: Real) -> WeightedValue<T> {
        WeightedValue { value, cost }
    }
}

impl<T> PartialEq for WeightedValue<T> {
    #[inline]
    fn eq(&self, other: &WeightedValue<T>) -> bool {
        self.cost.eq(&other.cost)
    }
}

impl<T> Eq for WeightedValue<T> {}

impl<T> PartialOrd for WeightedValue<T> {
    #[inline]
    fn partial_cmp(&self, other: &WeightedValue<T>) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for WeightedValue<T> {
    #[inline]
    fn cmp(&self, other: &WeightedValue<T>) -> Ordering {
        self.cost.total_cmp(&other.cost)
    }
}
