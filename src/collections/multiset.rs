//! Rank-ordered multiset of fuzzy numbers with a running mean.
//!
//! [`FuzzyNumberMultiset`] stores values in ascending rank order and keeps
//! the componentwise sums of its contents up to date on every insert and
//! remove, so [`FuzzyNumberMultiset::arithmetic_mean`] never rescans.
//!
//! # Two notions of sameness
//!
//! Ordering is by rank key, and rank-equivalent values share a position in
//! the order. Membership (`remove`, `count`, `contains`) is by value
//! equality: only elements whose three components are identical to the
//! argument match.
//!
//! # Complexity
//!
//! | Operation | Cost |
//! |---|---|
//! | `insert` | O(log n) |
//! | `remove`, `count`, `contains` | O(log n + k), k = rank-equivalent elements |
//! | `arithmetic_mean`, `len` | O(1) |

use std::collections::btree_map::{self, BTreeMap};
use std::iter::{Flatten, FusedIterator};

use thiserror::Error;
use tracing::{debug, trace};

use crate::fuzzy::{FuzzyNumber, RankKey};
use crate::stats::ComponentSums;

/// The arithmetic mean was requested from an empty multiset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("arithmetic mean of an empty multiset is undefined")]
pub struct EmptyCollectionError;

/// Multiset of [`FuzzyNumber`]s ordered by rank, with O(1) mean.
///
/// # Examples
/// ```
/// use u_fuzzy::{crisp_number, FuzzyNumberMultiset};
///
/// let mut set: FuzzyNumberMultiset =
///     [crisp_number(0.0), crisp_number(2.0), crisp_number(4.0)].into();
/// assert_eq!(set.arithmetic_mean(), Ok(crisp_number(2.0)));
///
/// set.insert(crisp_number(4.0));
/// assert_eq!(set.remove(&crisp_number(4.0)), 2);
/// assert_eq!(set.arithmetic_mean(), Ok(crisp_number(1.0)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FuzzyNumberMultiset {
    buckets: BTreeMap<RankKey, Vec<FuzzyNumber>>,
    sums: ComponentSums,
}

impl FuzzyNumberMultiset {
    /// Creates an empty multiset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one occurrence of `value`.
    ///
    /// Rank-equivalent values keep their insertion order.
    pub fn insert(&mut self, value: FuzzyNumber) {
        let key = value.rank_key();
        self.sums.add(&value, 1);
        trace!(
            lower = value.lower_value(),
            modal = value.modal_value(),
            upper = value.upper_value(),
            len = self.sums.count(),
            "inserted fuzzy number"
        );
        self.buckets.entry(key).or_default().push(value);
    }

    /// Removes every occurrence equal to `value` and returns how many were
    /// removed.
    ///
    /// Matching is by component equality, so rank-equivalent values with
    /// different components stay. Removing an absent value is a no-op.
    pub fn remove(&mut self, value: &FuzzyNumber) -> usize {
        let key = value.rank_key();
        let Some(bucket) = self.buckets.get_mut(&key) else {
            return 0;
        };

        let before = bucket.len();
        bucket.retain(|held| held != value);
        let removed = before - bucket.len();
        if bucket.is_empty() {
            self.buckets.remove(&key);
        }

        self.sums.subtract(value, removed);
        trace!(
            lower = value.lower_value(),
            modal = value.modal_value(),
            upper = value.upper_value(),
            removed,
            len = self.sums.count(),
            "removed fuzzy number"
        );
        removed
    }

    /// Returns the componentwise arithmetic mean of all occurrences.
    ///
    /// # Errors
    /// Returns [`EmptyCollectionError`] if the multiset is empty.
    ///
    /// # Complexity
    /// O(1)
    pub fn arithmetic_mean(&self) -> Result<FuzzyNumber, EmptyCollectionError> {
        self.sums.mean().ok_or_else(|| {
            debug!("arithmetic mean requested from an empty multiset");
            EmptyCollectionError
        })
    }

    /// Returns the number of occurrences, duplicates included.
    pub fn len(&self) -> usize {
        self.sums.count()
    }

    /// Returns `true` if the multiset holds nothing.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Returns the number of occurrences equal to `value`.
    pub fn count(&self, value: &FuzzyNumber) -> usize {
        self.buckets
            .get(&value.rank_key())
            .map_or(0, |bucket| bucket.iter().filter(|held| *held == value).count())
    }

    /// Returns `true` if an occurrence equal to `value` is held.
    pub fn contains(&self, value: &FuzzyNumber) -> bool {
        self.buckets
            .get(&value.rank_key())
            .is_some_and(|bucket| bucket.contains(value))
    }

    /// Running componentwise sums of the contents.
    pub fn sums(&self) -> &ComponentSums {
        &self.sums
    }

    /// Least-ranked element (first inserted among rank ties).
    pub fn first(&self) -> Option<&FuzzyNumber> {
        self.buckets.values().next().and_then(|bucket| bucket.first())
    }

    /// Highest-ranked element (last inserted among rank ties).
    pub fn last(&self) -> Option<&FuzzyNumber> {
        self.buckets.values().next_back().and_then(|bucket| bucket.last())
    }

    /// Iterates in ascending rank order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.buckets.values().flatten(),
            remaining: self.len(),
        }
    }

    /// Removes everything.
    pub fn clear(&mut self) {
        self.buckets.clear();
        self.sums.clear();
    }
}

impl Extend<FuzzyNumber> for FuzzyNumberMultiset {
    fn extend<I: IntoIterator<Item = FuzzyNumber>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl FromIterator<FuzzyNumber> for FuzzyNumberMultiset {
    fn from_iter<I: IntoIterator<Item = FuzzyNumber>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<const N: usize> From<[FuzzyNumber; N]> for FuzzyNumberMultiset {
    fn from(values: [FuzzyNumber; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a FuzzyNumberMultiset {
    type Item = &'a FuzzyNumber;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Rank-ordered iterator over a [`FuzzyNumberMultiset`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: Flatten<btree_map::Values<'a, RankKey, Vec<FuzzyNumber>>>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a FuzzyNumber;

    fn next(&mut self) -> Option<&'a FuzzyNumber> {
        let next = self.inner.next()?;
        self.remaining -= 1;
        Some(next)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let next = self.inner.next_back()?;
        self.remaining -= 1;
        Some(next)
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
